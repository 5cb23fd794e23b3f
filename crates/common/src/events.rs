//! Event journal entries
//!
//! Every state-changing engine operation appends one entry. The journal
//! is the host's feed for indexing and UIs; the core never reads it back.

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Amount, LaunchId, Side, TokenId, VenuePoolId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Launched {
        launch: LaunchId,
        creator: AccountId,
        restricted_token: TokenId,
        deposit: Amount,
    },
    Trade {
        launch: LaunchId,
        trader: AccountId,
        side: Side,
        asset_amount: Amount,
        token_amount: Amount,
        /// Reserves after the trade
        reserve_token: Amount,
        reserve_asset: Amount,
    },
    Graduated {
        launch: LaunchId,
        free_token: TokenId,
        venue_pool: VenuePoolId,
        seeded_tokens: Amount,
        seeded_asset: Amount,
        lp_units: Amount,
    },
    Redeemed {
        launch: LaunchId,
        holder: AccountId,
        amount: Amount,
    },
}
