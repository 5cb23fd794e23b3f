//! Identities, amounts, and numeric constants

use serde::{Deserialize, Serialize};

/// Smallest indivisible unit of any ledger asset.
///
/// All intermediate arithmetic widens to u128 and is checked; an amount
/// that cannot be represented back in u64 is an error, never a wrap.
pub type Amount = u64;

/// Seconds since the epoch, as reported by the host.
pub type Timestamp = u64;

/// Basis points denominator (10,000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum configurable trade fee (30%)
pub const MAX_FEE_BPS: u64 = 3_000;

/// Fixed-point scale for spot prices (1e6)
pub const PRICE_SCALE: u64 = 1_000_000;

/// Ledger account. Hosts allocate ids for end users from the low range;
/// the core reserves the two top bits for accounts it controls itself
/// (its operator account and per-launch pool vaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

const OPERATOR_NAMESPACE: u64 = 1 << 63;
const VAULT_NAMESPACE: u64 = 1 << 62;

impl AccountId {
    /// The engine's own operator account. Traders grant this account an
    /// allowance before the engine may debit them.
    pub const fn operator() -> AccountId {
        AccountId(OPERATOR_NAMESPACE)
    }

    /// Custody vault for one launch's curve pool.
    pub const fn pool_vault(launch: LaunchId) -> AccountId {
        AccountId(VAULT_NAMESPACE | launch.0)
    }

    /// Custody account for an external venue pool's seeded liquidity.
    pub const fn venue_custody(pool: VenuePoolId) -> AccountId {
        AccountId(VAULT_NAMESPACE | OPERATOR_NAMESPACE | pool.0)
    }
}

/// A fungible asset known to the ledger collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

/// A curve pool in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(pub u64);

/// A launch record owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaunchId(pub u64);

/// A pool on the external constant-product venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VenuePoolId(pub u64);

macro_rules! impl_display {
    ($($id:ident => $tag:literal),* $(,)?) => {
        $(impl core::fmt::Display for $id {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        })*
    };
}

impl_display! {
    AccountId => "acct:",
    TokenId => "token:",
    PoolId => "pool:",
    LaunchId => "launch:",
    VenuePoolId => "venue:",
}

/// Trade direction, from the trader's point of view: `Buy` pays reserve
/// asset for tokens, `Sell` pays tokens for reserve asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}
