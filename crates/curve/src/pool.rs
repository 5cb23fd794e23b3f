//! Curve pool state - reserves, trade application, audit product

use liftpad_common::{
    AccountId, Amount, LaunchpadError, Side, TokenId, PRICE_SCALE,
};
use serde::{Deserialize, Serialize};

use crate::math::{quote, CurveQuote};

/// One launch's reserve pool.
///
/// `reserve_token` is real custody: the full fixed supply sits in the
/// pool vault at creation. `reserve_asset` starts at the virtual seed,
/// which shapes the opening price but has no custody behind it; the
/// vault's real asset balance is always `reserve_asset - seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePool {
    /// Launched token being sold by the curve
    pub token: TokenId,

    /// Reserve asset raised by the curve
    pub asset: TokenId,

    /// Ledger account holding the pool's custody
    pub vault: AccountId,

    reserve_token: Amount,
    reserve_asset: Amount,
    virtual_asset_seed: Amount,

    /// Product after the last applied trade. Audit trail for fee
    /// accounting only; it never gates a trade.
    k_last: u128,

    /// Set at graduation; a frozen pool accepts no further trades.
    frozen: bool,
}

/// Reserve deltas from one applied trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub amount_out: Amount,
    pub in_net_of_fee: Amount,
    pub reserve_token: Amount,
    pub reserve_asset: Amount,
}

impl CurvePool {
    pub fn new(
        token: TokenId,
        asset: TokenId,
        vault: AccountId,
        token_supply: Amount,
        virtual_asset_seed: Amount,
    ) -> Result<Self, LaunchpadError> {
        if token_supply == 0 || virtual_asset_seed == 0 {
            return Err(LaunchpadError::ZeroAmount);
        }
        Ok(Self {
            token,
            asset,
            vault,
            reserve_token: token_supply,
            reserve_asset: virtual_asset_seed,
            virtual_asset_seed,
            k_last: token_supply as u128 * virtual_asset_seed as u128,
            frozen: false,
        })
    }

    pub fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_token, self.reserve_asset)
    }

    /// Asset actually held by the vault: the reserve level minus the
    /// virtual seed. This is what graduation migrates.
    pub fn real_asset(&self) -> Amount {
        self.reserve_asset - self.virtual_asset_seed
    }

    pub fn k_last(&self) -> u128 {
        self.k_last
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Permanently disable trading. Called exactly once, at graduation.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Price a trade without applying it. `Side::Buy` pays asset for
    /// tokens, `Side::Sell` the reverse.
    pub fn quote(
        &self,
        amount_in: Amount,
        side: Side,
        fee_bps: u64,
    ) -> Result<CurveQuote, LaunchpadError> {
        let (reserve_in, reserve_out) = match side {
            Side::Buy => (self.reserve_asset, self.reserve_token),
            Side::Sell => (self.reserve_token, self.reserve_asset),
        };
        quote(reserve_in, reserve_out, amount_in, fee_bps)
    }

    /// Quote, enforce the caller's minimum output, then mutate reserves
    /// and update `k_last`. Nothing is mutated on any error path.
    pub fn apply_trade(
        &mut self,
        amount_in: Amount,
        min_out: Amount,
        side: Side,
        fee_bps: u64,
    ) -> Result<TradeOutcome, LaunchpadError> {
        if self.frozen {
            return Err(LaunchpadError::TradingDisabled);
        }
        let q = self.quote(amount_in, side, fee_bps)?;
        if q.amount_out < min_out {
            return Err(LaunchpadError::SlippageExceeded);
        }

        match side {
            Side::Buy => {
                self.reserve_asset = q.new_reserve_in;
                self.reserve_token = q.new_reserve_out;
            }
            Side::Sell => {
                self.reserve_token = q.new_reserve_in;
                self.reserve_asset = q.new_reserve_out;
            }
        }
        self.k_last = self.reserve_token as u128 * self.reserve_asset as u128;

        Ok(TradeOutcome {
            amount_out: q.amount_out,
            in_net_of_fee: q.in_net_of_fee,
            reserve_token: self.reserve_token,
            reserve_asset: self.reserve_asset,
        })
    }

    /// Spot price in asset units per token, scaled by [`PRICE_SCALE`].
    pub fn spot_price(&self) -> Amount {
        if self.reserve_token == 0 {
            return 0;
        }
        (self.reserve_asset as u128 * PRICE_SCALE as u128 / self.reserve_token as u128) as Amount
    }
}
