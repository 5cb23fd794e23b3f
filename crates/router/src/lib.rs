//! Trading router - the only path allowed to mutate pool reserves
//!
//! Both entry points check the executor capability and the caller's
//! deadline before anything moves, then run the three-legged trade:
//! debit the trader through the allowance-gated ledger path, apply the
//! reserve mutation, and credit the trader from the pool vault. A ledger
//! failure on the first leg aborts with nothing touched; a failure on
//! the payout leg is compensated (reserves restored, debit refunded)
//! before the error is returned, so no partial trade is ever observable.

use liftpad_common::{
    AccountId, Amount, Capability, LaunchpadError, Ledger, Policy, Role, Side, Timestamp,
    BPS_DENOMINATOR,
};
use liftpad_curve::CurvePool;
use serde::{Deserialize, Serialize};

/// One trade request, as the engine received it.
#[derive(Debug, Clone, Copy)]
pub struct TradeRequest {
    pub trader: AccountId,
    pub amount_in: Amount,
    pub min_out: Amount,
    pub deadline: Timestamp,
    pub now: Timestamp,
}

/// Deployment limits the router enforces per trade.
#[derive(Debug, Clone, Copy)]
pub struct TradeLimits {
    pub fee_bps: u64,
    /// Maximum fraction of the output reserve one trade may move, in
    /// basis points. 10,000 disables the limit.
    pub max_trade_bps: u64,
}

/// What the trade did, reported back to the engine and the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub trader: AccountId,
    pub side: Side,
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub in_net_of_fee: Amount,
    /// Reserves after the trade
    pub reserve_token: Amount,
    pub reserve_asset: Amount,
}

/// Swap reserve asset for tokens on `pool`.
pub fn execute_buy(
    policy: &Policy,
    cap: &Capability,
    ledger: &mut dyn Ledger,
    pool: &mut CurvePool,
    operator: AccountId,
    req: &TradeRequest,
    limits: TradeLimits,
) -> Result<TradeReceipt, LaunchpadError> {
    execute(policy, cap, ledger, pool, operator, req, limits, Side::Buy)
}

/// Swap tokens back into reserve asset on `pool`.
pub fn execute_sell(
    policy: &Policy,
    cap: &Capability,
    ledger: &mut dyn Ledger,
    pool: &mut CurvePool,
    operator: AccountId,
    req: &TradeRequest,
    limits: TradeLimits,
) -> Result<TradeReceipt, LaunchpadError> {
    execute(policy, cap, ledger, pool, operator, req, limits, Side::Sell)
}

#[allow(clippy::too_many_arguments)]
fn execute(
    policy: &Policy,
    cap: &Capability,
    ledger: &mut dyn Ledger,
    pool: &mut CurvePool,
    operator: AccountId,
    req: &TradeRequest,
    limits: TradeLimits,
    side: Side,
) -> Result<TradeReceipt, LaunchpadError> {
    policy.verify(cap, Role::Executor)?;
    if req.now > req.deadline {
        return Err(LaunchpadError::Expired);
    }
    if req.amount_in == 0 {
        return Err(LaunchpadError::ZeroAmount);
    }

    // Pre-quote so the size limit is checked before any ledger movement.
    let preview = pool.quote(req.amount_in, side, limits.fee_bps)?;
    let (reserve_token, reserve_asset) = pool.reserves();
    let reserve_out = match side {
        Side::Buy => reserve_token,
        Side::Sell => reserve_asset,
    };
    if preview.amount_out as u128 * BPS_DENOMINATOR as u128
        > reserve_out as u128 * limits.max_trade_bps as u128
    {
        return Err(LaunchpadError::TradeTooLarge);
    }

    let (token_in, token_out) = match side {
        Side::Buy => (pool.asset, pool.token),
        Side::Sell => (pool.token, pool.asset),
    };

    // Leg 1: debit the trader. Allowance-gated; failure leaves nothing moved.
    ledger.transfer_from(token_in, req.trader, operator, pool.vault, req.amount_in)?;

    // Leg 2: apply the reserve mutation. Errors here occur before the pool
    // state changes, so only the debit needs compensating.
    let snapshot = pool.clone();
    let outcome = match pool.apply_trade(req.amount_in, req.min_out, side, limits.fee_bps) {
        Ok(outcome) => outcome,
        Err(e) => {
            refund(ledger, token_in, pool.vault, req.trader, req.amount_in);
            return Err(e);
        }
    };

    // Leg 3: pay the trader out of the vault.
    if let Err(e) = ledger.transfer(token_out, pool.vault, req.trader, outcome.amount_out) {
        *pool = snapshot;
        refund(ledger, token_in, pool.vault, req.trader, req.amount_in);
        return Err(e.into());
    }

    log::debug!(
        "router: {:?} {} in={} out={} reserves=({}, {})",
        side,
        req.trader,
        req.amount_in,
        outcome.amount_out,
        outcome.reserve_token,
        outcome.reserve_asset
    );

    Ok(TradeReceipt {
        trader: req.trader,
        side,
        amount_in: req.amount_in,
        amount_out: outcome.amount_out,
        in_net_of_fee: outcome.in_net_of_fee,
        reserve_token: outcome.reserve_token,
        reserve_asset: outcome.reserve_asset,
    })
}

/// Compensating transfer for an already-debited leg. The vault held the
/// debit a moment ago, so this cannot fail against a consistent ledger;
/// if the ledger is inconsistent anyway, there is nothing better to do
/// than record it.
fn refund(
    ledger: &mut dyn Ledger,
    token: liftpad_common::TokenId,
    vault: AccountId,
    trader: AccountId,
    amount: Amount,
) {
    if let Err(e) = ledger.transfer(token, vault, trader, amount) {
        log::error!(
            "router: refund of {} to {} failed: {} - ledger inconsistent",
            amount,
            trader,
            e
        );
    }
}
