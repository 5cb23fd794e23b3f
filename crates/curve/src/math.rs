//! Constant product curve math (x·y=k)

use liftpad_common::{Amount, LaunchpadError, BPS_DENOMINATOR};

/// Result of pricing one trade against current reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveQuote {
    /// Units paid out of the output reserve
    pub amount_out: Amount,

    /// Input amount after the fee skim; only this part participates in
    /// pricing. The fee itself still enters the input reserve, which is
    /// what makes the product grow across trades.
    pub in_net_of_fee: Amount,

    /// Input reserve after the trade (gross input added)
    pub new_reserve_in: Amount,

    /// Output reserve after the trade
    pub new_reserve_out: Amount,
}

/// Input amount net of the trade fee, rounded down.
pub fn net_of_fee(amount_in: Amount, fee_bps: u64) -> Result<Amount, LaunchpadError> {
    if fee_bps >= BPS_DENOMINATOR {
        return Err(LaunchpadError::FeeTooHigh);
    }
    let net = amount_in as u128 * (BPS_DENOMINATOR - fee_bps) as u128 / BPS_DENOMINATOR as u128;
    // net <= amount_in, so the narrowing cannot fail
    Ok(net as Amount)
}

/// Price `amount_in` against `(reserve_in, reserve_out)`:
///
/// - `in_net = amount_in · (10000 − fee_bps) / 10000`
/// - `amount_out = reserve_out − ⌈reserve_in · reserve_out / (reserve_in + in_net)⌉`
///
/// The retained output reserve rounds up, so the output rounds down in the
/// pool's favor and the product never decreases across a trade. The output
/// is strictly less than `reserve_out`; a reserve is never fully drained.
pub fn quote(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    fee_bps: u64,
) -> Result<CurveQuote, LaunchpadError> {
    if amount_in == 0 {
        return Err(LaunchpadError::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(LaunchpadError::InsufficientLiquidity);
    }

    let in_net = net_of_fee(amount_in, fee_bps)?;

    // The gross input must still fit the reserve's numeric domain.
    let new_reserve_in = match reserve_in.checked_add(amount_in) {
        Some(v) => v,
        None => return Err(LaunchpadError::InsufficientLiquidity),
    };

    let k = reserve_in as u128 * reserve_out as u128;
    let denom = reserve_in as u128 + in_net as u128;

    // Ceiling division without widening past u128: the pool keeps at
    // least k / denom of the output side.
    let mut kept = k / denom;
    if k % denom != 0 {
        kept += 1;
    }

    // kept <= reserve_out because denom >= reserve_in, and kept >= 1
    // because k >= 1, so 0 <= amount_out < reserve_out.
    let amount_out = reserve_out - kept as Amount;

    Ok(CurveQuote {
        amount_out,
        in_net_of_fee: in_net,
        new_reserve_in,
        new_reserve_out: kept as Amount,
    })
}
