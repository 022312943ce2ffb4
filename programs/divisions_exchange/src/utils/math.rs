use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Computes `value * numerator / denominator` with a u128 intermediate,
/// rounding down.
pub fn mul_div_floor(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    let quotient = product
        .checked_div(denominator as u128)
        .ok_or(ErrorCode::MathOverflow)?;

    u64::try_from(quotient).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// Amount of an order that the current liquidity can settle right now.
///
/// Orders on one side draw from a single pool in placement order. The pool is
/// everything that ever became available to the side (the opposing reserve,
/// converted to this side's unit, plus everything already filled on this
/// side). Earlier orders have a claim of `cumulative_before`, and this order
/// has already taken `amount_filled` of its own share:
///
/// fillable = min(own_left, reserve, reserve + total_filled - cumulative_before - amount_filled)
///
/// The result is clamped at zero, and to the reserve itself so a shrunken
/// reserve can never be over-drawn.
pub fn fillable_amount(
    own_left: u64,
    cumulative_before: u64,
    amount_filled: u64,
    opposing_reserve: u64,
    total_filled: u64,
) -> u64 {
    let liquidity = opposing_reserve as u128 + total_filled as u128;
    let claimed = cumulative_before as u128 + amount_filled as u128;
    let available = liquidity.saturating_sub(claimed);

    available
        .min(own_left as u128)
        .min(opposing_reserve as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div_floor(10, 1, 3).unwrap(), 3);
        assert_eq!(mul_div_floor(u64::MAX, 2, 2).unwrap(), u64::MAX);
        assert!(mul_div_floor(u64::MAX, 2, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
    }

    #[test]
    fn first_order_takes_what_the_reserve_allows() {
        assert_eq!(fillable_amount(3, 0, 0, 5, 0), 3);
        assert_eq!(fillable_amount(8, 0, 0, 5, 0), 5);
        assert_eq!(fillable_amount(8, 0, 0, 0, 0), 0);
    }

    #[test]
    fn later_order_waits_behind_earlier_claims() {
        // order 0 claims 10, reserve is 12: order 1 may take only 2
        assert_eq!(fillable_amount(10, 10, 0, 12, 0), 2);
        // once order 0 filled its 10, reserve is 2 and total filled 10
        assert_eq!(fillable_amount(10, 10, 0, 2, 10), 2);
    }

    #[test]
    fn own_fills_are_not_counted_twice() {
        // order of 10 filled 4 from a reserve of 4; nothing new arrived
        assert_eq!(fillable_amount(6, 0, 4, 0, 4), 0);
        // 3 more arrive
        assert_eq!(fillable_amount(6, 0, 4, 3, 4), 3);
    }

    #[test]
    fn never_exceeds_reserve() {
        // a later order already filled ahead of this one, then the reserve shrank
        assert_eq!(fillable_amount(10, 0, 0, 0, 10), 0);
        assert_eq!(fillable_amount(10, 0, 0, 4, 10), 4);
    }
}
