use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::utils::math::fillable_amount;

/// Which sequence an order belongs to
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Pays lamports, receives DIV
    Buy,
    /// Pays DIV, receives lamports
    Sell,
}

/// One placed buy or sell intent. Never closed: finished orders stay as the
/// exchange's audit trail.
#[account]
pub struct Order {
    /// Exchange this order belongs to
    pub exchange: Pubkey,

    pub side: Side,

    /// Position in its side's sequence
    pub index: u64,

    /// Order owner, the only account allowed to cancel
    pub sender: Pubkey,

    /// Requested amount: lamports for buys, DIV for sells
    pub amount: u64,

    /// Sum of `amount` over every order of this side up to and including this one
    pub cumulative_amount: u64,

    pub amount_filled: u64,

    /// Unfilled remainder at cancellation time
    pub amount_canceled: u64,

    pub finished: bool,

    /// PDA bump
    pub bump: u8,

    /// Creation timestamp
    pub created_at: i64,
}

impl Order {
    pub const SIZE: usize = 8 + 32 + 1 + 8 + 32 + 8 + 8 + 8 + 8 + 1 + 1 + 8;

    pub fn remaining(&self) -> u64 {
        self.amount
            .saturating_sub(self.amount_filled)
            .saturating_sub(self.amount_canceled)
    }

    /// Claim of every strictly earlier order on the same side
    pub fn cumulative_before(&self) -> u64 {
        self.cumulative_amount.saturating_sub(self.amount)
    }

    /// Fillable amount given the opposing reserve (in this order's unit) and
    /// the side's lifetime filled total. Zero for finished orders.
    pub fn fillable_amount(&self, opposing_reserve: u64, total_filled: u64) -> u64 {
        if self.finished {
            return 0;
        }

        fillable_amount(
            self.remaining(),
            self.cumulative_before(),
            self.amount_filled,
            opposing_reserve,
            total_filled,
        )
    }

    pub fn record_fill(&mut self, fill_amount: u64) -> Result<()> {
        require!(!self.finished, ErrorCode::OrderFinished);
        require!(fill_amount <= self.remaining(), ErrorCode::FillExceedsRemaining);

        self.amount_filled = self
            .amount_filled
            .checked_add(fill_amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.refresh_finished();

        Ok(())
    }

    /// Cancels the whole unfilled remainder and returns it.
    pub fn cancel(&mut self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.sender, ErrorCode::Unauthorized);
        require!(!self.finished, ErrorCode::OrderFinished);

        let canceled = self.remaining();
        self.amount_canceled = canceled;
        self.refresh_finished();

        Ok(canceled)
    }

    fn refresh_finished(&mut self) {
        self.finished = self.amount_filled + self.amount_canceled == self.amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(amount: u64, cumulative_amount: u64) -> Order {
        Order {
            exchange: Pubkey::new_from_array([1; 32]),
            side: Side::Buy,
            index: 0,
            sender: Pubkey::new_from_array([2; 32]),
            amount,
            cumulative_amount,
            amount_filled: 0,
            amount_canceled: 0,
            finished: false,
            bump: 255,
            created_at: 0,
        }
    }

    #[test]
    fn partial_then_full_fill() {
        let mut o = order(100, 100);
        o.record_fill(30).unwrap();
        assert_eq!(o.remaining(), 70);
        assert!(!o.finished);

        o.record_fill(70).unwrap();
        assert_eq!(o.remaining(), 0);
        assert!(o.finished);
    }

    #[test]
    fn overfill_is_rejected() {
        let mut o = order(100, 100);
        let expected: anchor_lang::error::Error = ErrorCode::FillExceedsRemaining.into();
        assert_eq!(o.record_fill(101).unwrap_err(), expected);
        assert_eq!(o.amount_filled, 0);

        o.record_fill(60).unwrap();
        assert_eq!(o.record_fill(41).unwrap_err(), expected);
        assert_eq!(o.amount_filled, 60);
    }

    #[test]
    fn cancel_takes_the_whole_remainder() {
        let mut o = order(100, 250);
        o.record_fill(40).unwrap();

        let sender = o.sender;
        let canceled = o.cancel(&sender).unwrap();
        assert_eq!(canceled, 60);
        assert_eq!(o.amount_canceled, 60);
        assert_eq!(o.amount_filled + o.amount_canceled, o.amount);
        assert!(o.finished);
    }

    #[test]
    fn only_sender_cancels() {
        let mut o = order(100, 100);
        let stranger = Pubkey::new_from_array([9; 32]);
        assert!(o.cancel(&stranger).is_err());
        assert!(!o.finished);
    }

    #[test]
    fn finished_order_rejects_fill_and_cancel() {
        let mut o = order(100, 100);
        let sender = o.sender;
        o.cancel(&sender).unwrap();

        assert!(o.cancel(&sender).is_err());
        assert!(o.record_fill(1).is_err());
        assert_eq!(o.fillable_amount(1_000, 0), 0);
    }

    #[test]
    fn cumulative_before_excludes_own_amount() {
        let o = order(40, 140);
        assert_eq!(o.cumulative_before(), 100);
        assert_eq!(o.fillable_amount(120, 0), 20);
        assert_eq!(o.fillable_amount(500, 0), 40);
    }
}
