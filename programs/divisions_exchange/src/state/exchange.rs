use anchor_lang::prelude::*;
use crate::errors::ErrorCode;
use crate::state::order::{Order, Side};
use crate::state::payment::Payment;
use crate::utils::pricing::Pricing;
use crate::utils::validation::{
    validate_address, validate_minimum_order_amount, validate_order_amount,
};

/// Singleton exchange state for one DIV mint: configuration, both order
/// ledgers' watermarks and the reserve bookkeeping.
///
/// The exchange account also custodies the lamport reserve. Everything above
/// its rent-exempt minimum belongs either to `total_payments` (owed to payees)
/// or to the base reserve.
#[account]
pub struct Exchange {
    /// Owner of the admin surface (governance)
    pub authority: Pubkey,

    /// DIV mint; its mint authority is this exchange
    pub div_mint: Pubkey,

    /// DIV token account custodied by this exchange
    pub token_reserve: Pubkey,

    /// Only signer allowed to sweep lamports to the treasury
    pub stake_manager: Pubkey,

    /// Destination of swept lamports and only signer of base deposits
    pub treasury: Pubkey,

    /// Treasury account holding the pool NAV
    pub treasury_pool: Pubkey,

    pub min_buy_order_amount: u64,
    pub min_sell_order_amount: u64,

    pub buy_orders_length: u64,
    pub sell_orders_length: u64,

    /// Cumulative amount of the last buy / sell order placed
    pub buy_cumulative_amount: u64,
    pub sell_cumulative_amount: u64,

    /// Lifetime filled totals (lamports for buys, DIV for sells)
    pub total_buy_filled: u64,
    pub total_sell_filled: u64,

    /// Lamports credited to payees and not yet withdrawn
    pub total_payments: u64,

    /// PDA bumps
    pub bump: u8,
    pub token_reserve_bump: u8,
}

/// Result of a non-empty fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    pub index: u64,
    /// Amount filled now, in the order's unit
    pub amount: u64,
    /// Order's cumulative filled amount after this fill
    pub amount_filled: u64,
    /// What the sender receives, in the opposite unit
    pub payout: u64,
    pub finished: bool,
}

impl Exchange {
    pub const SIZE: usize = 8 + 32 * 6 + 8 * 9 + 1 + 1;

    pub fn min_order_amount(&self, side: Side) -> u64 {
        match side {
            Side::Buy => self.min_buy_order_amount,
            Side::Sell => self.min_sell_order_amount,
        }
    }

    /// Lamports available to sell orders: balance above rent, minus what is
    /// owed through the payment ledger.
    pub fn base_reserve(&self, lamports: u64, rent_exempt_minimum: u64) -> u64 {
        lamports
            .saturating_sub(rent_exempt_minimum)
            .saturating_sub(self.total_payments)
    }

    /// Appends a new order to `side`, assigning its index and cumulative watermark.
    #[allow(clippy::too_many_arguments)]
    pub fn append_order(
        &mut self,
        order: &mut Order,
        exchange: Pubkey,
        side: Side,
        sender: Pubkey,
        amount: u64,
        bump: u8,
        created_at: i64,
    ) -> Result<()> {
        validate_order_amount(amount, self.min_order_amount(side))?;

        let (length, cumulative) = match side {
            Side::Buy => (&mut self.buy_orders_length, &mut self.buy_cumulative_amount),
            Side::Sell => (&mut self.sell_orders_length, &mut self.sell_cumulative_amount),
        };

        let cumulative_amount = cumulative
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        order.exchange = exchange;
        order.side = side;
        order.index = *length;
        order.sender = sender;
        order.amount = amount;
        order.cumulative_amount = cumulative_amount;
        order.amount_filled = 0;
        order.amount_canceled = 0;
        order.finished = false;
        order.bump = bump;
        order.created_at = created_at;

        *length = length.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        *cumulative = cumulative_amount;

        Ok(())
    }

    /// Lamports of a buy order the token reserve can settle now.
    pub fn buy_order_fillable_amount(
        &self,
        order: &Order,
        pricing: &Pricing,
        token_reserve: u64,
    ) -> Result<u64> {
        require!(order.side == Side::Buy, ErrorCode::InvalidOrderSide);
        let reserve_in_base = pricing.to_base(token_reserve)?;
        Ok(order.fillable_amount(reserve_in_base, self.total_buy_filled))
    }

    /// DIV of a sell order the base reserve can settle now.
    pub fn sell_order_fillable_amount(
        &self,
        order: &Order,
        pricing: &Pricing,
        base_reserve: u64,
    ) -> Result<u64> {
        require!(order.side == Side::Sell, ErrorCode::InvalidOrderSide);
        let reserve_in_token = pricing.to_token(base_reserve)?;
        Ok(order.fillable_amount(reserve_in_token, self.total_sell_filled))
    }

    /// Fills as much of a buy order as possible. `None` means nothing was
    /// fillable and nothing changed. The payout is DIV that the caller must
    /// move out of the token reserve.
    pub fn fill_buy_order(
        &mut self,
        order: &mut Order,
        pricing: &Pricing,
        token_reserve: u64,
    ) -> Result<Option<Fill>> {
        require!(!order.finished, ErrorCode::OrderFinished);

        let fillable = self.buy_order_fillable_amount(order, pricing, token_reserve)?;
        if fillable == 0 {
            return Ok(None);
        }

        let payout = pricing.to_token(fillable)?;
        require!(payout <= token_reserve, ErrorCode::InsufficientTokenReserve);

        order.record_fill(fillable)?;
        self.total_buy_filled = self
            .total_buy_filled
            .checked_add(fillable)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(Some(Fill {
            index: order.index,
            amount: fillable,
            amount_filled: order.amount_filled,
            payout,
            finished: order.finished,
        }))
    }

    /// Fills as much of a sell order as possible. The payout is lamports that
    /// the caller must credit to the seller's payment account.
    pub fn fill_sell_order(
        &mut self,
        order: &mut Order,
        pricing: &Pricing,
        base_reserve: u64,
    ) -> Result<Option<Fill>> {
        require!(!order.finished, ErrorCode::OrderFinished);

        let fillable = self.sell_order_fillable_amount(order, pricing, base_reserve)?;
        if fillable == 0 {
            return Ok(None);
        }

        let payout = pricing.to_base(fillable)?;
        require!(payout <= base_reserve, ErrorCode::InsufficientBaseReserve);

        order.record_fill(fillable)?;
        self.total_sell_filled = self
            .total_sell_filled
            .checked_add(fillable)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(Some(Fill {
            index: order.index,
            amount: fillable,
            amount_filled: order.amount_filled,
            payout,
            finished: order.finished,
        }))
    }

    /// Credits lamports to a payee; they leave the base reserve immediately.
    pub fn credit_payment(&mut self, payment: &mut Payment, amount: u64) -> Result<()> {
        payment.balance = payment
            .balance
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.total_payments = self
            .total_payments
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Zeroes a payee's balance and returns the lamports to send out.
    pub fn release_payment(&mut self, payment: &mut Payment) -> Result<u64> {
        let amount = payment.balance;
        require!(amount > 0, ErrorCode::NoPaymentDue);

        self.total_payments = self
            .total_payments
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        payment.balance = 0;

        Ok(amount)
    }

    fn require_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.authority, ErrorCode::Unauthorized);
        Ok(())
    }

    pub fn set_min_order_amount(&mut self, caller: &Pubkey, side: Side, amount: u64) -> Result<()> {
        self.require_authority(caller)?;
        validate_minimum_order_amount(amount)?;
        match side {
            Side::Buy => self.min_buy_order_amount = amount,
            Side::Sell => self.min_sell_order_amount = amount,
        }
        Ok(())
    }

    pub fn set_stake_manager(&mut self, caller: &Pubkey, stake_manager: Pubkey) -> Result<()> {
        self.require_authority(caller)?;
        validate_address(&stake_manager)?;
        self.stake_manager = stake_manager;
        Ok(())
    }

    pub fn set_treasury(
        &mut self,
        caller: &Pubkey,
        treasury: Pubkey,
        treasury_pool: Pubkey,
    ) -> Result<()> {
        self.require_authority(caller)?;
        validate_address(&treasury)?;
        validate_address(&treasury_pool)?;
        self.treasury = treasury;
        self.treasury_pool = treasury_pool;
        Ok(())
    }

    /// Hands the admin surface to `new_authority` and returns the previous one.
    pub fn transfer_authority(&mut self, caller: &Pubkey, new_authority: Pubkey) -> Result<Pubkey> {
        self.require_authority(caller)?;
        validate_address(&new_authority)?;
        let previous_authority = self.authority;
        self.authority = new_authority;
        Ok(previous_authority)
    }
}
