//! DIV/SOL exchange for a liquid-staking pool.
//!
//! Buyers escrow lamports and receive DIV; sellers escrow DIV and are paid in
//! lamports. Orders on each side form a FIFO queue ordered by a cumulative
//! watermark, and are filled at the treasury's NAV price whenever the opposite
//! reserve has room. The stake manager sweeps idle lamports to the treasury
//! (minting DIV into the reserve) and the treasury deposits lamports back
//! (burning DIV from the reserve).

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;


use instructions::*;

declare_id!("4HDEyaFwmaArBijeQVEGNCf5ppJn3qziLqBWrq3zsF25");

#[program]
pub mod divisions_exchange {
    use super::*;

    pub fn initialize_exchange(
        ctx: Context<InitializeExchange>,
        min_buy_order_amount: u64,
        min_sell_order_amount: u64,
        stake_manager: Pubkey,
        treasury: Pubkey,
        treasury_pool: Pubkey,
    ) -> Result<()> {
        instructions::initialize_exchange::handler(
            ctx,
            min_buy_order_amount,
            min_sell_order_amount,
            stake_manager,
            treasury,
            treasury_pool,
        )
    }

    // Orders

    pub fn place_buy_order(ctx: Context<PlaceBuyOrder>, amount: u64) -> Result<()> {
        instructions::place_buy_order::handler(ctx, amount)
    }

    /// Opposite-side orders to cascade into go in `remaining_accounts` as
    /// `(sell order, seller payment)` pairs, oldest first.
    pub fn place_and_fill_buy_order<'info>(
        ctx: Context<'_, '_, 'info, 'info, PlaceBuyOrder<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::place_buy_order::place_and_fill_handler(ctx, amount)
    }

    pub fn place_sell_order(ctx: Context<PlaceSellOrder>, amount: u64) -> Result<()> {
        instructions::place_sell_order::handler(ctx, amount)
    }

    /// Cascade pairs are `(buy order, buyer DIV account)`.
    pub fn place_and_fill_sell_order<'info>(
        ctx: Context<'_, '_, 'info, 'info, PlaceSellOrder<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::place_sell_order::place_and_fill_handler(ctx, amount)
    }

    pub fn receive_approval<'info>(
        ctx: Context<'_, '_, 'info, 'info, PlaceSellOrder<'info>>,
        amount: u64,
        extra_data: Vec<u8>,
    ) -> Result<()> {
        instructions::place_sell_order::receive_approval_handler(ctx, amount, extra_data)
    }

    pub fn fill_buy_order<'info>(
        ctx: Context<'_, '_, 'info, 'info, FillBuyOrder<'info>>,
        index: u64,
    ) -> Result<()> {
        instructions::fill_order::fill_buy_handler(ctx, index)
    }

    pub fn fill_sell_order<'info>(
        ctx: Context<'_, '_, 'info, 'info, FillSellOrder<'info>>,
        index: u64,
    ) -> Result<()> {
        instructions::fill_order::fill_sell_handler(ctx, index)
    }

    pub fn cancel_buy_order(ctx: Context<CancelBuyOrder>, index: u64) -> Result<()> {
        instructions::cancel_order::cancel_buy_handler(ctx, index)
    }

    pub fn cancel_sell_order(ctx: Context<CancelSellOrder>, index: u64) -> Result<()> {
        instructions::cancel_order::cancel_sell_handler(ctx, index)
    }

    pub fn withdraw_payments(ctx: Context<WithdrawPayments>) -> Result<()> {
        instructions::withdraw_payments::handler(ctx)
    }

    // Treasury bridge

    pub fn transfer_to_treasury<'info>(
        ctx: Context<'_, '_, 'info, 'info, TransferToTreasury<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::settlement::transfer_to_treasury_handler(ctx, amount)
    }

    pub fn handle_base_deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, HandleBaseDeposit<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::settlement::handle_base_deposit_handler(ctx, amount)
    }

    // Admin

    pub fn set_min_buy_order_amount(ctx: Context<UpdateExchange>, amount: u64) -> Result<()> {
        instructions::admin::set_min_buy_order_amount_handler(ctx, amount)
    }

    pub fn set_min_sell_order_amount(ctx: Context<UpdateExchange>, amount: u64) -> Result<()> {
        instructions::admin::set_min_sell_order_amount_handler(ctx, amount)
    }

    pub fn set_stake_manager(ctx: Context<UpdateExchange>, stake_manager: Pubkey) -> Result<()> {
        instructions::admin::set_stake_manager_handler(ctx, stake_manager)
    }

    pub fn set_treasury(
        ctx: Context<UpdateExchange>,
        treasury: Pubkey,
        treasury_pool: Pubkey,
    ) -> Result<()> {
        instructions::admin::set_treasury_handler(ctx, treasury, treasury_pool)
    }

    pub fn transfer_authority(ctx: Context<UpdateExchange>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }

    // Views

    pub fn div_price(ctx: Context<Quote>) -> Result<u64> {
        instructions::views::div_price_handler(ctx)
    }

    pub fn to_token(ctx: Context<Quote>, base_amount: u64) -> Result<u64> {
        instructions::views::to_token_handler(ctx, base_amount)
    }

    pub fn to_base(ctx: Context<Quote>, token_amount: u64) -> Result<u64> {
        instructions::views::to_base_handler(ctx, token_amount)
    }

    pub fn base_reserve(ctx: Context<Quote>) -> Result<u64> {
        instructions::views::base_reserve_handler(ctx)
    }

    pub fn token_reserve(ctx: Context<Quote>) -> Result<u64> {
        instructions::views::token_reserve_handler(ctx)
    }

    pub fn buy_order_fillable_amount(ctx: Context<QuoteOrder>) -> Result<u64> {
        instructions::views::buy_order_fillable_amount_handler(ctx)
    }

    pub fn sell_order_fillable_amount(ctx: Context<QuoteOrder>) -> Result<u64> {
        instructions::views::sell_order_fillable_amount_handler(ctx)
    }
}
