use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{EXCHANGE_SEED, TOKEN_RESERVE_SEED};
use crate::events::ExchangeInitialized;
use crate::state::exchange::Exchange;
use crate::utils::validation::{validate_address, validate_minimum_order_amount};

#[derive(Accounts)]
pub struct InitializeExchange<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// DIV mint; mint authority must be handed to the exchange PDA before
    /// the treasury sweep can mint
    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = Exchange::SIZE,
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump
    )]
    pub exchange: Account<'info, Exchange>,

    /// DIV reserve (PDA owned by exchange)
    #[account(
        init,
        payer = authority,
        seeds = [TOKEN_RESERVE_SEED, exchange.key().as_ref()],
        bump,
        token::mint = div_mint,
        token::authority = exchange,
        token::token_program = token_program
    )]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeExchange>,
    min_buy_order_amount: u64,
    min_sell_order_amount: u64,
    stake_manager: Pubkey,
    treasury: Pubkey,
    treasury_pool: Pubkey,
) -> Result<()> {
    validate_minimum_order_amount(min_buy_order_amount)?;
    validate_minimum_order_amount(min_sell_order_amount)?;
    validate_address(&stake_manager)?;
    validate_address(&treasury)?;
    validate_address(&treasury_pool)?;

    let exchange = &mut ctx.accounts.exchange;
    exchange.authority = ctx.accounts.authority.key();
    exchange.div_mint = ctx.accounts.div_mint.key();
    exchange.token_reserve = ctx.accounts.token_reserve.key();
    exchange.stake_manager = stake_manager;
    exchange.treasury = treasury;
    exchange.treasury_pool = treasury_pool;
    exchange.min_buy_order_amount = min_buy_order_amount;
    exchange.min_sell_order_amount = min_sell_order_amount;
    exchange.buy_orders_length = 0;
    exchange.sell_orders_length = 0;
    exchange.buy_cumulative_amount = 0;
    exchange.sell_cumulative_amount = 0;
    exchange.total_buy_filled = 0;
    exchange.total_sell_filled = 0;
    exchange.total_payments = 0;
    exchange.bump = ctx.bumps.exchange;
    exchange.token_reserve_bump = ctx.bumps.token_reserve;

    emit!(ExchangeInitialized {
        exchange: exchange.key(),
        authority: exchange.authority,
        div_mint: exchange.div_mint,
        min_buy_order_amount,
        min_sell_order_amount,
    });

    msg!(
        "Exchange created for mint {} (min buy {}, min sell {})",
        exchange.div_mint,
        min_buy_order_amount,
        min_sell_order_amount
    );

    Ok(())
}
