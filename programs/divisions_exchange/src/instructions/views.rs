use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};
use crate::constants::EXCHANGE_SEED;
use crate::errors::ErrorCode;
use crate::instructions::settle::base_reserve_of;
use crate::state::exchange::Exchange;
use crate::state::order::Order;
use crate::utils::pricing::Pricing;

// Read-only quotes. Values come back through Anchor return data.

#[derive(Accounts)]
pub struct Quote<'info> {
    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint,
        has_one = treasury_pool @ ErrorCode::InvalidTreasuryPool
    )]
    pub exchange: Account<'info, Exchange>,

    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: pinned by `has_one` on the exchange, read for the pool NAV
    pub treasury_pool: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct QuoteOrder<'info> {
    pub quote: Quote<'info>,

    #[account(constraint = order.exchange == quote.exchange.key() @ ErrorCode::InvalidOrder)]
    pub order: Account<'info, Order>,
}

impl<'info> Quote<'info> {
    fn pricing(&self) -> Result<Pricing> {
        Pricing::load(&self.treasury_pool, &self.div_mint)
    }
}

pub fn div_price_handler(ctx: Context<Quote>) -> Result<u64> {
    ctx.accounts.pricing()?.price()
}

pub fn to_token_handler(ctx: Context<Quote>, base_amount: u64) -> Result<u64> {
    ctx.accounts.pricing()?.to_token(base_amount)
}

pub fn to_base_handler(ctx: Context<Quote>, token_amount: u64) -> Result<u64> {
    ctx.accounts.pricing()?.to_base(token_amount)
}

pub fn base_reserve_handler(ctx: Context<Quote>) -> Result<u64> {
    base_reserve_of(&ctx.accounts.exchange)
}

pub fn token_reserve_handler(ctx: Context<Quote>) -> Result<u64> {
    Ok(ctx.accounts.token_reserve.amount)
}

pub fn buy_order_fillable_amount_handler(ctx: Context<QuoteOrder>) -> Result<u64> {
    let quote = &ctx.accounts.quote;
    let pricing = quote.pricing()?;

    quote.exchange.buy_order_fillable_amount(
        &ctx.accounts.order,
        &pricing,
        quote.token_reserve.amount,
    )
}

pub fn sell_order_fillable_amount_handler(ctx: Context<QuoteOrder>) -> Result<u64> {
    let quote = &ctx.accounts.quote;
    let pricing = quote.pricing()?;
    let base_reserve = base_reserve_of(&quote.exchange)?;

    quote
        .exchange
        .sell_order_fillable_amount(&ctx.accounts.order, &pricing, base_reserve)
}
