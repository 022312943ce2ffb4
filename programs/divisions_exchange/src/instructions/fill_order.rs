use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{BUY_ORDER_SEED, EXCHANGE_SEED, PAYMENT_SEED, SELL_ORDER_SEED};
use crate::errors::ErrorCode;
use crate::instructions::settle::{
    cascade_buy_fills, cascade_sell_fills, settle_buy_fill, settle_sell_fill,
};
use crate::state::exchange::Exchange;
use crate::state::order::Order;
use crate::state::payment::Payment;
use crate::utils::pricing::Pricing;

/// Permissionless: anyone may push a queued buy order forward.
#[derive(Accounts)]
#[instruction(index: u64)]
pub struct FillBuyOrder<'info> {
    pub caller: Signer<'info>,

    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint,
        has_one = treasury_pool @ ErrorCode::InvalidTreasuryPool
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(mut)]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: pinned by `has_one` on the exchange, read for the pool NAV
    pub treasury_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [BUY_ORDER_SEED, exchange.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = order.bump
    )]
    pub order: Account<'info, Order>,

    #[account(
        mut,
        token::mint = div_mint,
        constraint = buyer_token_account.owner == order.sender @ ErrorCode::Unauthorized
    )]
    pub buyer_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct FillSellOrder<'info> {
    pub caller: Signer<'info>,

    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint,
        has_one = treasury_pool @ ErrorCode::InvalidTreasuryPool
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(mut)]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: pinned by `has_one` on the exchange, read for the pool NAV
    pub treasury_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [SELL_ORDER_SEED, exchange.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = order.bump
    )]
    pub order: Account<'info, Order>,

    #[account(
        mut,
        seeds = [PAYMENT_SEED, exchange.key().as_ref(), order.sender.as_ref()],
        bump = payment.bump
    )]
    pub payment: Account<'info, Payment>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Fills buy order `index`, then cascades into sell orders in `remaining_accounts`.
pub fn fill_buy_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, FillBuyOrder<'info>>,
    _index: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    let fill = settle_buy_fill(
        &mut accounts.exchange,
        &mut accounts.order,
        &pricing,
        &accounts.div_mint,
        &mut accounts.token_reserve,
        &accounts.buyer_token_account,
        &accounts.token_program,
    )?;
    if fill.is_none() {
        msg!("Buy order {} has nothing fillable", accounts.order.index);
        return Ok(());
    }

    cascade_sell_fills(ctx.remaining_accounts, &mut accounts.exchange, &pricing, None)
}

/// Fills sell order `index`, then cascades into buy orders in `remaining_accounts`.
pub fn fill_sell_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, FillSellOrder<'info>>,
    _index: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    let fill = settle_sell_fill(
        &mut accounts.exchange,
        &mut accounts.order,
        &pricing,
        &mut accounts.payment,
    )?;
    if fill.is_none() {
        msg!("Sell order {} has nothing fillable", accounts.order.index);
        return Ok(());
    }

    cascade_buy_fills(
        ctx.remaining_accounts,
        &mut accounts.exchange,
        &pricing,
        &accounts.div_mint,
        &mut accounts.token_reserve,
        &accounts.token_program,
    )
}
