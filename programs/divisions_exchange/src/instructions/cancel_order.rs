use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{BUY_ORDER_SEED, EXCHANGE_SEED, PAYMENT_SEED, SELL_ORDER_SEED};
use crate::errors::ErrorCode;
use crate::events::{BuyOrderCanceled, SellOrderCanceled};
use crate::instructions::settle::transfer_from_token_reserve;
use crate::state::exchange::Exchange;
use crate::state::order::Order;
use crate::state::payment::Payment;

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct CancelBuyOrder<'info> {
    pub sender: Signer<'info>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, exchange.div_mint.as_ref()],
        bump = exchange.bump
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(
        mut,
        seeds = [BUY_ORDER_SEED, exchange.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = order.bump
    )]
    pub order: Account<'info, Order>,

    /// Refund lands here; withdrawn later through `withdraw_payments`
    #[account(
        mut,
        seeds = [PAYMENT_SEED, exchange.key().as_ref(), sender.key().as_ref()],
        bump = payment.bump
    )]
    pub payment: Account<'info, Payment>,
}

#[derive(Accounts)]
#[instruction(index: u64)]
pub struct CancelSellOrder<'info> {
    pub sender: Signer<'info>,

    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(mut)]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [SELL_ORDER_SEED, exchange.key().as_ref(), index.to_le_bytes().as_ref()],
        bump = order.bump
    )]
    pub order: Account<'info, Order>,

    #[account(
        mut,
        token::mint = div_mint,
        token::authority = sender
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Cancels the unfilled rest of a buy order and credits the lamports to the
/// sender's payment account.
pub fn cancel_buy_handler(ctx: Context<CancelBuyOrder>, _index: u64) -> Result<()> {
    let sender = ctx.accounts.sender.key();
    let order = &mut ctx.accounts.order;

    let canceled = order.cancel(&sender)?;
    ctx.accounts
        .exchange
        .credit_payment(&mut ctx.accounts.payment, canceled)?;

    emit!(BuyOrderCanceled {
        index: order.index,
        amount_canceled: canceled,
    });

    msg!("Buy order {} canceled: {} lamports refunded", order.index, canceled);

    Ok(())
}

/// Cancels the unfilled rest of a sell order and returns the DIV directly.
pub fn cancel_sell_handler(ctx: Context<CancelSellOrder>, _index: u64) -> Result<()> {
    let sender = ctx.accounts.sender.key();
    let canceled = ctx.accounts.order.cancel(&sender)?;

    if canceled > 0 {
        transfer_from_token_reserve(
            &ctx.accounts.exchange,
            &ctx.accounts.div_mint,
            &ctx.accounts.token_reserve,
            &ctx.accounts.sender_token_account,
            &ctx.accounts.token_program,
            canceled,
        )?;
    }

    emit!(SellOrderCanceled {
        index: ctx.accounts.order.index,
        amount_canceled: canceled,
    });

    msg!(
        "Sell order {} canceled: {} DIV returned",
        ctx.accounts.order.index,
        canceled
    );

    Ok(())
}
