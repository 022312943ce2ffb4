use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{BUY_ORDER_SEED, EXCHANGE_SEED, PAYMENT_SEED};
use crate::errors::ErrorCode;
use crate::events::BuyOrderPlaced;
use crate::instructions::settle::{cascade_sell_fills, settle_buy_fill};
use crate::state::exchange::Exchange;
use crate::state::order::{Order, Side};
use crate::state::payment::Payment;
use crate::utils::pricing::Pricing;

#[derive(Accounts)]
pub struct PlaceBuyOrder<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

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
        init,
        payer = user,
        space = Order::SIZE,
        seeds = [
            BUY_ORDER_SEED,
            exchange.key().as_ref(),
            exchange.buy_orders_length.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub order: Account<'info, Order>,

    /// Receives refunds when the order is canceled
    #[account(
        init_if_needed,
        payer = user,
        space = Payment::SIZE,
        seeds = [PAYMENT_SEED, exchange.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub payment: Account<'info, Payment>,

    /// Receives DIV when the order is filled
    #[account(
        mut,
        token::mint = div_mint,
        token::authority = user
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> PlaceBuyOrder<'info> {
    fn place(&mut self, amount: u64, order_bump: u8, payment_bump: u8) -> Result<()> {
        let exchange_key = self.exchange.key();
        let user_key = self.user.key();

        self.exchange.append_order(
            &mut self.order,
            exchange_key,
            Side::Buy,
            user_key,
            amount,
            order_bump,
            Clock::get()?.unix_timestamp,
        )?;
        self.payment.open(exchange_key, user_key, payment_bump);

        // Escrow lamports on the exchange account
        system_program::transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.user.to_account_info(),
                    to: self.exchange.to_account_info(),
                },
            ),
            amount,
        )?;

        emit!(BuyOrderPlaced {
            index: self.order.index,
            sender: user_key,
            amount,
        });

        msg!(
            "Buy order {} placed: {} lamports (cumulative {})",
            self.order.index,
            amount,
            self.order.cumulative_amount
        );

        Ok(())
    }
}

pub fn handler(ctx: Context<PlaceBuyOrder>, amount: u64) -> Result<()> {
    ctx.accounts
        .place(amount, ctx.bumps.order, ctx.bumps.payment)
}

/// Places a buy order, fills it from the token reserve, then lets the new
/// lamports settle sell orders passed in `remaining_accounts`.
pub fn place_and_fill_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, PlaceBuyOrder<'info>>,
    amount: u64,
) -> Result<()> {
    ctx.accounts
        .place(amount, ctx.bumps.order, ctx.bumps.payment)?;

    let accounts = ctx.accounts;
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    settle_buy_fill(
        &mut accounts.exchange,
        &mut accounts.order,
        &pricing,
        &accounts.div_mint,
        &mut accounts.token_reserve,
        &accounts.user_token_account,
        &accounts.token_program,
    )?;

    let payment_key = accounts.payment.key();
    cascade_sell_fills(
        ctx.remaining_accounts,
        &mut accounts.exchange,
        &pricing,
        Some(&payment_key),
    )
}
