use anchor_lang::prelude::*;
use crate::constants::{EXCHANGE_SEED, PAYMENT_SEED};
use crate::errors::ErrorCode;
use crate::events::PaymentWithdrawn;
use crate::state::exchange::Exchange;
use crate::state::payment::Payment;

#[derive(Accounts)]
pub struct WithdrawPayments<'info> {
    #[account(mut)]
    pub payee: Signer<'info>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, exchange.div_mint.as_ref()],
        bump = exchange.bump
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(
        mut,
        seeds = [PAYMENT_SEED, exchange.key().as_ref(), payee.key().as_ref()],
        bump = payment.bump,
        has_one = payee @ ErrorCode::Unauthorized
    )]
    pub payment: Account<'info, Payment>,
}

pub fn handler(ctx: Context<WithdrawPayments>) -> Result<()> {
    let accounts = ctx.accounts;
    let amount = accounts.exchange.release_payment(&mut accounts.payment)?;

    accounts.exchange.sub_lamports(amount)?;
    accounts.payee.add_lamports(amount)?;

    emit!(PaymentWithdrawn {
        payee: accounts.payee.key(),
        amount,
    });

    msg!("Withdrew {} lamports to {}", amount, accounts.payee.key());

    Ok(())
}
