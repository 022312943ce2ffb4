use anchor_lang::prelude::*;
use crate::constants::EXCHANGE_SEED;
use crate::events::{
    AuthorityTransferred, MinBuyOrderAmountSet, MinSellOrderAmountSet, StakeManagerSet,
    TreasurySet,
};
use crate::state::exchange::Exchange;
use crate::state::order::Side;

/// Shared context for every authority-gated setter. The signer is checked
/// against `exchange.authority` by the setters themselves.
#[derive(Accounts)]
pub struct UpdateExchange<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, exchange.div_mint.as_ref()],
        bump = exchange.bump
    )]
    pub exchange: Account<'info, Exchange>,
}

pub fn set_min_buy_order_amount_handler(ctx: Context<UpdateExchange>, amount: u64) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    ctx.accounts
        .exchange
        .set_min_order_amount(&caller, Side::Buy, amount)?;

    emit!(MinBuyOrderAmountSet { amount });
    msg!("Minimum buy order amount set to {}", amount);

    Ok(())
}

pub fn set_min_sell_order_amount_handler(ctx: Context<UpdateExchange>, amount: u64) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    ctx.accounts
        .exchange
        .set_min_order_amount(&caller, Side::Sell, amount)?;

    emit!(MinSellOrderAmountSet { amount });
    msg!("Minimum sell order amount set to {}", amount);

    Ok(())
}

pub fn set_stake_manager_handler(ctx: Context<UpdateExchange>, stake_manager: Pubkey) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    ctx.accounts
        .exchange
        .set_stake_manager(&caller, stake_manager)?;

    emit!(StakeManagerSet { stake_manager });
    msg!("Stake manager set to {}", stake_manager);

    Ok(())
}

/// Points the exchange at a treasury and the pool account it reads the NAV from.
pub fn set_treasury_handler(
    ctx: Context<UpdateExchange>,
    treasury: Pubkey,
    treasury_pool: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    ctx.accounts
        .exchange
        .set_treasury(&caller, treasury, treasury_pool)?;

    emit!(TreasurySet {
        treasury,
        treasury_pool,
    });
    msg!("Treasury set to {} (pool {})", treasury, treasury_pool);

    Ok(())
}

pub fn transfer_authority_handler(ctx: Context<UpdateExchange>, new_authority: Pubkey) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let previous_authority = ctx
        .accounts
        .exchange
        .transfer_authority(&caller, new_authority)?;

    emit!(AuthorityTransferred {
        previous_authority,
        new_authority,
    });
    msg!("Authority transferred from {} to {}", previous_authority, new_authority);

    Ok(())
}
