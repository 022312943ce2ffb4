use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_interface::{self, Burn, Mint, MintTo, TokenAccount, TokenInterface};
use crate::constants::EXCHANGE_SEED;
use crate::errors::ErrorCode;
use crate::events::{BaseDeposited, TransferredToTreasury};
use crate::instructions::settle::{base_reserve_of, cascade_buy_fills, cascade_sell_fills};
use crate::state::exchange::Exchange;
use crate::utils::pricing::Pricing;
use crate::utils::validation::validate_amount;

#[derive(Accounts)]
pub struct TransferToTreasury<'info> {
    pub stake_manager: Signer<'info>,

    #[account(mut)]
    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = stake_manager @ ErrorCode::Unauthorized,
        has_one = treasury @ ErrorCode::InvalidAddress,
        has_one = treasury_pool @ ErrorCode::InvalidTreasuryPool,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(mut)]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: lamport destination, pinned by `has_one` on the exchange
    #[account(mut)]
    pub treasury: UncheckedAccount<'info>,

    /// CHECK: pinned by `has_one` on the exchange, read for the pool NAV
    pub treasury_pool: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct HandleBaseDeposit<'info> {
    #[account(mut)]
    pub treasury: Signer<'info>,

    #[account(mut)]
    pub div_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [EXCHANGE_SEED, div_mint.key().as_ref()],
        bump = exchange.bump,
        has_one = treasury @ ErrorCode::Unauthorized,
        has_one = treasury_pool @ ErrorCode::InvalidTreasuryPool,
        has_one = div_mint @ ErrorCode::InvalidMint,
        has_one = token_reserve @ ErrorCode::InvalidMint
    )]
    pub exchange: Account<'info, Exchange>,

    #[account(mut)]
    pub token_reserve: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: pinned by `has_one` on the exchange, read for the pool NAV
    pub treasury_pool: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

/// Sweeps `amount` lamports of the base reserve to the treasury and mints the
/// matching DIV into the token reserve, which then settles buy orders passed
/// in `remaining_accounts`.
pub fn transfer_to_treasury_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, TransferToTreasury<'info>>,
    amount: u64,
) -> Result<()> {
    validate_amount(amount)?;

    let accounts = ctx.accounts;
    // Priced before the mint changes the supply
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    let base_reserve = base_reserve_of(&accounts.exchange)?;
    require!(amount <= base_reserve, ErrorCode::InsufficientBaseReserve);

    accounts.exchange.sub_lamports(amount)?;
    accounts.treasury.add_lamports(amount)?;

    let minted = pricing.to_token(amount)?;
    if minted > 0 {
        let div_mint_key = accounts.exchange.div_mint;
        let signer_seeds: &[&[&[u8]]] =
            &[&[EXCHANGE_SEED, div_mint_key.as_ref(), &[accounts.exchange.bump]]];

        token_interface::mint_to(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                MintTo {
                    mint: accounts.div_mint.to_account_info(),
                    to: accounts.token_reserve.to_account_info(),
                    authority: accounts.exchange.to_account_info(),
                },
                signer_seeds,
            ),
            minted,
        )?;
        accounts.token_reserve.reload()?;
    }

    emit!(TransferredToTreasury { amount, minted });
    msg!(
        "Transferred {} lamports to treasury, minted {} DIV",
        amount,
        minted
    );

    cascade_buy_fills(
        ctx.remaining_accounts,
        &mut accounts.exchange,
        &pricing,
        &accounts.div_mint,
        &mut accounts.token_reserve,
        &accounts.token_program,
    )
}

/// Takes `amount` lamports from the treasury into the base reserve and burns
/// the matching DIV out of the token reserve. The new lamports then settle
/// sell orders passed in `remaining_accounts`.
pub fn handle_base_deposit_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, HandleBaseDeposit<'info>>,
    amount: u64,
) -> Result<()> {
    validate_amount(amount)?;

    let accounts = ctx.accounts;
    // Priced before the burn changes the supply
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    let burned = pricing.to_token(amount)?;
    require!(
        burned <= accounts.token_reserve.amount,
        ErrorCode::InsufficientTokenReserve
    );

    system_program::transfer(
        CpiContext::new(
            accounts.system_program.to_account_info(),
            Transfer {
                from: accounts.treasury.to_account_info(),
                to: accounts.exchange.to_account_info(),
            },
        ),
        amount,
    )?;

    if burned > 0 {
        let div_mint_key = accounts.exchange.div_mint;
        let signer_seeds: &[&[&[u8]]] =
            &[&[EXCHANGE_SEED, div_mint_key.as_ref(), &[accounts.exchange.bump]]];

        token_interface::burn(
            CpiContext::new_with_signer(
                accounts.token_program.to_account_info(),
                Burn {
                    mint: accounts.div_mint.to_account_info(),
                    from: accounts.token_reserve.to_account_info(),
                    authority: accounts.exchange.to_account_info(),
                },
                signer_seeds,
            ),
            burned,
        )?;
        accounts.token_reserve.reload()?;
    }

    emit!(BaseDeposited { amount, burned });
    msg!("Received {} lamports from treasury, burned {} DIV", amount, burned);

    cascade_sell_fills(ctx.remaining_accounts, &mut accounts.exchange, &pricing, None)
}
