use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::{EXCHANGE_SEED, FILL_ORDER_TAG, PAYMENT_SEED, SELL_ORDER_SEED};
use crate::errors::ErrorCode;
use crate::events::SellOrderPlaced;
use crate::instructions::settle::{cascade_buy_fills, settle_sell_fill};
use crate::state::exchange::Exchange;
use crate::state::order::{Order, Side};
use crate::state::payment::Payment;
use crate::utils::pricing::Pricing;

#[derive(Accounts)]
pub struct PlaceSellOrder<'info> {
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
            SELL_ORDER_SEED,
            exchange.key().as_ref(),
            exchange.sell_orders_length.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub order: Account<'info, Order>,

    /// Receives lamports when the order is filled
    #[account(
        init_if_needed,
        payer = user,
        space = Payment::SIZE,
        seeds = [PAYMENT_SEED, exchange.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub payment: Account<'info, Payment>,

    /// DIV being escrowed
    #[account(
        mut,
        token::mint = div_mint,
        token::authority = user
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> PlaceSellOrder<'info> {
    /// Records the order and escrows its DIV in the token reserve. With
    /// `from_allowance` the exchange pulls the DIV through the delegate
    /// allowance the seller granted it, instead of the seller signing the transfer.
    fn place(
        &mut self,
        amount: u64,
        order_bump: u8,
        payment_bump: u8,
        from_allowance: bool,
    ) -> Result<()> {
        let exchange_key = self.exchange.key();
        let user_key = self.user.key();

        self.exchange.append_order(
            &mut self.order,
            exchange_key,
            Side::Sell,
            user_key,
            amount,
            order_bump,
            Clock::get()?.unix_timestamp,
        )?;
        self.payment.open(exchange_key, user_key, payment_bump);

        let transfer = TransferChecked {
            from: self.user_token_account.to_account_info(),
            mint: self.div_mint.to_account_info(),
            to: self.token_reserve.to_account_info(),
            authority: if from_allowance {
                self.exchange.to_account_info()
            } else {
                self.user.to_account_info()
            },
        };

        if from_allowance {
            require!(
                self.user_token_account.delegate == COption::Some(exchange_key)
                    && self.user_token_account.delegated_amount >= amount,
                ErrorCode::InsufficientAllowance
            );

            let div_mint_key = self.exchange.div_mint;
            let signer_seeds: &[&[&[u8]]] =
                &[&[EXCHANGE_SEED, div_mint_key.as_ref(), &[self.exchange.bump]]];

            token_interface::transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    transfer,
                    signer_seeds,
                ),
                amount,
                self.div_mint.decimals,
            )?;
        } else {
            token_interface::transfer_checked(
                CpiContext::new(self.token_program.to_account_info(), transfer),
                amount,
                self.div_mint.decimals,
            )?;
        }
        self.token_reserve.reload()?;

        emit!(SellOrderPlaced {
            index: self.order.index,
            sender: user_key,
            amount,
        });

        msg!(
            "Sell order {} placed: {} DIV (cumulative {})",
            self.order.index,
            amount,
            self.order.cumulative_amount
        );

        Ok(())
    }
}

/// Fills the freshly placed sell order from the base reserve, then lets the
/// escrowed DIV settle buy orders passed in `remaining_accounts`.
fn fill_placed_order<'info>(
    accounts: &mut PlaceSellOrder<'info>,
    remaining_accounts: &'info [AccountInfo<'info>],
) -> Result<()> {
    let pricing = Pricing::load(&accounts.treasury_pool, &accounts.div_mint)?;

    settle_sell_fill(
        &mut accounts.exchange,
        &mut accounts.order,
        &pricing,
        &mut accounts.payment,
    )?;

    cascade_buy_fills(
        remaining_accounts,
        &mut accounts.exchange,
        &pricing,
        &accounts.div_mint,
        &mut accounts.token_reserve,
        &accounts.token_program,
    )
}

pub fn handler(ctx: Context<PlaceSellOrder>, amount: u64) -> Result<()> {
    ctx.accounts
        .place(amount, ctx.bumps.order, ctx.bumps.payment, false)
}

pub fn place_and_fill_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, PlaceSellOrder<'info>>,
    amount: u64,
) -> Result<()> {
    ctx.accounts
        .place(amount, ctx.bumps.order, ctx.bumps.payment, false)?;
    fill_placed_order(ctx.accounts, ctx.remaining_accounts)
}

/// Approve-and-call entry: the seller has approved the exchange PDA as
/// delegate for at least `amount` DIV. `extra_data == FILL_ORDER_TAG` also
/// fills the order; any other payload only places it.
pub fn receive_approval_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, PlaceSellOrder<'info>>,
    amount: u64,
    extra_data: Vec<u8>,
) -> Result<()> {
    ctx.accounts
        .place(amount, ctx.bumps.order, ctx.bumps.payment, true)?;

    if extra_data.as_slice() == FILL_ORDER_TAG {
        fill_placed_order(ctx.accounts, ctx.remaining_accounts)?;
    }

    Ok(())
}
