use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::EXCHANGE_SEED;
use crate::errors::ErrorCode;
use crate::events::{BuyOrderFilled, SellOrderFilled};
use crate::state::exchange::{Exchange, Fill};
use crate::state::order::{Order, Side};
use crate::state::payment::Payment;
use crate::utils::pricing::Pricing;

/// Lamports of the exchange account that back sell orders.
pub fn base_reserve_of(exchange: &Account<Exchange>) -> Result<u64> {
    let info = exchange.to_account_info();
    let rent_exempt_minimum = Rent::get()?.minimum_balance(info.data_len());
    Ok(exchange.base_reserve(info.lamports(), rent_exempt_minimum))
}

/// Moves DIV out of the token reserve, signed by the exchange PDA.
pub fn transfer_from_token_reserve<'info>(
    exchange: &Account<'info, Exchange>,
    div_mint: &InterfaceAccount<'info, Mint>,
    token_reserve: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    token_program: &Interface<'info, TokenInterface>,
    amount: u64,
) -> Result<()> {
    let div_mint_key = exchange.div_mint;
    let signer_seeds: &[&[&[u8]]] = &[&[EXCHANGE_SEED, div_mint_key.as_ref(), &[exchange.bump]]];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: token_reserve.to_account_info(),
                mint: div_mint.to_account_info(),
                to: to.to_account_info(),
                authority: exchange.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        div_mint.decimals,
    )
}

/// Fills a buy order and pays the buyer in DIV from the token reserve.
pub fn settle_buy_fill<'info>(
    exchange: &mut Account<'info, Exchange>,
    order: &mut Account<'info, Order>,
    pricing: &Pricing,
    div_mint: &InterfaceAccount<'info, Mint>,
    token_reserve: &mut InterfaceAccount<'info, TokenAccount>,
    buyer_token_account: &InterfaceAccount<'info, TokenAccount>,
    token_program: &Interface<'info, TokenInterface>,
) -> Result<Option<Fill>> {
    let fill = exchange.fill_buy_order(order, pricing, token_reserve.amount)?;

    if let Some(fill) = fill {
        if fill.payout > 0 {
            transfer_from_token_reserve(
                exchange,
                div_mint,
                token_reserve,
                buyer_token_account,
                token_program,
                fill.payout,
            )?;
            token_reserve.reload()?;
        }

        emit!(BuyOrderFilled {
            index: fill.index,
            amount_filled: fill.amount_filled,
        });
        msg!(
            "Buy order {} filled {} lamports for {} DIV",
            fill.index,
            fill.amount,
            fill.payout
        );
    }

    Ok(fill)
}

/// Fills a sell order and credits the seller's lamports to the payment ledger.
pub fn settle_sell_fill<'info>(
    exchange: &mut Account<'info, Exchange>,
    order: &mut Account<'info, Order>,
    pricing: &Pricing,
    payment: &mut Account<'info, Payment>,
) -> Result<Option<Fill>> {
    let base_reserve = base_reserve_of(exchange)?;
    let fill = exchange.fill_sell_order(order, pricing, base_reserve)?;

    if let Some(fill) = fill {
        exchange.credit_payment(payment, fill.payout)?;

        emit!(SellOrderFilled {
            index: fill.index,
            amount_filled: fill.amount_filled,
        });
        msg!(
            "Sell order {} filled {} DIV for {} lamports",
            fill.index,
            fill.amount,
            fill.payout
        );
    }

    Ok(fill)
}

/// A buy cascade pair must be a buy order of this exchange and a DIV account
/// owned by its sender.
pub fn check_buy_pair(
    order: &Order,
    token_owner: &Pubkey,
    token_mint: &Pubkey,
    exchange_key: &Pubkey,
    div_mint: &Pubkey,
) -> Result<()> {
    require!(
        order.exchange == *exchange_key && order.side == Side::Buy,
        ErrorCode::InvalidCascadeAccounts
    );
    require!(
        *token_owner == order.sender && *token_mint == *div_mint,
        ErrorCode::InvalidCascadeAccounts
    );
    Ok(())
}

/// A sell cascade pair must be a sell order of this exchange and its sender's
/// payment account. `held_payment` is a payment the instruction already has
/// loaded as a named account; a second copy of it would be overwritten by the
/// named one on exit, so it cannot appear in a pair.
pub fn check_sell_pair(
    order: &Order,
    payment: &Payment,
    payment_key: &Pubkey,
    exchange_key: &Pubkey,
    held_payment: Option<&Pubkey>,
) -> Result<()> {
    require!(
        held_payment != Some(payment_key),
        ErrorCode::InvalidCascadeAccounts
    );
    require!(
        order.exchange == *exchange_key && order.side == Side::Sell,
        ErrorCode::InvalidCascadeAccounts
    );
    require!(
        payment.exchange == *exchange_key && payment.payee == order.sender,
        ErrorCode::InvalidCascadeAccounts
    );
    Ok(())
}

/// Fills queued buy orders passed as `(order, buyer DIV account)` pairs.
/// Each order gets what its watermark position allows; finished ones are skipped.
pub fn cascade_buy_fills<'info>(
    remaining_accounts: &'info [AccountInfo<'info>],
    exchange: &mut Account<'info, Exchange>,
    pricing: &Pricing,
    div_mint: &InterfaceAccount<'info, Mint>,
    token_reserve: &mut InterfaceAccount<'info, TokenAccount>,
    token_program: &Interface<'info, TokenInterface>,
) -> Result<()> {
    require!(
        remaining_accounts.len() % 2 == 0,
        ErrorCode::InvalidCascadeAccounts
    );
    let exchange_key = exchange.key();

    for pair in remaining_accounts.chunks_exact(2) {
        let mut order = Account::<Order>::try_from(&pair[0])?;
        let buyer_token_account = InterfaceAccount::<TokenAccount>::try_from(&pair[1])?;

        check_buy_pair(
            &order,
            &buyer_token_account.owner,
            &buyer_token_account.mint,
            &exchange_key,
            &exchange.div_mint,
        )?;

        if order.finished {
            continue;
        }

        settle_buy_fill(
            exchange,
            &mut order,
            pricing,
            div_mint,
            token_reserve,
            &buyer_token_account,
            token_program,
        )?;
        order.exit(&crate::ID)?;
    }

    Ok(())
}

/// Fills queued sell orders passed as `(order, seller payment)` pairs.
/// `held_payment` names a payment account the caller holds itself.
pub fn cascade_sell_fills<'info>(
    remaining_accounts: &'info [AccountInfo<'info>],
    exchange: &mut Account<'info, Exchange>,
    pricing: &Pricing,
    held_payment: Option<&Pubkey>,
) -> Result<()> {
    require!(
        remaining_accounts.len() % 2 == 0,
        ErrorCode::InvalidCascadeAccounts
    );
    let exchange_key = exchange.key();

    for pair in remaining_accounts.chunks_exact(2) {
        let mut order = Account::<Order>::try_from(&pair[0])?;
        let mut payment = Account::<Payment>::try_from(&pair[1])?;

        check_sell_pair(&order, &payment, pair[1].key, &exchange_key, held_payment)?;

        if order.finished {
            continue;
        }

        settle_sell_fill(exchange, &mut order, pricing, &mut payment)?;
        order.exit(&crate::ID)?;
        payment.exit(&crate::ID)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange_key() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn div_mint() -> Pubkey {
        Pubkey::new_from_array([2; 32])
    }

    fn seller() -> Pubkey {
        Pubkey::new_from_array([3; 32])
    }

    fn order(side: Side) -> Order {
        Order {
            exchange: exchange_key(),
            side,
            index: 0,
            sender: seller(),
            amount: 100,
            cumulative_amount: 100,
            amount_filled: 0,
            amount_canceled: 0,
            finished: false,
            bump: 255,
            created_at: 0,
        }
    }

    fn payment(payee: Pubkey) -> Payment {
        Payment {
            exchange: exchange_key(),
            payee,
            balance: 0,
            bump: 255,
        }
    }

    fn assert_rejected(result: Result<()>) {
        let expected: anchor_lang::error::Error = ErrorCode::InvalidCascadeAccounts.into();
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn sell_pair_accepts_the_senders_payment() {
        let payment_key = Pubkey::new_from_array([4; 32]);
        let buyer_payment = Pubkey::new_from_array([5; 32]);

        check_sell_pair(&order(Side::Sell), &payment(seller()), &payment_key, &exchange_key(), None)
            .unwrap();
        check_sell_pair(
            &order(Side::Sell),
            &payment(seller()),
            &payment_key,
            &exchange_key(),
            Some(&buyer_payment),
        )
        .unwrap();
    }

    #[test]
    fn sell_pair_rejects_the_held_payment() {
        // A buyer cascading into their own sell order passes the payment the
        // instruction already credits through its named account.
        let payment_key = Pubkey::new_from_array([4; 32]);

        assert_rejected(check_sell_pair(
            &order(Side::Sell),
            &payment(seller()),
            &payment_key,
            &exchange_key(),
            Some(&payment_key),
        ));
    }

    #[test]
    fn sell_pair_rejects_foreign_accounts() {
        let payment_key = Pubkey::new_from_array([4; 32]);
        let stranger = Pubkey::new_from_array([9; 32]);

        assert_rejected(check_sell_pair(
            &order(Side::Sell),
            &payment(stranger),
            &payment_key,
            &exchange_key(),
            None,
        ));
        assert_rejected(check_sell_pair(
            &order(Side::Buy),
            &payment(seller()),
            &payment_key,
            &exchange_key(),
            None,
        ));

        let mut other_exchange = payment(seller());
        other_exchange.exchange = stranger;
        assert_rejected(check_sell_pair(
            &order(Side::Sell),
            &other_exchange,
            &payment_key,
            &exchange_key(),
            None,
        ));
    }

    #[test]
    fn buy_pair_needs_the_senders_div_account() {
        let buy = order(Side::Buy);
        let stranger = Pubkey::new_from_array([9; 32]);

        check_buy_pair(&buy, &seller(), &div_mint(), &exchange_key(), &div_mint()).unwrap();
        assert_rejected(check_buy_pair(&buy, &stranger, &div_mint(), &exchange_key(), &div_mint()));
        assert_rejected(check_buy_pair(&buy, &seller(), &stranger, &exchange_key(), &div_mint()));
        assert_rejected(check_buy_pair(
            &order(Side::Sell),
            &seller(),
            &div_mint(),
            &exchange_key(),
            &div_mint(),
        ));
    }
}
