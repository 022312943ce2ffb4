use anchor_lang::prelude::*;

#[event]
pub struct ExchangeInitialized {
    pub exchange: Pubkey,
    pub authority: Pubkey,
    pub div_mint: Pubkey,
    pub min_buy_order_amount: u64,
    pub min_sell_order_amount: u64,
}

#[event]
pub struct BuyOrderPlaced {
    pub index: u64,
    pub sender: Pubkey,
    pub amount: u64,
}

#[event]
pub struct SellOrderPlaced {
    pub index: u64,
    pub sender: Pubkey,
    pub amount: u64,
}

/// `amount_filled` is the order's new cumulative filled amount.
#[event]
pub struct BuyOrderFilled {
    pub index: u64,
    pub amount_filled: u64,
}

#[event]
pub struct SellOrderFilled {
    pub index: u64,
    pub amount_filled: u64,
}

#[event]
pub struct BuyOrderCanceled {
    pub index: u64,
    pub amount_canceled: u64,
}

#[event]
pub struct SellOrderCanceled {
    pub index: u64,
    pub amount_canceled: u64,
}

#[event]
pub struct PaymentWithdrawn {
    pub payee: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TransferredToTreasury {
    pub amount: u64,
    pub minted: u64,
}

#[event]
pub struct BaseDeposited {
    pub amount: u64,
    pub burned: u64,
}

#[event]
pub struct MinBuyOrderAmountSet {
    pub amount: u64,
}

#[event]
pub struct MinSellOrderAmountSet {
    pub amount: u64,
}

#[event]
pub struct StakeManagerSet {
    pub stake_manager: Pubkey,
}

#[event]
pub struct TreasurySet {
    pub treasury: Pubkey,
    pub treasury_pool: Pubkey,
}

#[event]
pub struct AuthorityTransferred {
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
}
