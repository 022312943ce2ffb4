use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Order amount is below the minimum order size")]
    BelowMinimumOrderSize,

    #[msg("Minimum order amount must be > 0")]
    InvalidMinimumOrderAmount,

    #[msg("Address must not be the default key")]
    InvalidAddress,

    #[msg("Order belongs to the other side of the book")]
    InvalidOrderSide,

    #[msg("Invalid mint for this exchange")]
    InvalidMint,

    #[msg("Treasury pool account has an unexpected layout")]
    InvalidTreasuryPool,

    #[msg("Cascade accounts must be (order, payout account) pairs for this exchange")]
    InvalidCascadeAccounts,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Order does not belong to this exchange")]
    InvalidOrder,

    #[msg("Order is already finished")]
    OrderFinished,

    #[msg("Fill exceeds the order's remaining amount")]
    FillExceedsRemaining,

    #[msg("Base reserve is too small")]
    InsufficientBaseReserve,

    #[msg("Token reserve is too small")]
    InsufficientTokenReserve,

    #[msg("Token allowance for the exchange is too small")]
    InsufficientAllowance,

    #[msg("No payment due")]
    NoPaymentDue,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Token price rounds down to zero")]
    ZeroPrice,
}
