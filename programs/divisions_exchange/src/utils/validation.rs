use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Validates that an amount is greater than zero
pub fn validate_amount(amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    Ok(())
}

/// Validates an order amount against the side's minimum order size
pub fn validate_order_amount(amount: u64, minimum: u64) -> Result<()> {
    validate_amount(amount)?;
    require!(amount >= minimum, ErrorCode::BelowMinimumOrderSize);
    Ok(())
}

/// Validates a new minimum order size
pub fn validate_minimum_order_amount(amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidMinimumOrderAmount);
    Ok(())
}

/// Validates that a configured address is set
pub fn validate_address(address: &Pubkey) -> Result<()> {
    require!(*address != Pubkey::default(), ErrorCode::InvalidAddress);
    Ok(())
}
