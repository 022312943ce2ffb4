use anchor_lang::prelude::*;
use crate::constants::TREASURY_POOL_SIZE_OFFSET;
use crate::errors::ErrorCode;

/// Reads the treasury's total pool size (idle + staked + in-transit lamports).
/// The pool account belongs to the treasury program, so only its layout is
/// known here: an 8-byte discriminator followed by the u64.
pub fn read_total_pool_size(treasury_pool: &AccountInfo) -> Result<u64> {
    let data = treasury_pool.try_borrow_data()?;
    total_pool_size_from_bytes(&data)
}

pub fn total_pool_size_from_bytes(data: &[u8]) -> Result<u64> {
    let end = TREASURY_POOL_SIZE_OFFSET + 8;
    let bytes: [u8; 8] = data
        .get(TREASURY_POOL_SIZE_OFFSET..end)
        .and_then(|slice| slice.try_into().ok())
        .ok_or(ErrorCode::InvalidTreasuryPool)?;

    Ok(u64::from_le_bytes(bytes))
}
