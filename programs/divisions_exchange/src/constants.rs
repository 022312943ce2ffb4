// PDA seeds and program-wide constants.

pub const EXCHANGE_SEED: &[u8] = b"exchange";
pub const TOKEN_RESERVE_SEED: &[u8] = b"token_reserve";
pub const BUY_ORDER_SEED: &[u8] = b"buy_order";
pub const SELL_ORDER_SEED: &[u8] = b"sell_order";
pub const PAYMENT_SEED: &[u8] = b"payment";

/// `extra_data` tag for `receive_approval` that fills the new sell order
/// in the same instruction.
pub const FILL_ORDER_TAG: &[u8] = b"fill";

/// Byte offset of `total_pool_size` (u64, little-endian) inside the treasury
/// pool account: right after the 8-byte Anchor discriminator.
pub const TREASURY_POOL_SIZE_OFFSET: usize = 8;
