use anchor_lang::prelude::*;

/// Lamports owed to one payee (fill proceeds and buy refunds), released only
/// when the payee withdraws.
#[account]
pub struct Payment {
    pub exchange: Pubkey,
    pub payee: Pubkey,
    pub balance: u64,
    pub bump: u8,
}

impl Payment {
    pub const SIZE: usize = 8 + 32 + 32 + 8 + 1;

    /// Fills in the owner fields of a freshly created payment account.
    pub fn open(&mut self, exchange: Pubkey, payee: Pubkey, bump: u8) {
        if self.payee == Pubkey::default() {
            self.exchange = exchange;
            self.payee = payee;
            self.balance = 0;
            self.bump = bump;
        }
    }
}
