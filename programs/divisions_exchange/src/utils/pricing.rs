use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::errors::ErrorCode;
use crate::utils::math::mul_div_floor;
use crate::utils::treasury::read_total_pool_size;

/// Snapshot of the two oracle reads that price DIV: the treasury NAV (in
/// lamports) and the DIV supply, plus the mint's fixed-point scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pricing {
    pub nav: u64,
    pub supply: u64,
    pub scale: u64,
}

impl Pricing {
    pub fn new(nav: u64, supply: u64, decimals: u8) -> Result<Self> {
        let scale = 10_u64
            .checked_pow(decimals as u32)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(Self { nav, supply, scale })
    }

    /// Reads the NAV from the treasury pool account and the supply from the DIV mint.
    pub fn load(treasury_pool: &AccountInfo, div_mint: &Mint) -> Result<Self> {
        let nav = read_total_pool_size(treasury_pool)?;
        Self::new(nav, div_mint.supply, div_mint.decimals)
    }

    /// Lamports per whole DIV, scaled by `scale`.
    /// Par (`scale`) while the pool or the supply is empty.
    pub fn price(&self) -> Result<u64> {
        if self.nav == 0 || self.supply == 0 {
            return Ok(self.scale);
        }

        mul_div_floor(self.nav, self.scale, self.supply)
    }

    /// Lamports to DIV, rounding down.
    pub fn to_token(&self, base_amount: u64) -> Result<u64> {
        let price = self.price()?;
        require!(price > 0, ErrorCode::ZeroPrice);
        mul_div_floor(base_amount, self.scale, price)
    }

    /// DIV to lamports, rounding down.
    pub fn to_base(&self, token_amount: u64) -> Result<u64> {
        let price = self.price()?;
        mul_div_floor(token_amount, price, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    #[test]
    fn price_is_par_when_pool_is_empty() {
        let pricing = Pricing::new(0, 0, 9).unwrap();
        assert_eq!(pricing.price().unwrap(), SOL);

        let no_supply = Pricing::new(5 * SOL, 0, 9).unwrap();
        assert_eq!(no_supply.price().unwrap(), SOL);

        let no_nav = Pricing::new(0, 5 * SOL, 9).unwrap();
        assert_eq!(no_nav.price().unwrap(), SOL);
    }

    #[test]
    fn price_tracks_nav_per_token() {
        // 6 SOL backing 4 DIV -> 1.5 SOL per DIV
        let pricing = Pricing::new(6 * SOL, 4 * SOL, 9).unwrap();
        assert_eq!(pricing.price().unwrap(), 1_500_000_000);
        assert_eq!(pricing.to_token(3 * SOL).unwrap(), 2 * SOL);
        assert_eq!(pricing.to_base(2 * SOL).unwrap(), 3 * SOL);
    }

    #[test]
    fn conversions_round_down() {
        // 1 SOL backing 3 DIV -> price 333_333_333
        let pricing = Pricing::new(SOL, 3 * SOL, 9).unwrap();
        assert_eq!(pricing.price().unwrap(), 333_333_333);

        let tokens = pricing.to_token(SOL).unwrap();
        assert_eq!(tokens, 3_000_000_003);
        let back = pricing.to_base(tokens).unwrap();
        assert!(back <= SOL);
    }

    #[test]
    fn zero_price_is_rejected() {
        // 1 lamport of NAV for a huge supply rounds the price to zero
        let pricing = Pricing::new(1, u64::MAX, 0).unwrap();
        assert_eq!(pricing.price().unwrap(), 0);
        assert!(pricing.to_token(1).is_err());
        assert_eq!(pricing.to_base(1).unwrap(), 0);
    }

    #[test]
    fn scale_follows_decimals() {
        assert_eq!(Pricing::new(0, 0, 0).unwrap().scale, 1);
        assert_eq!(Pricing::new(0, 0, 6).unwrap().scale, 1_000_000);
        assert!(Pricing::new(0, 0, 20).is_err());
    }
}
