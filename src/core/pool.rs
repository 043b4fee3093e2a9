use super::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use super::errors::RouteError;
use super::types::{CurrencyAmount, Pair, Token};
use num_bigint::BigUint;
use num_traits::{One, Zero};

impl Pair {
    // Reserves may be given in either order, they are stored sorted by token address
    pub fn new(
        address: &str,
        amount_a: CurrencyAmount,
        amount_b: CurrencyAmount,
    ) -> Result<Self, RouteError> {
        if amount_a.currency == amount_b.currency {
            return Err(RouteError::IdenticalTokens(address.to_string()));
        }
        let (first, second) = if amount_a.currency.sorts_before(&amount_b.currency) {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        Ok(Pair {
            address: address.trim().to_lowercase(),
            token0: first.currency,
            token1: second.currency,
            reserve0: first.raw,
            reserve1: second.raw,
        })
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    pub fn other_token(&self, token: &Token) -> &Token {
        if self.token0 == *token {
            &self.token1
        } else {
            &self.token0
        }
    }

    pub fn reserve_of(&self, token: &Token) -> Result<&BigUint, RouteError> {
        if self.token0 == *token {
            Ok(&self.reserve0)
        } else if self.token1 == *token {
            Ok(&self.reserve1)
        } else {
            Err(RouteError::TokenNotInPair {
                token: token.address.clone(),
                pair: self.address.clone(),
            })
        }
    }

    /// Amount received for selling `amount_in` into this pair, after the 0.3% fee.
    pub fn get_output_amount(&self, amount_in: &CurrencyAmount) -> Result<CurrencyAmount, RouteError> {
        let reserve_in = self.reserve_of(&amount_in.currency)?;
        let token_out = self.other_token(&amount_in.currency);
        let reserve_out = self.reserve_of(token_out)?;
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(RouteError::InsufficientReserves(self.address.clone()));
        }

        let amount_in_with_fee = &amount_in.raw * BigUint::from(FEE_NUMERATOR);
        let numerator = &amount_in_with_fee * reserve_out;
        let denominator = reserve_in * BigUint::from(FEE_DENOMINATOR) + &amount_in_with_fee;
        let output = numerator / denominator;
        if output.is_zero() {
            return Err(RouteError::InsufficientInputAmount(self.address.clone()));
        }
        Ok(CurrencyAmount::new(token_out.clone(), output))
    }

    /// Amount that must be sold into this pair to receive exactly `amount_out`, rounded up.
    pub fn get_input_amount(&self, amount_out: &CurrencyAmount) -> Result<CurrencyAmount, RouteError> {
        let reserve_out = self.reserve_of(&amount_out.currency)?;
        let token_in = self.other_token(&amount_out.currency);
        let reserve_in = self.reserve_of(token_in)?;
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out.raw >= *reserve_out {
            return Err(RouteError::InsufficientReserves(self.address.clone()));
        }

        let numerator = reserve_in * &amount_out.raw * BigUint::from(FEE_DENOMINATOR);
        let denominator = (reserve_out - &amount_out.raw) * BigUint::from(FEE_NUMERATOR);
        Ok(CurrencyAmount::new(
            token_in.clone(),
            numerator / denominator + BigUint::one(),
        ))
    }
}
