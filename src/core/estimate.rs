use super::search::RouteSearch;
use super::types::{BestTradeOptions, BribeEstimate, CurrencyAmount, MinTradeEstimate, Pair, Token};
use num_bigint::BigUint;
use num_traits::Zero;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Estimates the block builder tip for a swap and the smallest trade worth tipping for.
///
/// Gas price and tip margin are passed as decimal strings; an implementation
/// answers `None` when it cannot make sense of them.
pub trait TipEstimator: Send + Sync {
    fn estimate_bribe(&self, gas_price: &str, tip_margin_percent: &str) -> Option<BribeEstimate>;

    fn estimate_min_trade_amount(
        &self,
        pairs: &[Pair],
        currency_in: &Token,
        currency_out: &Token,
        gas_price_to_beat_wei: &str,
        tip_margin_percent: &str,
        precision: u32,
    ) -> Option<MinTradeEstimate>;
}

pub struct GasTipEstimator {
    search: Arc<dyn RouteSearch>,
    wrapped_native: Token,
    swap_gas_units: u64,
    max_hops: usize,
}

impl GasTipEstimator {
    pub fn new(
        search: Arc<dyn RouteSearch>,
        wrapped_native: Token,
        swap_gas_units: u64,
        max_hops: usize,
    ) -> Self {
        Self {
            search,
            wrapped_native,
            swap_gas_units,
            max_hops,
        }
    }

    fn options(&self) -> BestTradeOptions {
        BestTradeOptions {
            max_hops: self.max_hops,
            max_num_results: 1,
        }
    }

    // Price of `tip` wrapped native, paid in `currency_in`
    fn tip_in_currency(&self, pairs: &[Pair], currency_in: &Token, tip: &BigUint) -> Option<BigUint> {
        if *currency_in == self.wrapped_native {
            return Some(tip.clone());
        }
        let tip_amount = CurrencyAmount::new(self.wrapped_native.clone(), tip.clone());
        self.search
            .best_trade_exact_out(pairs, currency_in, &tip_amount, self.options())
            .into_iter()
            .next()
            .map(|trade| trade.input_amount.raw)
    }
}

impl TipEstimator for GasTipEstimator {
    fn estimate_bribe(&self, gas_price: &str, tip_margin_percent: &str) -> Option<BribeEstimate> {
        let gas_price = BigUint::from_str(gas_price.trim()).ok()?;
        let tip_margin_percent = u32::from_str(tip_margin_percent.trim()).ok()?;

        let min_bribe = &gas_price * BigUint::from(self.swap_gas_units);
        let margin = BigUint::from(100 + u64::from(tip_margin_percent));
        let max_bribe = &min_bribe * margin / BigUint::from(100u32);
        let mean_bribe = (&min_bribe + &max_bribe) / BigUint::from(2u32);

        Some(BribeEstimate {
            gas_price,
            tip_margin_percent,
            min_bribe,
            mean_bribe,
            max_bribe,
        })
    }

    fn estimate_min_trade_amount(
        &self,
        pairs: &[Pair],
        currency_in: &Token,
        currency_out: &Token,
        gas_price_to_beat_wei: &str,
        tip_margin_percent: &str,
        precision: u32,
    ) -> Option<MinTradeEstimate> {
        if precision == 0 || currency_in == currency_out {
            return None;
        }
        let bribe = self.estimate_bribe(gas_price_to_beat_wei, tip_margin_percent)?;
        if bribe.max_bribe.is_zero() {
            return None;
        }

        // The tip may be at most `precision` percent of the trade
        let tip_in = self.tip_in_currency(pairs, currency_in, &bribe.max_bribe)?;
        let min_amount_in = CurrencyAmount::new(
            currency_in.clone(),
            tip_in * BigUint::from(100u32) / BigUint::from(precision),
        );

        let trade = self
            .search
            .best_trade_exact_in(pairs, &min_amount_in, currency_out, self.options())
            .into_iter()
            .next()?;

        debug!(
            currency_in = %currency_in.symbol,
            currency_out = %currency_out.symbol,
            min_amount_in = %min_amount_in.raw,
            min_amount_out = %trade.output_amount.raw,
            "estimated minimum trade amount"
        );
        Some(MinTradeEstimate {
            min_amount_in,
            min_amount_out: trade.output_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::ConstantProductSearch;

    fn weth() -> Token {
        Token::new("0x0c", "WETH", 18)
    }

    fn estimator() -> GasTipEstimator {
        GasTipEstimator::new(Arc::new(ConstantProductSearch), weth(), 100_000, 3)
    }

    fn pair(address: &str, a: &Token, ra: u64, b: &Token, rb: u64) -> Pair {
        Pair::new(
            address,
            CurrencyAmount::new(a.clone(), BigUint::from(ra)),
            CurrencyAmount::new(b.clone(), BigUint::from(rb)),
        )
        .unwrap()
    }

    #[test]
    fn bribe_scales_with_gas_price_and_margin() {
        let estimate = estimator().estimate_bribe("20", "10").unwrap();
        assert_eq!(estimate.min_bribe, BigUint::from(2_000_000u64));
        assert_eq!(estimate.max_bribe, BigUint::from(2_200_000u64));
        assert_eq!(estimate.mean_bribe, BigUint::from(2_100_000u64));
        assert_eq!(estimate.tip_margin_percent, 10);
    }

    #[test]
    fn unparseable_inputs_give_no_bribe() {
        assert!(estimator().estimate_bribe("twenty", "10").is_none());
        assert!(estimator().estimate_bribe("20", "-1").is_none());
    }

    #[test]
    fn min_trade_from_wrapped_native() {
        let usdc = Token::new("0x0d", "USDC", 6);
        let pairs = vec![pair("0xcd", &weth(), 10u64.pow(15), &usdc, 10u64.pow(15))];
        let estimate = estimator()
            .estimate_min_trade_amount(&pairs, &weth(), &usdc, "10", "0", 1)
            .unwrap();
        // tip = 10 * 100_000 = 1_000_000 wei, trade must be 100x the tip
        assert_eq!(estimate.min_amount_in.raw, BigUint::from(100_000_000u64));
        assert_eq!(estimate.min_amount_in.currency, weth());
        assert_eq!(estimate.min_amount_out.currency, usdc);
        assert!(estimate.min_amount_out.raw > BigUint::zero());
    }

    #[test]
    fn min_trade_prices_tip_through_route() {
        let usdc = Token::new("0x0d", "USDC", 6);
        let dai = Token::new("0x0e", "DAI", 18);
        let pairs = vec![
            pair("0xcd", &weth(), 10u64.pow(15), &usdc, 2 * 10u64.pow(15)),
            pair("0xde", &usdc, 10u64.pow(15), &dai, 10u64.pow(15)),
        ];
        let estimate = estimator()
            .estimate_min_trade_amount(&pairs, &usdc, &dai, "10", "0", 1)
            .unwrap();
        // roughly two USDC per wrapped native unit
        assert!(estimate.min_amount_in.raw > BigUint::from(200_000_000u64));
        assert!(estimate.min_amount_in.raw < BigUint::from(201_000_000u64));
        assert_eq!(estimate.min_amount_out.currency, dai);
    }

    #[test]
    fn min_trade_without_tip_route_is_none() {
        let usdc = Token::new("0x0d", "USDC", 6);
        let dai = Token::new("0x0e", "DAI", 18);
        let pairs = vec![pair("0xde", &usdc, 10u64.pow(15), &dai, 10u64.pow(15))];
        assert!(estimator()
            .estimate_min_trade_amount(&pairs, &usdc, &dai, "10", "0", 1)
            .is_none());
    }
}
