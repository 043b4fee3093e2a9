use super::compare::TradeComparator;
use super::constants::{MAX_HOPS, MIN_TRADE_PRECISION};
use super::estimate::TipEstimator;
use super::memo::Memo;
use super::pair::{all_currency_combinations, assemble_candidate_pairs, PairLookup};
use super::search::RouteSearch;
use super::selector::BestRouteSelector;
use super::state::{GasPriceSource, UserPreferences};
use super::types::{
    BestRoute, BribeEstimate, CurrencyAmount, MinTradeEstimate, Pair, PairLookupResult, Percent,
    Token,
};
use std::sync::Arc;

// External capabilities the derivations are computed from
#[derive(Clone)]
pub struct Collaborators {
    pub pairs: Arc<dyn PairLookup>,
    pub search: Arc<dyn RouteSearch>,
    pub comparator: Arc<dyn TradeComparator>,
    pub estimator: Arc<dyn TipEstimator>,
    pub gas_price: Arc<dyn GasPriceSource>,
    pub preferences: Arc<dyn UserPreferences>,
}

#[derive(Clone, Debug)]
pub struct HookSettings {
    pub bases: Vec<Token>,
    pub threshold: Percent,
    pub default_tip_margin_percent: u32,
}

type PairsMemo = Memo<Vec<PairLookupResult>, Vec<Pair>>;

/// Memoized swap derivations for a presentation layer.
///
/// Each derivation is recomputed only when one of its inputs differs from the
/// previous call. Absent inputs produce `NoRoute` / `None` without calling out.
pub struct SwapHooks {
    collaborators: Collaborators,
    settings: HookSettings,
    common_pairs: PairsMemo,
    exact_in_pairs: PairsMemo,
    exact_out_pairs: PairsMemo,
    min_trade_pairs: PairsMemo,
    exact_in: Memo<(Vec<Pair>, Option<CurrencyAmount>, Option<Token>, usize), BestRoute>,
    exact_out: Memo<(Vec<Pair>, Option<Token>, Option<CurrencyAmount>, usize), BestRoute>,
    min_trade: Memo<MinTradeKey, Option<MinTradeEstimate>>,
    tip: Memo<(Option<String>, String), Option<BribeEstimate>>,
}

type MinTradeKey = (
    Option<Token>,
    Option<Token>,
    Option<String>,
    Option<String>,
    Vec<Pair>,
);

fn lookup_common_pairs(
    collaborators: &Collaborators,
    settings: &HookSettings,
    memo: &mut PairsMemo,
    currency_a: Option<&Token>,
    currency_b: Option<&Token>,
) -> Vec<Pair> {
    let combinations = all_currency_combinations(currency_a, currency_b, &settings.bases);
    let results = collaborators.pairs.lookup_pairs(&combinations);
    memo.get_or_compute(results, |results| assemble_candidate_pairs(results))
}

impl SwapHooks {
    pub fn new(collaborators: Collaborators, settings: HookSettings) -> Self {
        Self {
            collaborators,
            settings,
            common_pairs: Memo::default(),
            exact_in_pairs: Memo::default(),
            exact_out_pairs: Memo::default(),
            min_trade_pairs: Memo::default(),
            exact_in: Memo::default(),
            exact_out: Memo::default(),
            min_trade: Memo::default(),
            tip: Memo::default(),
        }
    }

    pub fn common_pairs(&mut self, currency_a: Option<&Token>, currency_b: Option<&Token>) -> Vec<Pair> {
        lookup_common_pairs(
            &self.collaborators,
            &self.settings,
            &mut self.common_pairs,
            currency_a,
            currency_b,
        )
    }

    /// Best trade for an exact amount in to `currency_out`.
    pub fn trade_exact_in(
        &mut self,
        amount_in: Option<&CurrencyAmount>,
        currency_out: Option<&Token>,
        max_hops: Option<usize>,
    ) -> BestRoute {
        let pairs = lookup_common_pairs(
            &self.collaborators,
            &self.settings,
            &mut self.exact_in_pairs,
            amount_in.map(|amount| &amount.currency),
            currency_out,
        );
        let key = (
            pairs,
            amount_in.cloned(),
            currency_out.cloned(),
            max_hops.unwrap_or(MAX_HOPS),
        );

        let collaborators = &self.collaborators;
        let threshold = self.settings.threshold.clone();
        self.exact_in
            .get_or_compute(key, |(pairs, amount_in, currency_out, max_hops)| {
                BestRouteSelector::new(
                    collaborators.search.as_ref(),
                    collaborators.comparator.as_ref(),
                    threshold,
                )
                .best_trade_exact_in(pairs, amount_in.as_ref(), currency_out.as_ref(), *max_hops)
            })
    }

    /// Best trade from `currency_in` to an exact amount out.
    pub fn trade_exact_out(
        &mut self,
        currency_in: Option<&Token>,
        amount_out: Option<&CurrencyAmount>,
        max_hops: Option<usize>,
    ) -> BestRoute {
        let pairs = lookup_common_pairs(
            &self.collaborators,
            &self.settings,
            &mut self.exact_out_pairs,
            currency_in,
            amount_out.map(|amount| &amount.currency),
        );
        let key = (
            pairs,
            currency_in.cloned(),
            amount_out.cloned(),
            max_hops.unwrap_or(MAX_HOPS),
        );

        let collaborators = &self.collaborators;
        let threshold = self.settings.threshold.clone();
        self.exact_out
            .get_or_compute(key, |(pairs, currency_in, amount_out, max_hops)| {
                BestRouteSelector::new(
                    collaborators.search.as_ref(),
                    collaborators.comparator.as_ref(),
                    threshold,
                )
                .best_trade_exact_out(pairs, currency_in.as_ref(), amount_out.as_ref(), *max_hops)
            })
    }

    pub fn min_trade_amount(
        &mut self,
        currency_in: Option<&Token>,
        currency_out: Option<&Token>,
    ) -> Option<MinTradeEstimate> {
        let pairs = lookup_common_pairs(
            &self.collaborators,
            &self.settings,
            &mut self.min_trade_pairs,
            currency_in,
            currency_out,
        );
        let key = (
            currency_in.cloned(),
            currency_out.cloned(),
            self.gas_price_string(),
            self.user_tip_margin_string(),
            pairs,
        );

        let estimator = &self.collaborators.estimator;
        self.min_trade
            .get_or_compute(key, |(currency_in, currency_out, gas_price, tip_margin, pairs)| {
                let (Some(currency_in), Some(currency_out), Some(gas_price), Some(tip_margin)) =
                    (currency_in, currency_out, gas_price, tip_margin)
                else {
                    return None;
                };
                if pairs.is_empty() {
                    return None;
                }
                estimator.estimate_min_trade_amount(
                    pairs,
                    currency_in,
                    currency_out,
                    gas_price,
                    tip_margin,
                    MIN_TRADE_PRECISION,
                )
            })
    }

    pub fn miner_tip_estimate(&mut self) -> Option<BribeEstimate> {
        let key = (self.gas_price_string(), self.tip_margin_string());
        let estimator = &self.collaborators.estimator;
        self.tip.get_or_compute(key, |(gas_price, tip_margin)| {
            let gas_price = gas_price.as_ref()?;
            estimator.estimate_bribe(gas_price, tip_margin)
        })
    }

    fn gas_price_string(&self) -> Option<String> {
        self.collaborators
            .gas_price
            .latest_gas_price()
            .map(|wei| wei.to_string())
    }

    // Zero counts as unset
    fn user_tip_margin_string(&self) -> Option<String> {
        self.collaborators
            .preferences
            .tip_margin_percent()
            .filter(|percent| *percent != 0)
            .map(|percent| percent.to_string())
    }

    // An unset or zero preference falls back to the default margin
    fn tip_margin_string(&self) -> String {
        self.user_tip_margin_string()
            .unwrap_or_else(|| self.settings.default_tip_margin_percent.to_string())
    }
}
