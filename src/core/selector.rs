use super::compare::TradeComparator;
use super::search::RouteSearch;
use super::types::{BestRoute, BestTradeOptions, CurrencyAmount, Pair, Percent, Token, Trade};
use tracing::{debug, info};

/// Picks one best route across hop counts `1..=max_hops`.
///
/// The route search is asked for its single best route at each hop count and the
/// comparator folds those answers. Since hop counts are visited in ascending order,
/// a longer route only takes over when it beats the holder by more than `threshold`.
pub struct BestRouteSelector<'a> {
    search: &'a dyn RouteSearch,
    comparator: &'a dyn TradeComparator,
    threshold: Percent,
}

impl<'a> BestRouteSelector<'a> {
    pub fn new(
        search: &'a dyn RouteSearch,
        comparator: &'a dyn TradeComparator,
        threshold: Percent,
    ) -> Self {
        Self {
            search,
            comparator,
            threshold,
        }
    }

    pub fn best_trade_exact_in(
        &self,
        pairs: &[Pair],
        amount_in: Option<&CurrencyAmount>,
        currency_out: Option<&Token>,
        max_hops: usize,
    ) -> BestRoute {
        let (Some(amount_in), Some(currency_out)) = (amount_in, currency_out) else {
            return BestRoute::NoRoute;
        };
        if pairs.is_empty() {
            return BestRoute::NoRoute;
        }

        self.fold_hops(max_hops, |hops| {
            self.search
                .best_trade_exact_in(pairs, amount_in, currency_out, single_result(hops))
                .into_iter()
                .next()
        })
    }

    pub fn best_trade_exact_out(
        &self,
        pairs: &[Pair],
        currency_in: Option<&Token>,
        amount_out: Option<&CurrencyAmount>,
        max_hops: usize,
    ) -> BestRoute {
        let (Some(currency_in), Some(amount_out)) = (currency_in, amount_out) else {
            return BestRoute::NoRoute;
        };
        if pairs.is_empty() {
            return BestRoute::NoRoute;
        }

        self.fold_hops(max_hops, |hops| {
            self.search
                .best_trade_exact_out(pairs, currency_in, amount_out, single_result(hops))
                .into_iter()
                .next()
        })
    }

    fn fold_hops<F>(&self, max_hops: usize, query: F) -> BestRoute
    where
        F: Fn(usize) -> Option<Trade>,
    {
        if max_hops == 1 {
            return query(1).into();
        }

        let mut best_so_far: Option<Trade> = None;
        for hops in 1..=max_hops {
            let candidate = query(hops);
            debug!(
                hops,
                found = candidate.is_some(),
                candidate_hops = candidate.as_ref().map(Trade::hop_count),
                "queried route search"
            );
            if self
                .comparator
                .is_better(best_so_far.as_ref(), candidate.as_ref(), &self.threshold)
            {
                best_so_far = candidate;
            }
        }

        if let Some(best) = &best_so_far {
            info!(
                hops = best.hop_count(),
                amount_in = %best.input_amount.raw,
                amount_out = %best.output_amount.raw,
                "selected best route"
            );
        }
        best_so_far.into()
    }
}

fn single_result(max_hops: usize) -> BestTradeOptions {
    BestTradeOptions {
        max_hops,
        max_num_results: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::ExecutionPriceComparator;
    use crate::core::search::ConstantProductSearch;
    use crate::core::types::TradeType;
    use num_bigint::BigUint;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn token(address: &str) -> Token {
        Token::new(address, address, 18)
    }

    fn pair(address: &str, a: &Token, b: &Token) -> Pair {
        Pair::new(
            address,
            CurrencyAmount::new(a.clone(), BigUint::from(1_000_000u64)),
            CurrencyAmount::new(b.clone(), BigUint::from(1_000_000u64)),
        )
        .unwrap()
    }

    fn stub_trade(trade_type: TradeType, amount_in: u64, amount_out: u64, hops: usize) -> Trade {
        let input = token("0x01");
        let output = token("0x02");
        Trade {
            route: (0..hops).map(|i| pair(&format!("0xf{i}"), &input, &output)).collect(),
            path: vec![input.clone(), output.clone()],
            trade_type,
            input_amount: CurrencyAmount::new(input, BigUint::from(amount_in)),
            output_amount: CurrencyAmount::new(output, BigUint::from(amount_out)),
        }
    }

    // Returns a canned best trade per hop count and records every query
    #[derive(Default)]
    struct StubSearch {
        by_hops: HashMap<usize, Trade>,
        queries: Mutex<Vec<BestTradeOptions>>,
    }

    impl StubSearch {
        fn with(trades: Vec<(usize, Trade)>) -> Self {
            Self {
                by_hops: trades.into_iter().collect(),
                queries: Mutex::new(vec![]),
            }
        }

        fn queried_hops(&self) -> Vec<usize> {
            self.queries.lock().unwrap().iter().map(|o| o.max_hops).collect()
        }

        fn answer(&self, options: BestTradeOptions) -> Vec<Trade> {
            self.queries.lock().unwrap().push(options);
            self.by_hops.get(&options.max_hops).cloned().into_iter().collect()
        }
    }

    impl RouteSearch for StubSearch {
        fn best_trade_exact_in(
            &self,
            _pairs: &[Pair],
            _amount_in: &CurrencyAmount,
            _currency_out: &Token,
            options: BestTradeOptions,
        ) -> Vec<Trade> {
            self.answer(options)
        }

        fn best_trade_exact_out(
            &self,
            _pairs: &[Pair],
            _currency_in: &Token,
            _amount_out: &CurrencyAmount,
            options: BestTradeOptions,
        ) -> Vec<Trade> {
            self.answer(options)
        }
    }

    fn threshold() -> Percent {
        Percent::from_bps(50)
    }

    fn amount_in() -> CurrencyAmount {
        CurrencyAmount::new(token("0x01"), BigUint::from(1_000u32))
    }

    fn some_pairs() -> Vec<Pair> {
        vec![pair("0xab", &token("0x01"), &token("0x02"))]
    }

    #[test]
    fn missing_amount_skips_search() {
        let search = StubSearch::default();
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let result = selector.best_trade_exact_in(&some_pairs(), None, Some(&token("0x02")), 3);
        assert_eq!(result, BestRoute::NoRoute);
        assert!(search.queried_hops().is_empty());
    }

    #[test]
    fn empty_pairs_skip_search() {
        let search = StubSearch::default();
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let result = selector.best_trade_exact_out(&[], Some(&token("0x01")), Some(&amount_in()), 3);
        assert_eq!(result, BestRoute::NoRoute);
        assert!(search.queried_hops().is_empty());
    }

    #[test]
    fn single_hop_returns_search_result_as_is() {
        let one_hop = stub_trade(TradeType::ExactInput, 1000, 900, 1);
        let search = StubSearch::with(vec![(1, one_hop.clone())]);
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let result =
            selector.best_trade_exact_in(&some_pairs(), Some(&amount_in()), Some(&token("0x02")), 1);
        assert_eq!(result, BestRoute::Route(one_hop));
        assert_eq!(search.queried_hops(), vec![1]);
        assert!(search.queries.lock().unwrap().iter().all(|o| o.max_num_results == 1));
    }

    #[test]
    fn single_hop_exact_out_queries_once() {
        let one_hop = stub_trade(TradeType::ExactOutput, 1100, 1000, 1);
        let search = StubSearch::with(vec![(1, one_hop.clone())]);
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let amount_out = CurrencyAmount::new(token("0x02"), BigUint::from(1_000u32));
        let result =
            selector.best_trade_exact_out(&some_pairs(), Some(&token("0x01")), Some(&amount_out), 1);
        assert_eq!(result, BestRoute::Route(one_hop));
        assert_eq!(search.queried_hops(), vec![1]);
        assert!(search.queries.lock().unwrap().iter().all(|o| o.max_num_results == 1));
    }

    #[test]
    fn fewer_hops_win_within_threshold() {
        let one_hop = stub_trade(TradeType::ExactInput, 1000, 1000, 1);
        let three_hop = stub_trade(TradeType::ExactInput, 1000, 1004, 3);
        let search = StubSearch::with(vec![(1, one_hop.clone()), (3, three_hop)]);
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let result =
            selector.best_trade_exact_in(&some_pairs(), Some(&amount_in()), Some(&token("0x02")), 3);
        assert_eq!(result, BestRoute::Route(one_hop));
        assert_eq!(search.queried_hops(), vec![1, 2, 3]);
    }

    #[test]
    fn clearly_better_longer_route_wins() {
        let one_hop = stub_trade(TradeType::ExactOutput, 1000, 1000, 1);
        let two_hop = stub_trade(TradeType::ExactOutput, 900, 1000, 2);
        let search = StubSearch::with(vec![(1, one_hop.clone()), (2, two_hop.clone())]);
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let amount_out = CurrencyAmount::new(token("0x02"), BigUint::from(1_000u32));
        let result =
            selector.best_trade_exact_out(&some_pairs(), Some(&token("0x01")), Some(&amount_out), 3);
        assert_eq!(result, BestRoute::Route(two_hop.clone()));

        // the result is never worse than any per-hop candidate
        for candidate in [&one_hop, &two_hop] {
            assert!(!ExecutionPriceComparator.is_better(
                result.as_trade(),
                Some(candidate),
                &threshold()
            ));
        }
    }

    #[test]
    fn no_candidates_yield_no_route() {
        let search = StubSearch::default();
        let selector = BestRouteSelector::new(&search, &ExecutionPriceComparator, threshold());
        let result =
            selector.best_trade_exact_in(&some_pairs(), Some(&amount_in()), Some(&token("0x02")), 3);
        assert_eq!(result, BestRoute::NoRoute);
        assert_eq!(search.queried_hops(), vec![1, 2, 3]);
    }

    #[test]
    fn single_pair_scenario_finds_direct_route() {
        let a = token("0x0a");
        let b = token("0x0b");
        let pairs = vec![pair("0xab", &a, &b)];
        let one_a = CurrencyAmount::new(a.clone(), BigUint::from(10u64.pow(3)));
        let selector =
            BestRouteSelector::new(&ConstantProductSearch, &ExecutionPriceComparator, threshold());

        let result = selector.best_trade_exact_in(&pairs, Some(&one_a), Some(&b), 3);
        let trade = result.as_trade().unwrap();
        assert_eq!(trade.hop_count(), 1);
        assert_eq!(trade.path, vec![a, b]);
        assert_eq!(trade.route, pairs);
    }
}
