use super::types::{BestTradeOptions, CurrencyAmount, Pair, Token, Trade, TradeType};
use std::cmp::Ordering;
use tracing::trace;

/// Finds the best linear routes through a set of pairs.
///
/// Implementations return at most `options.max_num_results` trades, best first,
/// each using at most `options.max_hops` pairs. An empty list means no route.
pub trait RouteSearch: Send + Sync {
    fn best_trade_exact_in(
        &self,
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Token,
        options: BestTradeOptions,
    ) -> Vec<Trade>;

    fn best_trade_exact_out(
        &self,
        pairs: &[Pair],
        currency_in: &Token,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Vec<Trade>;
}

// Exhaustive depth-first search over constant-product pairs
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantProductSearch;

impl RouteSearch for ConstantProductSearch {
    fn best_trade_exact_in(
        &self,
        pairs: &[Pair],
        amount_in: &CurrencyAmount,
        currency_out: &Token,
        options: BestTradeOptions,
    ) -> Vec<Trade> {
        let mut best_trades = vec![];
        if options.max_hops == 0 || options.max_num_results == 0 || amount_in.is_zero() {
            return best_trades;
        }
        search_exact_in(
            pairs,
            amount_in,
            currency_out,
            options,
            &[],
            amount_in,
            &mut best_trades,
        );
        best_trades
    }

    fn best_trade_exact_out(
        &self,
        pairs: &[Pair],
        currency_in: &Token,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Vec<Trade> {
        let mut best_trades = vec![];
        if options.max_hops == 0 || options.max_num_results == 0 || amount_out.is_zero() {
            return best_trades;
        }
        search_exact_out(
            pairs,
            currency_in,
            amount_out,
            options,
            &[],
            amount_out,
            &mut best_trades,
        );
        best_trades
    }
}

fn search_exact_in(
    pairs: &[Pair],
    amount_in: &CurrencyAmount,
    currency_out: &Token,
    options: BestTradeOptions,
    current_pairs: &[Pair],
    next_amount_in: &CurrencyAmount,
    best_trades: &mut Vec<Trade>,
) {
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.involves_token(&next_amount_in.currency) {
            continue;
        }
        let amount_out = match pair.get_output_amount(next_amount_in) {
            Ok(amount_out) => amount_out,
            Err(e) => {
                trace!(pair = %pair.address, error = %e, "skipping pair");
                continue;
            }
        };

        let mut next_pairs = current_pairs.to_vec();
        next_pairs.push(pair.clone());

        if amount_out.currency == *currency_out {
            let path = route_path(&next_pairs, &amount_in.currency);
            let trade = Trade {
                route: next_pairs,
                path,
                trade_type: TradeType::ExactInput,
                input_amount: amount_in.clone(),
                output_amount: amount_out,
            };
            sorted_insert(best_trades, trade, options.max_num_results);
        } else if options.max_hops > 1 && pairs.len() > 1 {
            let remaining = pairs_excluding(pairs, i);
            search_exact_in(
                &remaining,
                amount_in,
                currency_out,
                BestTradeOptions {
                    max_hops: options.max_hops - 1,
                    ..options
                },
                &next_pairs,
                &amount_out,
                best_trades,
            );
        }
    }
}

fn search_exact_out(
    pairs: &[Pair],
    currency_in: &Token,
    amount_out: &CurrencyAmount,
    options: BestTradeOptions,
    current_pairs: &[Pair],
    next_amount_out: &CurrencyAmount,
    best_trades: &mut Vec<Trade>,
) {
    for (i, pair) in pairs.iter().enumerate() {
        if !pair.involves_token(&next_amount_out.currency) {
            continue;
        }
        let amount_in = match pair.get_input_amount(next_amount_out) {
            Ok(amount_in) => amount_in,
            Err(e) => {
                trace!(pair = %pair.address, error = %e, "skipping pair");
                continue;
            }
        };

        // Exact output routes are built backwards from the output token
        let mut next_pairs = vec![pair.clone()];
        next_pairs.extend_from_slice(current_pairs);

        if amount_in.currency == *currency_in {
            let path = route_path(&next_pairs, currency_in);
            let trade = Trade {
                route: next_pairs,
                path,
                trade_type: TradeType::ExactOutput,
                input_amount: amount_in,
                output_amount: amount_out.clone(),
            };
            sorted_insert(best_trades, trade, options.max_num_results);
        } else if options.max_hops > 1 && pairs.len() > 1 {
            let remaining = pairs_excluding(pairs, i);
            search_exact_out(
                &remaining,
                currency_in,
                amount_out,
                BestTradeOptions {
                    max_hops: options.max_hops - 1,
                    ..options
                },
                &next_pairs,
                &amount_in,
                best_trades,
            );
        }
    }
}

fn pairs_excluding(pairs: &[Pair], index: usize) -> Vec<Pair> {
    pairs[..index]
        .iter()
        .chain(pairs[index + 1..].iter())
        .cloned()
        .collect()
}

pub fn route_path(route: &[Pair], start: &Token) -> Vec<Token> {
    let mut path = vec![start.clone()];
    for pair in route {
        let current = path[path.len() - 1].clone();
        path.push(pair.other_token(&current).clone());
    }
    path
}

// More output first, then less input, then fewer hops
fn trade_ordering(a: &Trade, b: &Trade) -> Ordering {
    b.output_amount
        .raw
        .cmp(&a.output_amount.raw)
        .then_with(|| a.input_amount.raw.cmp(&b.input_amount.raw))
        .then_with(|| a.hop_count().cmp(&b.hop_count()))
}

fn sorted_insert(best_trades: &mut Vec<Trade>, trade: Trade, max_num_results: usize) {
    let position =
        best_trades.partition_point(|existing| trade_ordering(existing, &trade) != Ordering::Greater);
    if position >= max_num_results {
        return;
    }
    best_trades.insert(position, trade);
    best_trades.truncate(max_num_results);
}
