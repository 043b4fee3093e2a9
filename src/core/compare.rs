use super::types::{Percent, Trade};
use num_bigint::BigUint;
use tracing::warn;

/// Decides whether `candidate` should replace `current` as the best trade.
pub trait TradeComparator: Send + Sync {
    fn is_better(&self, current: Option<&Trade>, candidate: Option<&Trade>, threshold: &Percent) -> bool;
}

// Compares execution prices (output per input). The candidate wins only when its
// price beats the current one scaled up by the threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecutionPriceComparator;

impl TradeComparator for ExecutionPriceComparator {
    fn is_better(&self, current: Option<&Trade>, candidate: Option<&Trade>, threshold: &Percent) -> bool {
        let (current, candidate) = match (current, candidate) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(current), Some(candidate)) => (current, candidate),
        };

        if current.trade_type != candidate.trade_type
            || current.input_currency() != candidate.input_currency()
            || current.output_currency() != candidate.output_currency()
        {
            warn!(
                current_type = ?current.trade_type,
                candidate_type = ?candidate.trade_type,
                "trades are not comparable"
            );
            return false;
        }

        // current.out / current.in * (1 + t) < candidate.out / candidate.in
        let current_side = &current.output_amount.raw
            * &candidate.input_amount.raw
            * (&threshold.denominator + &threshold.numerator);
        let candidate_side: BigUint = &candidate.output_amount.raw
            * &current.input_amount.raw
            * &threshold.denominator;
        current_side < candidate_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CurrencyAmount, Token, TradeType};

    fn trade(trade_type: TradeType, amount_in: u64, amount_out: u64, hops: usize) -> Trade {
        let input = Token::new("0x01", "IN", 18);
        let output = Token::new("0x02", "OUT", 18);
        let mut path = vec![input.clone()];
        path.extend((1..hops).map(|i| Token::new(&format!("0x1{i}"), "MID", 18)));
        path.push(output.clone());
        Trade {
            route: vec![],
            path,
            trade_type,
            input_amount: CurrencyAmount::new(input, BigUint::from(amount_in)),
            output_amount: CurrencyAmount::new(output, BigUint::from(amount_out)),
        }
    }

    #[test]
    fn null_handling() {
        let t = trade(TradeType::ExactInput, 100, 100, 1);
        let threshold = Percent::from_bps(50);
        assert!(ExecutionPriceComparator.is_better(None, Some(&t), &threshold));
        assert!(!ExecutionPriceComparator.is_better(Some(&t), None, &threshold));
        assert!(!ExecutionPriceComparator.is_better(None, None, &threshold));
    }

    #[test]
    fn exact_input_needs_more_output_than_threshold() {
        let current = trade(TradeType::ExactInput, 1000, 1000, 1);
        let threshold = Percent::from_bps(50);
        let within = trade(TradeType::ExactInput, 1000, 1004, 2);
        let beyond = trade(TradeType::ExactInput, 1000, 1006, 2);
        assert!(!ExecutionPriceComparator.is_better(Some(&current), Some(&within), &threshold));
        assert!(ExecutionPriceComparator.is_better(Some(&current), Some(&beyond), &threshold));
    }

    #[test]
    fn exact_output_prefers_less_input() {
        let current = trade(TradeType::ExactOutput, 1000, 1000, 1);
        let cheaper = trade(TradeType::ExactOutput, 900, 1000, 2);
        let dearer = trade(TradeType::ExactOutput, 1100, 1000, 2);
        let zero = Percent::from_bps(0);
        assert!(ExecutionPriceComparator.is_better(Some(&current), Some(&cheaper), &zero));
        assert!(!ExecutionPriceComparator.is_better(Some(&current), Some(&dearer), &zero));
    }

    #[test]
    fn equal_price_is_not_better_without_threshold() {
        let current = trade(TradeType::ExactInput, 1000, 1000, 1);
        let same = trade(TradeType::ExactInput, 1000, 1000, 3);
        assert!(!ExecutionPriceComparator.is_better(Some(&current), Some(&same), &Percent::from_bps(0)));
    }

    #[test]
    fn mismatched_trade_types_are_never_better() {
        let current = trade(TradeType::ExactInput, 1000, 1000, 1);
        let other = trade(TradeType::ExactOutput, 1, 1000, 1);
        assert!(!ExecutionPriceComparator.is_better(Some(&current), Some(&other), &Percent::from_bps(0)));
    }
}
