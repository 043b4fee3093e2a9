use super::types::{Pair, PairLookupResult, PairState, Token};
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Resolves currency combinations to the pairs that exist for them.
pub trait PairLookup: Send + Sync {
    fn lookup_pairs(&self, combinations: &[(Token, Token)]) -> Vec<PairLookupResult>;
}

// Every combination a route between `currency_a` and `currency_b` may pass through
pub fn all_currency_combinations(
    currency_a: Option<&Token>,
    currency_b: Option<&Token>,
    bases: &[Token],
) -> Vec<(Token, Token)> {
    let (Some(a), Some(b)) = (currency_a, currency_b) else {
        return vec![];
    };

    let mut combinations = vec![(a.clone(), b.clone())];
    combinations.extend(bases.iter().map(|base| (a.clone(), base.clone())));
    combinations.extend(bases.iter().map(|base| (b.clone(), base.clone())));
    for base in bases {
        combinations.extend(bases.iter().map(|other| (base.clone(), other.clone())));
    }

    combinations
        .into_iter()
        .filter(|(token0, token1)| token0 != token1)
        .collect()
}

/// Keeps existing pairs only, first occurrence of each pool address wins.
pub fn assemble_candidate_pairs(results: &[PairLookupResult]) -> Vec<Pair> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter_map(|(state, pair)| match (state, pair) {
            (PairState::Exists, Some(pair)) => Some(pair),
            _ => None,
        })
        .filter(|pair| seen.insert(pair.address.clone()))
        .cloned()
        .collect()
}

// Answers lookups from an in-memory reserves snapshot that can be swapped out on reload
#[derive(Default)]
pub struct SnapshotPairLookup {
    pairs: RwLock<Vec<Pair>>,
}

impl SnapshotPairLookup {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self {
            pairs: RwLock::new(pairs),
        }
    }

    pub fn replace(&self, pairs: Vec<Pair>) {
        *self.pairs.write().unwrap_or_else(PoisonError::into_inner) = pairs;
    }

    pub fn len(&self) -> usize {
        self.pairs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_token(&self, address: &str) -> Option<Token> {
        let address = address.trim().to_lowercase();
        let pairs = self.pairs.read().unwrap_or_else(PoisonError::into_inner);
        let token = pairs
            .iter()
            .flat_map(|pair| [&pair.token0, &pair.token1])
            .find(|token| token.address == address)
            .cloned();
        token
    }
}

impl PairLookup for SnapshotPairLookup {
    fn lookup_pairs(&self, combinations: &[(Token, Token)]) -> Vec<PairLookupResult> {
        let pairs = self.pairs.read().unwrap_or_else(PoisonError::into_inner);
        combinations
            .iter()
            .map(|(token_a, token_b)| {
                if token_a == token_b {
                    return (PairState::Invalid, None);
                }
                pairs
                    .iter()
                    .find(|pair| pair.involves_token(token_a) && pair.involves_token(token_b))
                    .map_or((PairState::NotExists, None), |pair| {
                        (PairState::Exists, Some(pair.clone()))
                    })
            })
            .collect()
    }
}
