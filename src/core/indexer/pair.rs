use super::errors::RouteError;
use super::types::{CurrencyAmount, Pair, Token};
use csv::Reader;
use num_bigint::BigUint;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

// One row of the reserves snapshot file
#[derive(Deserialize, Debug, Clone)]
struct PairRecord {
    pair_address: String,
    token0: String,
    token0_symbol: String,
    token0_decimals: u8,
    token1: String,
    token1_symbol: String,
    token1_decimals: u8,
    reserve0: String,
    reserve1: String,
}

impl PairRecord {
    fn into_pair(self) -> Result<Pair, RouteError> {
        let reserve0 = parse_reserve(&self.reserve0)?;
        let reserve1 = parse_reserve(&self.reserve1)?;
        Pair::new(
            &self.pair_address,
            CurrencyAmount::new(
                Token::new(&self.token0, &self.token0_symbol, self.token0_decimals),
                reserve0,
            ),
            CurrencyAmount::new(
                Token::new(&self.token1, &self.token1_symbol, self.token1_decimals),
                reserve1,
            ),
        )
    }
}

fn parse_reserve(value: &str) -> Result<BigUint, RouteError> {
    BigUint::from_str(value.trim()).map_err(|_| RouteError::InvalidAmount(value.to_string()))
}

pub fn read_pair_snapshot<P: AsRef<Path>>(pair_file: P) -> Result<Vec<Pair>, RouteError> {
    let mut reader = Reader::from_path(pair_file)?;
    reader
        .deserialize::<PairRecord>()
        .map(|record| record?.into_pair())
        .collect()
}
