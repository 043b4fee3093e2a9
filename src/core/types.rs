use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

// Token identity is its address; symbol and decimals are display data only
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    #[serde(deserialize_with = "lowercase_address")]
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

fn lowercase_address<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let address = String::deserialize(deserializer)?;
    Ok(address.trim().to_lowercase())
}

impl Token {
    pub fn new(address: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address: address.trim().to_lowercase(),
            symbol: symbol.to_string(),
            decimals,
        }
    }

    // Tokens are ordered by the numeric value of their hex address
    pub fn sorts_before(&self, other: &Token) -> bool {
        match (address_value(&self.address), address_value(&other.address)) {
            (Some(a), Some(b)) => a < b,
            _ => self.address < other.address,
        }
    }
}

fn address_value(address: &str) -> Option<BigUint> {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    BigUint::parse_bytes(digits.as_bytes(), 16)
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyAmount {
    pub currency: Token,
    pub raw: BigUint,
}

impl CurrencyAmount {
    pub fn new(currency: Token, raw: BigUint) -> Self {
        Self { currency, raw }
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

/// A constant-product liquidity pool. `token0` always sorts before `token1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    pub address: String,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairState {
    Loading,
    NotExists,
    Exists,
    Invalid,
}

pub type PairLookupResult = (PairState, Option<Pair>);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// A linear route through one or more pairs together with the amounts on both ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    pub route: Vec<Pair>,
    pub path: Vec<Token>,
    pub trade_type: TradeType,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

impl Trade {
    pub fn hop_count(&self) -> usize {
        self.route.len()
    }

    pub fn input_currency(&self) -> &Token {
        &self.input_amount.currency
    }

    pub fn output_currency(&self) -> &Token {
        &self.output_amount.currency
    }
}

/// Outcome of a best-route selection
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum BestRoute {
    #[default]
    NoRoute,
    Route(Trade),
}

impl BestRoute {
    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            BestRoute::Route(trade) => Some(trade),
            BestRoute::NoRoute => None,
        }
    }

    pub fn is_route(&self) -> bool {
        matches!(self, BestRoute::Route(_))
    }
}

impl From<Option<Trade>> for BestRoute {
    fn from(trade: Option<Trade>) -> Self {
        trade.map_or(BestRoute::NoRoute, BestRoute::Route)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Percent {
    pub numerator: BigUint,
    pub denominator: BigUint,
}

impl Percent {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator: BigUint::from(numerator),
            denominator: BigUint::from(denominator),
        }
    }

    pub fn from_bps(bps: u32) -> Self {
        Self::new(u64::from(bps), 10_000)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestTradeOptions {
    pub max_hops: usize,
    pub max_num_results: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BribeEstimate {
    pub gas_price: BigUint,
    pub tip_margin_percent: u32,
    pub min_bribe: BigUint,
    pub mean_bribe: BigUint,
    pub max_bribe: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinTradeEstimate {
    pub min_amount_in: CurrencyAmount,
    pub min_amount_out: CurrencyAmount,
}
