use crate::core::types::Token;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DexConfig {
    pub working_dir: String,
    pub pair_file: String,
    pub chain_id: String,
    pub listen_addr: String,
    pub log_level: String,
    pub max_hops: usize,
    pub better_trade_threshold_bps: u32,
    pub default_tip_margin_percent: u32,
    pub user_tip_margin_percent: Option<u32>,
    pub swap_gas_units: u64,
    pub wrapped_native: Token,
    pub base_tokens: Vec<Token>,
}

#[derive(Serialize, Deserialize, ToSchema, IntoParams, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QuoteRequest {
    #[schema(example = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")]
    pub sell_token_address: String,

    #[schema(example = "0x6b3595068778dd592e39a122f4f5a5cf09c90fe2")]
    pub buy_token_address: String,

    #[schema(example = "1000000000000000000", nullable = true)]
    pub sell_amount: Option<String>,

    #[schema(nullable = true)]
    pub buy_amount: Option<String>,

    #[schema(example = 3, nullable = true)]
    pub max_hops: Option<usize>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub sell_token_address: String,
    pub buy_token_address: String,
    pub sell_amount: Option<String>,
    pub buy_amount: Option<String>,
    pub hops: usize,
    pub chain_id: String,
    pub routes: Vec<Route>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct Route {
    pub percent: f64,
    pub path: Vec<ResponsePool>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePool {
    pub pair_address: String,
    pub token_in: String,
    pub token_out: String,
    pub token_in_symbol: String,
    pub token_out_symbol: String,
}

#[derive(Serialize, Deserialize, ToSchema, IntoParams, Clone, Debug)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MinTradeRequest {
    pub sell_token_address: String,
    pub buy_token_address: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MinTradeResponse {
    pub sell_token_address: String,
    pub buy_token_address: String,
    pub min_amount_in: String,
    pub min_amount_out: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TipEstimateResponse {
    pub gas_price: String,
    pub tip_margin_percent: u32,
    pub min_bribe: String,
    pub mean_bribe: String,
    pub max_bribe: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceUpdate {
    #[schema(example = "30000000000")]
    pub gas_price: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TipMarginUpdate {
    #[schema(nullable = true)]
    pub tip_margin_percent: Option<u32>,
}
