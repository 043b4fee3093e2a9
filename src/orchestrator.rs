use super::core::compare::ExecutionPriceComparator;
use super::core::estimate::GasTipEstimator;
use super::core::hooks::{Collaborators, HookSettings, SwapHooks};
use super::core::indexer::pair::read_pair_snapshot;
use super::core::pair::SnapshotPairLookup;
use super::core::search::{ConstantProductSearch, RouteSearch};
use super::core::state::{LatestGasPrice, UserSettings};
use super::core::types::{CurrencyAmount, Percent, Token, Trade};
use super::types::{
    DexConfig, MinTradeRequest, MinTradeResponse, QuoteRequest, QuoteResponse, ResponsePool,
    Route, TipEstimateResponse,
};
use anyhow::{anyhow, bail, Context, Result};
use num_bigint::BigUint;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Everything the HTTP handlers need: the memoized hooks and the inputs they read.
pub struct QuoteService {
    pub config: DexConfig,
    pub lookup: Arc<SnapshotPairLookup>,
    pub gas_price: Arc<LatestGasPrice>,
    pub preferences: Arc<UserSettings>,
    hooks: Mutex<SwapHooks>,
}

impl QuoteService {
    pub fn new(config: DexConfig) -> Self {
        let lookup = Arc::new(SnapshotPairLookup::default());
        let gas_price = Arc::new(LatestGasPrice::default());
        let preferences = Arc::new(UserSettings::new(config.user_tip_margin_percent));
        let search: Arc<dyn RouteSearch> = Arc::new(ConstantProductSearch);

        let collaborators = Collaborators {
            pairs: lookup.clone(),
            search: search.clone(),
            comparator: Arc::new(ExecutionPriceComparator),
            estimator: Arc::new(GasTipEstimator::new(
                search,
                config.wrapped_native.clone(),
                config.swap_gas_units,
                config.max_hops,
            )),
            gas_price: gas_price.clone(),
            preferences: preferences.clone(),
        };
        let settings = HookSettings {
            bases: config.base_tokens.clone(),
            threshold: Percent::from_bps(config.better_trade_threshold_bps),
            default_tip_margin_percent: config.default_tip_margin_percent,
        };

        Self {
            config,
            lookup,
            gas_price,
            preferences,
            hooks: Mutex::new(SwapHooks::new(collaborators, settings)),
        }
    }

    pub fn reload_pair_data(&self) -> Result<usize> {
        let pair_file = self.config.pair_file_path();
        let pairs = read_pair_snapshot(&pair_file)
            .with_context(|| format!("reading pair snapshot {}", pair_file.display()))?;
        let count = pairs.len();
        self.lookup.replace(pairs);
        info!(pairs = count, file = %pair_file.display(), "loaded pair snapshot");
        Ok(count)
    }

    pub fn set_gas_price(&self, gas_price: &str) -> Result<()> {
        let wei = parse_amount(gas_price).context("invalid gas price")?;
        self.gas_price.set(wei);
        Ok(())
    }

    pub fn set_tip_margin(&self, percent: Option<u32>) {
        self.preferences.set_tip_margin_percent(percent);
    }

    fn resolve_token(&self, address: &str) -> Result<Token> {
        self.lookup
            .find_token(address)
            .or_else(|| {
                let address = address.trim().to_lowercase();
                self.config
                    .base_tokens
                    .iter()
                    .chain(std::iter::once(&self.config.wrapped_native))
                    .find(|token| token.address == address)
                    .cloned()
            })
            .ok_or_else(|| anyhow!("Unsupported token address {address}"))
    }

    pub async fn get_quote(&self, request: QuoteRequest) -> Result<QuoteResponse> {
        validate_request(&request, self.config.max_hops)?;
        let sell_token = self.resolve_token(&request.sell_token_address)?;
        let buy_token = self.resolve_token(&request.buy_token_address)?;
        let max_hops = request.max_hops.or(Some(self.config.max_hops));

        let best = {
            let mut hooks = self.hooks.lock().await;
            match (&request.sell_amount, &request.buy_amount) {
                (Some(sell_amount), _) => {
                    let amount_in = CurrencyAmount::new(sell_token, parse_amount(sell_amount)?);
                    hooks.trade_exact_in(Some(&amount_in), Some(&buy_token), max_hops)
                }
                (None, Some(buy_amount)) => {
                    let amount_out = CurrencyAmount::new(buy_token, parse_amount(buy_amount)?);
                    hooks.trade_exact_out(Some(&sell_token), Some(&amount_out), max_hops)
                }
                (None, None) => bail!("Sell or buy amount is mandatory"),
            }
        };

        let mut response = QuoteResponse {
            sell_token_address: request.sell_token_address.trim().to_lowercase(),
            buy_token_address: request.buy_token_address.trim().to_lowercase(),
            sell_amount: request.sell_amount.clone(),
            buy_amount: request.buy_amount.clone(),
            hops: 0,
            chain_id: self.config.chain_id.clone(),
            routes: vec![],
        };
        if let Some(trade) = best.as_trade() {
            response.sell_amount = Some(trade.input_amount.raw.to_string());
            response.buy_amount = Some(trade.output_amount.raw.to_string());
            response.hops = trade.hop_count();
            response.routes = vec![Route {
                percent: 100.0,
                path: build_response_path(trade),
            }];
        }
        Ok(response)
    }

    pub async fn get_tip_estimate(&self) -> Option<TipEstimateResponse> {
        let estimate = self.hooks.lock().await.miner_tip_estimate()?;
        Some(TipEstimateResponse {
            gas_price: estimate.gas_price.to_string(),
            tip_margin_percent: estimate.tip_margin_percent,
            min_bribe: estimate.min_bribe.to_string(),
            mean_bribe: estimate.mean_bribe.to_string(),
            max_bribe: estimate.max_bribe.to_string(),
        })
    }

    pub async fn get_min_trade_amount(
        &self,
        request: MinTradeRequest,
    ) -> Result<Option<MinTradeResponse>> {
        let sell_token = self.resolve_token(&request.sell_token_address)?;
        let buy_token = self.resolve_token(&request.buy_token_address)?;
        let estimate = self
            .hooks
            .lock()
            .await
            .min_trade_amount(Some(&sell_token), Some(&buy_token));

        Ok(estimate.map(|estimate| MinTradeResponse {
            sell_token_address: sell_token.address,
            buy_token_address: buy_token.address,
            min_amount_in: estimate.min_amount_in.raw.to_string(),
            min_amount_out: estimate.min_amount_out.raw.to_string(),
        }))
    }
}

pub fn validate_request(request: &QuoteRequest, max_hops_limit: usize) -> Result<()> {
    if request.buy_token_address.trim().is_empty() || request.sell_token_address.trim().is_empty() {
        bail!("Buy and Sell Token addresses cannot be empty");
    }
    if request.buy_amount.is_none() && request.sell_amount.is_none() {
        bail!("Sell or buy amount is mandatory");
    }
    if request.buy_amount.is_some() && request.sell_amount.is_some() {
        bail!("Only one of sell amount and buy amount may be given");
    }
    match request.max_hops {
        Some(0) => bail!("maxHops must be at least 1"),
        Some(max_hops) if max_hops > max_hops_limit => {
            bail!("maxHops cannot exceed {max_hops_limit}")
        }
        _ => {}
    }
    Ok(())
}

fn parse_amount(value: &str) -> Result<BigUint> {
    BigUint::from_str(value.trim()).map_err(|_| anyhow!("Invalid amount {value:?}"))
}

fn build_response_path(trade: &Trade) -> Vec<ResponsePool> {
    trade
        .route
        .iter()
        .zip(trade.path.windows(2))
        .map(|(pair, tokens)| ResponsePool {
            pair_address: pair.address.clone(),
            token_in: tokens[0].address.clone(),
            token_out: tokens[1].address.clone(),
            token_in_symbol: tokens[0].symbol.clone(),
            token_out_symbol: tokens[1].symbol.clone(),
        })
        .collect()
}
