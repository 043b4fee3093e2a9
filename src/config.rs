use super::core::constants::{
    BETTER_TRADE_LESS_HOPS_THRESHOLD_BPS, DEFAULT_TIP_MARGIN_PERCENT, MAX_HOPS, SWAP_GAS_UNITS,
};
use super::core::types::Token;
use super::types::DexConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            working_dir: "working_dir".to_string(),
            pair_file: "pairs.csv".to_string(),
            chain_id: "1".to_string(),
            listen_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
            max_hops: MAX_HOPS,
            better_trade_threshold_bps: BETTER_TRADE_LESS_HOPS_THRESHOLD_BPS,
            default_tip_margin_percent: DEFAULT_TIP_MARGIN_PERCENT,
            user_tip_margin_percent: None,
            swap_gas_units: SWAP_GAS_UNITS,
            wrapped_native: Token::new("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "WETH", 18),
            base_tokens: vec![
                Token::new("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "WETH", 18),
                Token::new("0x6b175474e89094c44da98b954eedeac495271d0f", "DAI", 18),
                Token::new("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "USDC", 6),
                Token::new("0xdac17f958d2ee523a2206206994597c13d831ec7", "USDT", 6),
                Token::new("0x2260fac5e5542a773aa44fbcbedc0f7d6ebb7ed4", "WBTC", 8),
            ],
        }
    }
}

impl DexConfig {
    // Helper method to load from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let config: Self = confy::load_path(&path)
            .with_context(|| format!("loading config from {}", path.display()))?;
        Ok(config)
    }

    pub fn pair_file_path(&self) -> PathBuf {
        Path::new(self.working_dir.as_str()).join(self.pair_file.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_config_file_is_created_with_defaults() {
        let dir = std::env::temp_dir().join(format!("dex-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dex_config.toml");

        let config = DexConfig::load_from(path.clone()).unwrap();
        assert_eq!(config.max_hops, MAX_HOPS);
        assert_eq!(config.base_tokens.len(), 5);
        assert!(path.exists());

        let reloaded = DexConfig::load_from(path).unwrap();
        assert_eq!(reloaded.wrapped_native, config.wrapped_native);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn pair_file_lives_in_working_dir() {
        let config = DexConfig::default();
        assert_eq!(config.pair_file_path(), Path::new("working_dir").join("pairs.csv"));
    }
}
