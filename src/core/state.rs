use num_bigint::BigUint;
use std::sync::{PoisonError, RwLock};

/// Latest network gas price in wei, if one has been observed.
pub trait GasPriceSource: Send + Sync {
    fn latest_gas_price(&self) -> Option<BigUint>;
}

/// User-configured tip margin in percent, if one has been set.
pub trait UserPreferences: Send + Sync {
    fn tip_margin_percent(&self) -> Option<u32>;
}

#[derive(Debug, Default)]
pub struct LatestGasPrice {
    wei: RwLock<Option<BigUint>>,
}

impl LatestGasPrice {
    pub fn set(&self, wei: BigUint) {
        *self.wei.write().unwrap_or_else(PoisonError::into_inner) = Some(wei);
    }
}

impl GasPriceSource for LatestGasPrice {
    fn latest_gas_price(&self) -> Option<BigUint> {
        self.wei.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Debug, Default)]
pub struct UserSettings {
    tip_margin_percent: RwLock<Option<u32>>,
}

impl UserSettings {
    pub fn new(tip_margin_percent: Option<u32>) -> Self {
        Self {
            tip_margin_percent: RwLock::new(tip_margin_percent),
        }
    }

    pub fn set_tip_margin_percent(&self, percent: Option<u32>) {
        *self
            .tip_margin_percent
            .write()
            .unwrap_or_else(PoisonError::into_inner) = percent;
    }
}

impl UserPreferences for UserSettings {
    fn tip_margin_percent(&self) -> Option<u32> {
        *self
            .tip_margin_percent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
