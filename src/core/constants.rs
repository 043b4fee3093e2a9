pub const MAX_HOPS: usize = 3;

// 0.5%: a route with more hops must beat the current best by this much
pub const BETTER_TRADE_LESS_HOPS_THRESHOLD_BPS: u32 = 50;

pub const FEE_NUMERATOR: u32 = 997;
pub const FEE_DENOMINATOR: u32 = 1000;

pub const DEFAULT_TIP_MARGIN_PERCENT: u32 = 10;

// Gas used by a router swap, the basis of the bribe estimate
pub const SWAP_GAS_UNITS: u64 = 250_000;

pub const MIN_TRADE_PRECISION: u32 = 1;
