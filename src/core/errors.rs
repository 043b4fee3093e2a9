use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("insufficient reserves in pair {0}")]
    InsufficientReserves(String),
    #[error("insufficient input amount for pair {0}")]
    InsufficientInputAmount(String),
    #[error("token {token} is not part of pair {pair}")]
    TokenNotInPair { token: String, pair: String },
    #[error("pair {0} joins a token with itself")]
    IdenticalTokens(String),
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
