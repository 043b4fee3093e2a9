pub mod compare;
pub mod constants;
pub mod errors;
pub mod estimate;
pub mod hooks;
pub mod indexer;
pub mod memo;
pub mod pair;
pub mod pool;
pub mod search;
pub mod selector;
pub mod state;
pub mod types;
