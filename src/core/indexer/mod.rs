pub mod pair;
pub use super::errors;
pub use super::types;
