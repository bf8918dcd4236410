//! HTTP-facing request/response types and framework adapters.

mod types;

pub use types::*;

#[cfg(feature = "axum_support")]
pub mod axum;
