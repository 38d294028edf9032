//! # fitbook-core
//!
//! Core crate for FitBook. Contains configuration schemas, shared types,
//! the payment-provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FitBook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
