//! Shared types used across FitBook crates.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
