//! Core traits defined in `fitbook-core` and implemented by other crates.

pub mod payment;

pub use payment::{CheckoutProvider, CheckoutSession};
