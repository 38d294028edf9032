//! Payment verification and entitlement reconciliation.

pub mod service;
pub mod stripe;

pub use service::{PaymentService, VerifyPaymentRequest, VerifyPaymentResult};
pub use stripe::StripeClient;
