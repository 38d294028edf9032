//! Booking and cancellation services.

pub mod cancellation;
pub mod service;

pub use cancellation::CancellationService;
pub use service::{BookClassRequest, BookingService};
