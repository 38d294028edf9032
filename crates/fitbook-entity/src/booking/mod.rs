//! Booking entity: a user's reservation against a class session.

pub mod model;
pub mod status;

pub use model::{Booking, CreateBooking};
pub use status::BookingStatus;
