//! Entitlement entity: a user's purchased instance of a package.

pub mod model;

pub use model::{CreateEntitlement, Entitlement};
