//! Wellness company entity.

pub mod model;

pub use model::{Company, RegisterCompany, UpdateCompany};
