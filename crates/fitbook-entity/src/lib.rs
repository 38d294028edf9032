//! # fitbook-entity
//!
//! Domain entity models for FitBook: companies, class sessions, bookings,
//! packages, and entitlements. All row types derive `sqlx::FromRow` and
//! enums map to Postgres enum types via `sqlx::Type`.

pub mod account;
pub mod booking;
pub mod class_session;
pub mod company;
pub mod entitlement;
pub mod package;
