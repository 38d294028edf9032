//! # fitbook-service
//!
//! Business logic services for FitBook. Services orchestrate repositories
//! inside transactions; every call receives a [`context::RequestContext`]
//! identifying the acting user.

pub mod booking;
pub mod class_session;
pub mod company;
pub mod context;
pub mod package;
pub mod payment;
