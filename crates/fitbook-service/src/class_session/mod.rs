//! Class session catalog service.

pub mod service;

pub use service::ClassSessionService;
