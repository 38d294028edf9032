//! Package catalog service.

pub mod service;

pub use service::PackageService;
