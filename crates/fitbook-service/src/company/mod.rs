//! Company profile service.

pub mod service;

pub use service::CompanyService;
