//! Package entity: a purchasable bundle of classes or timed access.

pub mod kind;
pub mod model;

pub use kind::PackageKind;
pub use model::{CreatePackage, Package, UpdatePackage};
