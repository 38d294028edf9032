//! Class session entity: one scheduled occurrence of a class with fixed capacity.

pub mod model;

pub use model::{ClassSession, CreateClassSession, UpdateClassSession};
