//! # fitbook-database
//!
//! PostgreSQL connection management, migrations, and repositories.
//!
//! Repositories hold a `PgPool` for standalone reads and writes. The ledger
//! primitives (`reserve`/`release`, `consume`/`restore`, booking insert) are
//! associated functions over `&mut PgConnection` so services can compose
//! them inside a single transaction.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
