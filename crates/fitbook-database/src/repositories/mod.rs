//! Repository implementations, one per aggregate.

pub mod booking;
pub mod class_session;
pub mod company;
pub mod entitlement;
pub mod package;

use fitbook_core::error::{AppError, ErrorKind};

/// Map a sqlx error into the application error taxonomy.
///
/// Pool/IO timeouts become `Transient` so callers know a retry is safe;
/// everything else is a terminal `Database` error. Unique-constraint
/// violations are classified at the call sites that expect them.
pub fn map_sqlx_err(context: &str, err: sqlx::Error) -> AppError {
    let kind = match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => ErrorKind::Transient,
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, context.to_string(), err)
}
