//! Account role types carried in hosted-auth identity tokens.

pub mod role;

pub use role::AccountRole;
