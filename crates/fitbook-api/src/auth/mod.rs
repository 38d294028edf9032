//! Identity token verification for the hosted auth provider.

pub mod claims;
pub mod verifier;

pub use claims::Claims;
pub use verifier::TokenVerifier;
