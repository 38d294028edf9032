//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles carried in the hosted provider's identity token.
///
/// The role is resolved once when the token is verified and travels with the
/// request context; services never re-derive it from the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Full platform administrator.
    Admin,
    /// Owner of a wellness company; can manage that company's listings.
    Company,
    /// Regular end user; can book classes and buy packages.
    Member,
}

impl AccountRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Company => "company",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = fitbook_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "company" => Ok(Self::Company),
            "member" => Ok(Self::Member),
            _ => Err(fitbook_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: admin, company, member"
            ))),
        }
    }
}
