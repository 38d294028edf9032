//! Package kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a package grants when purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "package_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PackageKind {
    /// A fixed number of classes, consumed one per booking.
    ClassCount,
    /// Unlimited classes within a validity window.
    TimeBased,
}

impl PackageKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClassCount => "class_count",
            Self::TimeBased => "time_based",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
