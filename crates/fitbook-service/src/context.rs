//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fitbook_entity::account::AccountRole;

/// Context for the current authenticated request.
///
/// Built once by the API layer from the verified identity token and passed
/// into every service call, so each operation knows *who* is acting without
/// consulting any ambient global state. The role and company binding are
/// resolved at token verification time, never re-derived by ad hoc queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role as issued by the auth provider.
    pub role: AccountRole,
    /// The company this user owns, when the role is `Company`.
    pub company_id: Option<Uuid>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: AccountRole, company_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            company_id,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user may manage resources of `company_id`.
    pub fn can_manage_company(&self, company_id: Uuid) -> bool {
        self.is_admin() || self.company_id == Some(company_id)
    }
}
