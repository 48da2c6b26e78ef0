//! Request context carrying the caller's identity, role, and shop memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_entity::account::AccountRole;

/// Context for the current request.
///
/// Built by the transport layer and passed into service methods so that
/// every operation knows *who* is acting and *for which shops*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Identifier used to correlate log lines of one request.
    pub request_id: Uuid,
    /// The authenticated account, if any.
    pub account_id: Option<String>,
    /// The caller's role.
    pub role: AccountRole,
    /// Shops the account is a member of.
    pub shop_ids: Vec<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: Option<String>, role: AccountRole, shop_ids: Vec<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            account_id,
            role,
            shop_ids,
            request_time: Utc::now(),
        }
    }

    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::new(None, AccountRole::Anonymous, Vec::new())
    }

    /// Context for a platform administrator.
    pub fn admin(account_id: impl Into<String>) -> Self {
        Self::new(Some(account_id.into()), AccountRole::Admin, Vec::new())
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the caller belongs to the given shop.
    pub fn is_member_of(&self, shop_id: &str) -> bool {
        self.shop_ids.iter().any(|s| s == shop_id)
    }
}
