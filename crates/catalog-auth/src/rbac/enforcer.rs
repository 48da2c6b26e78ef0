//! RBAC enforcement logic: checks whether a role holds a required permission.

use catalog_core::error::AppError;
use catalog_entity::account::AccountRole;

use super::policies::{CatalogPermission, RbacPolicies};

/// Enforces role-based access control for catalog operations.
#[derive(Debug, Clone)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Checks whether the given role has the required permission.
    ///
    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require_permission(
        &self,
        role: &AccountRole,
        permission: &CatalogPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            tracing::debug!(%role, ?permission, "Permission denied by policy");
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission (returns bool).
    pub fn has_permission(&self, role: &AccountRole, permission: &CatalogPermission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

impl Default for RbacEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
