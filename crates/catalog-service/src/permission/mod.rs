//! Permission checks consumed by the product service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use catalog_auth::rbac::{CatalogPermission, RbacEnforcer};
use catalog_core::error::AppError;
use catalog_core::result::AppResult;

use crate::context::RequestContext;

/// Decides whether the caller may perform `action` on `resource` for the given shops.
#[async_trait]
pub trait PermissionValidator: Send + Sync + 'static {
    /// Returns `Ok(())` when allowed, or an authorization error.
    async fn validate_permissions(
        &self,
        ctx: &RequestContext,
        resource: &str,
        action: &str,
        shop_ids: &[String],
    ) -> AppResult<()>;
}

/// Validates permissions with role policies plus shop membership.
///
/// Admins are not scoped to shops; every other role must belong to each
/// requested shop.
#[derive(Debug, Clone)]
pub struct RbacPermissionValidator {
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl RbacPermissionValidator {
    /// Creates a new validator.
    pub fn new(rbac: Arc<RbacEnforcer>) -> Self {
        Self { rbac }
    }
}

#[async_trait]
impl PermissionValidator for RbacPermissionValidator {
    async fn validate_permissions(
        &self,
        ctx: &RequestContext,
        resource: &str,
        action: &str,
        shop_ids: &[String],
    ) -> AppResult<()> {
        let permission = CatalogPermission::from_resource_action(resource, action)
            .ok_or_else(|| {
                AppError::authorization(format!("Unknown permission '{resource}:{action}'"))
            })?;

        self.rbac.require_permission(&ctx.role, &permission)?;

        if !ctx.is_admin() {
            if let Some(shop_id) = shop_ids.iter().find(|s| !ctx.is_member_of(s)) {
                warn!(
                    request_id = %ctx.request_id,
                    account_id = ?ctx.account_id,
                    shop_id = %shop_id,
                    "Access to shop denied"
                );
                return Err(AppError::authorization(format!(
                    "Not permitted to {action} {resource} in shop '{shop_id}'"
                )));
            }
        }

        Ok(())
    }
}
