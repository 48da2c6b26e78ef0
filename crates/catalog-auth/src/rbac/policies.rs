//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use catalog_entity::account::AccountRole;

/// Resource name for product operations.
pub const PRODUCTS_RESOURCE: &str = "catalog:products";

/// A catalog permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPermission {
    /// List and read products, including hidden and archived ones.
    ProductsRead,
    /// Create products.
    ProductsCreate,
    /// Update products.
    ProductsUpdate,
    /// Archive or restore products.
    ProductsArchive,
}

impl CatalogPermission {
    /// Map a `(resource, action)` pair onto a permission.
    ///
    /// Returns `None` for pairs no policy knows about.
    pub fn from_resource_action(resource: &str, action: &str) -> Option<Self> {
        match (resource, action) {
            (PRODUCTS_RESOURCE, "read") => Some(Self::ProductsRead),
            (PRODUCTS_RESOURCE, "create") => Some(Self::ProductsCreate),
            (PRODUCTS_RESOURCE, "update") => Some(Self::ProductsUpdate),
            (PRODUCTS_RESOURCE, "archive") => Some(Self::ProductsArchive),
            _ => None,
        }
    }
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<AccountRole, HashSet<CatalogPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Customers and anonymous callers only see products through the storefront
        policies.insert(AccountRole::Anonymous, HashSet::new());
        policies.insert(AccountRole::Customer, HashSet::new());

        let manager: HashSet<CatalogPermission> = [
            CatalogPermission::ProductsRead,
            CatalogPermission::ProductsCreate,
            CatalogPermission::ProductsUpdate,
        ]
        .into_iter()
        .collect();
        policies.insert(AccountRole::Manager, manager);

        let admin: HashSet<CatalogPermission> = [
            CatalogPermission::ProductsRead,
            CatalogPermission::ProductsCreate,
            CatalogPermission::ProductsUpdate,
            CatalogPermission::ProductsArchive,
        ]
        .into_iter()
        .collect();
        policies.insert(AccountRole::Admin, admin);

        Self { policies }
    }

    /// Grant an additional permission to a role.
    pub fn grant(&mut self, role: AccountRole, permission: CatalogPermission) {
        self.policies.entry(role).or_default().insert(permission);
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &AccountRole) -> HashSet<CatalogPermission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &AccountRole, permission: &CatalogPermission) -> bool {
        self.policies
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let policies = RbacPolicies::new();
        assert!(policies.has_permission(&AccountRole::Admin, &CatalogPermission::ProductsArchive));
        assert!(policies.has_permission(&AccountRole::Manager, &CatalogPermission::ProductsRead));
        assert!(!policies.has_permission(&AccountRole::Manager, &CatalogPermission::ProductsArchive));
        assert!(!policies.has_permission(&AccountRole::Customer, &CatalogPermission::ProductsRead));
        assert!(policies.permissions_for_role(&AccountRole::Anonymous).is_empty());
    }

    #[test]
    fn test_grant() {
        let mut policies = RbacPolicies::new();
        policies.grant(AccountRole::Customer, CatalogPermission::ProductsRead);
        assert!(policies.has_permission(&AccountRole::Customer, &CatalogPermission::ProductsRead));
    }

    #[test]
    fn test_resource_action_mapping() {
        assert_eq!(
            CatalogPermission::from_resource_action(PRODUCTS_RESOURCE, "read"),
            Some(CatalogPermission::ProductsRead)
        );
        assert_eq!(CatalogPermission::from_resource_action("catalog:tags", "read"), None);
        assert_eq!(CatalogPermission::from_resource_action(PRODUCTS_RESOURCE, "purge"), None);
    }
}
