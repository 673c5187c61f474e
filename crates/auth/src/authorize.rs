//! The authorization evaluator.
//!
//! Every page, navigation entry and affordance in the dashboard funnels
//! through [`can_access`] instead of re-deriving role logic locally.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)

use thiserror::Error;

use retaildesk_core::DomainError;

use crate::{Action, AuthenticatedUser, Feature, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing '{action}' on '{feature}'")]
    Forbidden { feature: Feature, action: Action },
}

impl From<AuthzError> for DomainError {
    fn from(_: AuthzError) -> Self {
        DomainError::Unauthorized
    }
}

/// Decide whether `user` may perform `action` on `feature`.
///
/// Admins short-circuit to `true`; everyone else is exactly the permission
/// map. Adding a grant can therefore never revoke a previously allowed check.
pub fn can_access(user: &AuthenticatedUser, feature: Feature, action: Action) -> bool {
    match user.role {
        Role::Admin => true,
        Role::User => user.permissions.allows(feature, action),
    }
}

/// [`can_access`] as a guard, for call sites that propagate errors.
pub fn authorize(user: &AuthenticatedUser, feature: Feature, action: Action) -> Result<(), AuthzError> {
    if can_access(user, feature, action) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden { feature, action })
    }
}

/// Whether `user` may open permission management.
///
/// Deliberately wider than a plain `can_access` read check on paper but in
/// practice identical to it: admin OR a `read` grant on the `permissions`
/// feature. Permission management is delegable, not admin-only.
pub fn can_manage_permissions(user: &AuthenticatedUser) -> bool {
    user.role.is_admin() || user.permissions.allows(Feature::Permissions, Action::Read)
}

/// Navigation entries visible to `user`, in declaration order.
///
/// A feature renders iff the user can `read` it; the permissions entry uses
/// the delegation rule above.
pub fn visible_features(user: &AuthenticatedUser) -> Vec<Feature> {
    Feature::ALL
        .into_iter()
        .filter(|&feature| match feature {
            Feature::Permissions => can_manage_permissions(user),
            _ => can_access(user, feature, Action::Read),
        })
        .collect()
}
