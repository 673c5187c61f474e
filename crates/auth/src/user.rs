use serde::{Deserialize, Serialize};

use crate::{PermissionMap, Role};

/// The authenticated user as delivered by the backend on login/refresh.
///
/// This is a read model: the client never mutates it locally. Permission
/// changes arrive only through a fresh copy from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Missing on admin payloads; an admin needs no enumerated grants.
    #[serde(default)]
    pub permissions: PermissionMap,
}
