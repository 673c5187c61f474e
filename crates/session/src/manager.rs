use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::watch;

use retaildesk_auth::{AuthenticatedUser, PermissionMap, Role};
use retaildesk_client::{ApiClient, ApiError};

use crate::error::{LoginError, RegisterError, RoleUpdateError};
use crate::session::{Session, SessionState};

/// Successful auth payload (`/auth/login`, `/auth/register`, `/auth/refresh`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    jwt_token: String,
    user: AuthenticatedUser,
}

/// 401 body from the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginRejection {
    invalid: Option<String>,
}

/// `PUT /role` response envelope.
#[derive(Debug, Deserialize)]
struct RoleResponse {
    user: AuthenticatedUser,
}

/// Registration form fields.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Owner of the session value and the only writer to it.
///
/// Readers take snapshots via [`SessionManager::current`] or subscribe for
/// change notifications; mutation happens on discrete completions (refresh,
/// login, logout), never concurrently with itself.
pub struct SessionManager {
    client: Arc<ApiClient>,
    state: watch::Sender<Session>,
    refresh_started: AtomicBool,
}

impl SessionManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self {
            client,
            state,
            refresh_started: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Read-only snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().state()
    }

    /// Subscribe to session changes (the "context" the view layer mounts).
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Store the authenticated user and token, and install the bearer header
    /// on the HTTP adapter. Cannot fail.
    pub fn set_auth(&self, user: AuthenticatedUser, token: &str) {
        self.client.set_bearer_token(token);
        self.state.send_replace(Session {
            user: Some(user),
            access_token: Some(token.to_string()),
            loading: false,
        });
    }

    /// Clear user and token together and remove the bearer header. Idempotent.
    pub fn clear_auth(&self) {
        self.client.clear_bearer_token();
        self.state.send_replace(Session {
            user: None,
            access_token: None,
            loading: false,
        });
    }

    /// Startup protocol: one silent refresh per process lifetime.
    ///
    /// Re-entrant calls (a second mount, a race between views) are no-ops.
    /// Whatever happens, the session leaves `Initializing`: success installs
    /// the refreshed identity, every failure shape (network, 401, malformed
    /// payload) falls back to anonymous.
    pub async fn start(&self) {
        if self.refresh_started.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.client.post_empty::<AuthResponse>("/auth/refresh").await {
            Ok(auth) => {
                tracing::info!(email = %auth.user.email, "session restored by silent refresh");
                self.set_auth(auth.user, &auth.jwt_token);
            }
            Err(err) => {
                tracing::debug!(error = %err, "silent refresh failed; starting anonymous");
                self.clear_auth();
            }
        }
    }

    /// Explicit login. On success the session becomes authenticated; a 401
    /// names the invalid field; any other failure is surfaced unchanged.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, LoginError> {
        let body = json!({ "email": email, "password": password });

        match self.client.post_json::<_, AuthResponse>("/auth/login", &body).await {
            Ok(auth) => {
                self.set_auth(auth.user.clone(), &auth.jwt_token);
                Ok(auth.user)
            }
            Err(err) if err.is_unauthorized() => {
                let field = err
                    .body()
                    .and_then(|body| serde_json::from_str::<LoginRejection>(body).ok())
                    .and_then(|rejection| rejection.invalid);

                match field.as_deref() {
                    Some("email") => Err(LoginError::InvalidEmail),
                    Some("password") => Err(LoginError::InvalidPassword),
                    // A 401 we cannot attribute to a field stays generic.
                    _ => Err(LoginError::Api(err)),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "login request failed");
                Err(LoginError::Api(err))
            }
        }
    }

    /// Create an account. The backend signals a duplicate email with a 401.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<AuthenticatedUser, RegisterError> {
        match self
            .client
            .post_json::<_, AuthResponse>("/auth/register", request)
            .await
        {
            Ok(auth) => {
                self.set_auth(auth.user.clone(), &auth.jwt_token);
                Ok(auth.user)
            }
            Err(err) if err.is_unauthorized() => Err(RegisterError::EmailTaken),
            Err(err) => Err(RegisterError::Api(err)),
        }
    }

    /// Replace another user's permission map (`PUT /role`).
    ///
    /// Does not touch the local session: the target is someone else, and a
    /// 401 here means "unknown target email", not "our session expired".
    pub async fn update_permissions(
        &self,
        email: &str,
        permissions: &PermissionMap,
    ) -> Result<AuthenticatedUser, RoleUpdateError> {
        let body = json!({ "email": email, "permissions": permissions });

        match self.client.put_json::<_, RoleResponse>("/role", &body).await {
            Ok(response) => Ok(response.user),
            Err(err) if err.status() == Some(401) => Err(RoleUpdateError::UnknownEmail),
            Err(err) if err.status() == Some(402) => Err(RoleUpdateError::AdminTarget),
            Err(err) => Err(RoleUpdateError::Api(err)),
        }
    }

    /// Local logout: no server call, the route guard handles the redirect.
    pub fn logout(&self) {
        tracing::info!("logging out");
        self.clear_auth();
    }

    /// Drop to anonymous when any data call reports the session invalid.
    pub fn expire_if_unauthorized(&self, err: &ApiError) {
        if err.is_unauthorized() && self.current().is_authenticated() {
            tracing::info!("backend rejected the session; clearing auth");
            self.clear_auth();
        }
    }
}

impl core::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state.borrow().state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use retaildesk_client::ApiConfig;

    fn manager() -> SessionManager {
        let client = ApiClient::new(ApiConfig::new("http://127.0.0.1:1")).unwrap();
        SessionManager::new(Arc::new(client))
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            role: Role::User,
            permissions: PermissionMap::new(),
        }
    }

    #[test]
    fn set_auth_installs_token_on_client() {
        let manager = manager();
        manager.set_auth(test_user(), "tok-1");

        assert_eq!(manager.state(), SessionState::Authenticated);
        assert!(manager.client().has_bearer_token());
        assert_eq!(manager.current().access_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn clear_auth_is_idempotent_and_removes_token() {
        let manager = manager();
        manager.set_auth(test_user(), "tok-1");

        manager.clear_auth();
        manager.clear_auth();

        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(!manager.client().has_bearer_token());
    }

    #[test]
    fn expire_only_fires_on_401_against_an_authenticated_session() {
        let manager = manager();
        manager.set_auth(test_user(), "tok-1");

        manager.expire_if_unauthorized(&ApiError::Status {
            status: 500,
            body: String::new(),
        });
        assert_eq!(manager.state(), SessionState::Authenticated);

        manager.expire_if_unauthorized(&ApiError::Status {
            status: 401,
            body: String::new(),
        });
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[test]
    fn subscribers_observe_transitions() {
        let manager = manager();
        let rx = manager.subscribe();
        assert_eq!(rx.borrow().state(), SessionState::Initializing);

        manager.set_auth(test_user(), "tok-1");
        assert_eq!(rx.borrow().state(), SessionState::Authenticated);

        manager.logout();
        assert_eq!(rx.borrow().state(), SessionState::Anonymous);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: for any sequence of set_auth/clear_auth calls, user and
        /// access_token are always both set or both absent, and the client's
        /// bearer header agrees with them.
        #[test]
        fn user_and_token_move_together(ops in prop::collection::vec(any::<bool>(), 0..32)) {
            let manager = manager();

            for (i, set) in ops.into_iter().enumerate() {
                if set {
                    manager.set_auth(test_user(), &format!("tok-{i}"));
                } else {
                    manager.clear_auth();
                }

                let session = manager.current();
                prop_assert_eq!(session.user.is_none(), session.access_token.is_none());
                prop_assert_eq!(
                    manager.client().has_bearer_token(),
                    session.access_token.is_some()
                );
            }
        }
    }
}
