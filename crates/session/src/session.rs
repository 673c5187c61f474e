use retaildesk_auth::AuthenticatedUser;

/// Read-only snapshot of the in-memory session.
///
/// Invariant: `user` and `access_token` are set and cleared together. The
/// single-writer discipline in [`crate::SessionManager`] is what upholds it;
/// readers may assume it at every observable point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<AuthenticatedUser>,
    pub access_token: Option<String>,
    /// True until the startup refresh attempt resolves, success or failure.
    pub loading: bool,
}

impl Session {
    pub(crate) fn initializing() -> Self {
        Self {
            user: None,
            access_token: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else if self.loading {
            SessionState::Initializing
        } else {
            SessionState::Anonymous
        }
    }
}

/// The three session states.
///
/// `Initializing` is only ever left, never re-entered: once the startup
/// refresh resolves, the session is either `Authenticated` or `Anonymous`
/// for the rest of the process lifetime (modulo login/logout between the
/// latter two).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Authenticated,
    Anonymous,
}
