use retaildesk_client::ApiError;
use thiserror::Error;

/// Login failure.
///
/// A 401 from the login endpoint names the offending field in its body
/// (`{"invalid": "email" | "password"}`); the caller gets that distinction
/// instead of a generic error so forms can flag the right input.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("invalid email")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Registration failure. 401 from the register endpoint means the email is
/// already taken; that status convention is the backend's, preserved here.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("email already registered")]
    EmailTaken,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Permission-update failure. The backend discriminates with status codes:
/// 401 = no account with that email, 402 = target is an admin and cannot be
/// permission-scoped.
#[derive(Debug, Error)]
pub enum RoleUpdateError {
    #[error("no account with that email")]
    UnknownEmail,

    #[error("admins cannot be permission-scoped")]
    AdminTarget,

    #[error(transparent)]
    Api(#[from] ApiError),
}
