use thiserror::Error;

/// Transport-level error surfaced unchanged to callers.
///
/// The adapter never retries and never swallows: every failure reaches the
/// caller as one of these, with the raw response body preserved for the
/// status-code conventions (401/402 discriminators) the rest of the client
/// relies on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Raw response body for non-2xx answers.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accessors() {
        let err = ApiError::Status {
            status: 401,
            body: r#"{"invalid":"email"}"#.to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.body(), Some(r#"{"invalid":"email"}"#));

        assert_eq!(ApiError::Network("refused".into()).status(), None);
    }
}
