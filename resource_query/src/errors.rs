//! Error types for the query builder and its transport.

use serde_json::Value;

/// Errors raised while building a query or talking to the remote resource.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A parameter with this name was already appended. Use `update_variable` instead.
    #[error("Variable `{0}` already exists")]
    DuplicateVariable(String),
    /// No parameter with this name exists, so it cannot be updated.
    #[error("Variable `{0}` does not exist")]
    UnknownVariable(String),
    /// A query string could not be decoded back into constraints and parameters.
    #[error("Malformed query key `{0}`")]
    MalformedQuery(String),
    /// The request never produced a response (bad URL, network error, timeout).
    #[error("Request failed")]
    RequestFailed,
    /// The resource answered 422 or 500. `body` is the decoded response body.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, body: Value },
    /// The resource refused a delete with 403.
    #[error("Request forbidden (HTTP 403)")]
    Forbidden,
    /// The resource answered with a status the operation has no branch for.
    #[error("Unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },
    /// A 200 response did not carry the expected payload shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Returns the HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } | Error::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Error::Forbidden => Some(403),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::DuplicateVariable("tags".to_string());
        assert!(err.to_string().contains("tags"));
        assert!(err.to_string().contains("already exists"));

        let err = Error::UnknownVariable("tags".to_string());
        assert!(err.to_string().contains("does not exist"));

        let err = Error::Rejected {
            status: 422,
            body: serde_json::json!({"message": "invalid"}),
        };
        assert!(err.to_string().contains("422"));
    }

    #[test]
    fn status_passthrough() {
        assert_eq!(Error::Forbidden.status(), Some(403));
        assert_eq!(
            Error::Rejected {
                status: 500,
                body: Value::Null
            }
            .status(),
            Some(500)
        );
        assert_eq!(Error::RequestFailed.status(), None);
    }
}
