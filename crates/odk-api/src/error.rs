use std::fmt;

/// Errors an [`OrderApi`](crate::OrderApi) implementation may return.
///
/// The order form collapses every variant into one user-facing failure
/// message; the variants exist so the detail can be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or transport failure (connection refused, TLS, DNS, ...).
    Transport(String),
    /// The server answered with a non-2xx status.
    Status { code: u16, body: String },
    /// A 2xx response body did not match the expected schema.
    Decode(String),
}

impl ApiError {
    /// HTTP status code, when the server got far enough to send one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status { code, body } if body.is_empty() => {
                write!(f, "http error status={code}")
            }
            ApiError::Status { code, body } => write!(f, "http error status={code}: {body}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_status_with_body() {
        let err = ApiError::Status {
            code: 400,
            body: r#"{"customer_id":["invalid"]}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"http error status=400: {"customer_id":["invalid"]}"#
        );
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn display_status_without_body() {
        let err = ApiError::Status {
            code: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "http error status=503");
    }

    #[test]
    fn display_transport() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");
        assert_eq!(err.status_code(), None);
    }
}
