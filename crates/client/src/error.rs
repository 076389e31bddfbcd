//! Error type for backend API operations.

/// Shown when the backend rejects a request without a usable body.
pub const GENERIC_BACKEND_ERROR: &str = "Error en el servidor";

/// Error type for requests against the hospital backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend returned HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Backend-provided message, or [`GENERIC_BACKEND_ERROR`].
        message: String,
    },
}

impl ApiError {
    /// The user-presentable message for this failure.
    ///
    /// Backend rejections carry the backend's own text; transport
    /// failures collapse to the generic message since their detail
    /// is diagnostic, not something a bedside visitor can act on.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Status { message, .. } => message,
            ApiError::Request(_) => GENERIC_BACKEND_ERROR,
        }
    }

    /// Whether the failure was a client-side request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display_includes_backend_message() {
        let err = ApiError::Status {
            status: 400,
            message: "Cama no encontrada".into(),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned HTTP 400: Cama no encontrada"
        );
        assert_eq!(err.user_message(), "Cama no encontrada");
    }

    #[test]
    fn request_error_collapses_to_generic_user_message() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ApiError::Request(req_err);
        assert_eq!(err.user_message(), GENERIC_BACKEND_ERROR);
        assert!(!err.is_timeout());
    }
}
