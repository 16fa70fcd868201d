//! Error types for the Lexware API client.
//!
//! # Design
//! Provider rejections (any status outside `200..300`) are carried verbatim in
//! `ApiError`: the numeric status plus the raw response body, unparsed. The
//! handful of statuses callers routinely branch on get discriminator methods
//! instead of dedicated variants, so no status is ever lost to a catch-all.
//! Everything else is either a local construction failure, a transport
//! failure, or a body that did not decode into the expected shape.

use thiserror::Error;

/// A non-2xx response from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexware API error (status {status}): {body}")]
pub struct ApiError {
    /// HTTP status code returned by the provider.
    pub status: u16,
    /// Raw response body text.
    pub body: String,
}

impl ApiError {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 404: the resource does not exist (or was already deleted).
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// 409: usually a stale `version` on update.
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }

    /// 429: the provider's rate limit was hit. Not retried by the client.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// 401: the API key is missing, invalid or revoked.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// The client configuration is unusable (missing API key, bad base URL).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// DNS, connect, timeout, TLS or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a status outside `200..300`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be deserialized into the expected type.
    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Local file or writer failure while uploading or saving a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The provider rejection, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a provider rejection.
    pub fn status(&self) -> Option<u16> {
        self.api().map(|err| err.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(ApiError::is_not_found)
    }

    pub fn is_conflict(&self) -> bool {
        self.api().is_some_and(ApiError::is_conflict)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.api().is_some_and(ApiError::is_rate_limited)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.api().is_some_and(ApiError::is_unauthorized)
    }

    /// True for failures below HTTP: DNS, connect, timeout, body read.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_match_status() {
        assert!(ApiError::new(404, "").is_not_found());
        assert!(ApiError::new(409, "").is_conflict());
        assert!(ApiError::new(429, "").is_rate_limited());
        assert!(ApiError::new(401, "").is_unauthorized());

        let err = ApiError::new(500, "boom");
        assert!(!err.is_not_found());
        assert!(!err.is_conflict());
        assert!(!err.is_rate_limited());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn error_forwards_discriminators() {
        let err = Error::from(ApiError::new(409, r#"{"message":"stale"}"#));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.api().unwrap().body, r#"{"message":"stale"}"#);
    }

    #[test]
    fn non_api_errors_have_no_status() {
        let err = Error::Config("API key is required".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
        assert!(!err.is_transport());
    }

    #[test]
    fn display_includes_status_and_body() {
        let err = Error::from(ApiError::new(422, "invalid voucher date"));
        assert_eq!(
            err.to_string(),
            "Lexware API error (status 422): invalid voucher date"
        );
    }

    #[test]
    fn decode_error_keeps_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Decode {
            source,
            body: "not json".to_string(),
        };
        assert!(err.to_string().starts_with("failed to decode response body"));
        assert!(matches!(err, Error::Decode { ref body, .. } if body == "not json"));
    }
}
