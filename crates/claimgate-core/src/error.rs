//! Error types for Claimgate

use thiserror::Error;

/// Hint returned to the client when the `claims` parameter cannot be decoded.
pub const MALFORMED_CLAIMS_HINT: &str =
    "The OAuth 2.0 client included a malformed 'claims' parameter in the authorization request.";

/// Main error type for Claimgate operations
#[derive(Error, Debug)]
pub enum ClaimgateError {
    #[error("Malformed claims request: {source}")]
    MalformedClaimsRequest {
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClaimgateError {
    /// OAuth 2.0 error code this error is reported as
    pub fn error_code(&self) -> &'static str {
        match self {
            ClaimgateError::MalformedClaimsRequest { .. } => "invalid_request",
            ClaimgateError::Serialization(_) | ClaimgateError::Config(_) => "server_error",
        }
    }

    /// Client-facing hint, if the error has one
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ClaimgateError::MalformedClaimsRequest { .. } => Some(MALFORMED_CLAIMS_HINT),
            _ => None,
        }
    }

    /// Debug description including the underlying cause
    pub fn debug_description(&self) -> String {
        match self {
            ClaimgateError::MalformedClaimsRequest { source } => format!(
                "Error occurred attempting to parse the 'claims' parameter: {}.",
                source
            ),
            other => other.to_string(),
        }
    }

    /// Error body in the shape of an OAuth 2.0 error response
    pub fn to_protocol_json(&self) -> serde_json::Value {
        let description = match self.hint() {
            Some(hint) => format!("{} {}", hint, self.debug_description()),
            None => self.debug_description(),
        };

        serde_json::json!({
            "error": self.error_code(),
            "error_description": description,
        })
    }
}

impl From<serde_json::Error> for ClaimgateError {
    fn from(err: serde_json::Error) -> Self {
        ClaimgateError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_claims_maps_to_invalid_request() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ClaimgateError::MalformedClaimsRequest { source };

        assert_eq!(err.error_code(), "invalid_request");
        assert_eq!(err.hint(), Some(MALFORMED_CLAIMS_HINT));

        let body = err.to_protocol_json();
        assert_eq!(body["error"], "invalid_request");
        let description = body["error_description"].as_str().unwrap();
        assert!(description.starts_with(MALFORMED_CLAIMS_HINT));
        assert!(description.contains("'claims' parameter"));
    }

    #[test]
    fn test_config_error_has_no_hint() {
        let err = ClaimgateError::Config("missing file".to_string());
        assert_eq!(err.error_code(), "server_error");
        assert!(err.hint().is_none());
        assert_eq!(err.to_protocol_json()["error_description"], "Configuration error: missing file");
    }
}
