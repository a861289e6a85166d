//! Error types for configuration, signing and remote calls

use reqwest::StatusCode;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, reported before any remote call is made
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OCI config file not found at {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to read OCI config file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile '{0}' not found in OCI config file")]
    ProfileNotFound(String),

    #[error("Profile '{profile}' is missing required keys: {}", .keys.join(", "))]
    MissingKeys {
        profile: String,
        keys: Vec<&'static str>,
    },

    #[error("Missing env var: {0}")]
    MissingEnv(String),

    #[error("Could not determine the home directory")]
    NoHomeDir,
}

impl ConfigError {
    /// Follow-up advice printed under the diagnostic, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConfigError::ConfigFileNotFound(_) => {
                Some("Create it via OCI Console instructions or use oci setup config.")
            }
            _ => None,
        }
    }
}

/// Problems loading the API signing key
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Failed to read private key {path:?}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Private key is encrypted but no pass_phrase is configured")]
    PassphraseRequired,

    #[error("Failed to decrypt private key: {0}")]
    Decrypt(String),

    #[error("Unsupported or malformed private key: {0}")]
    InvalidKey(String),
}

/// Errors returned by the OCI service clients
#[derive(Debug, Error)]
pub enum OciError {
    #[error("Service error {status} ({code}): {message} [opc-request-id: {}]", .opc_request_id.as_deref().unwrap_or("-"))]
    Service {
        status: StatusCode,
        code: String,
        message: String,
        opc_request_id: Option<String>,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl OciError {
    /// HTTP status of a service error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            OciError::Service { status, .. } => Some(*status),
            OciError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Build a service error from a non-success response body
    pub(crate) fn from_response(
        status: StatusCode,
        opc_request_id: Option<String>,
        body: &str,
    ) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            code: Option<String>,
            #[serde(default)]
            message: Option<String>,
        }

        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (code, message) = match parsed {
            Some(b) => (
                b.code.unwrap_or_else(|| "Unknown".to_string()),
                b.message.unwrap_or_else(|| body.to_string()),
            ),
            None => ("Unknown".to_string(), body.to_string()),
        };

        OciError::Service {
            status,
            code,
            message,
            opc_request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_parses_json_body() {
        let err = OciError::from_response(
            StatusCode::NOT_FOUND,
            Some("req-1".to_string()),
            r#"{"code": "BucketNotFound", "message": "Either the bucket does not exist or you are not authorized"}"#,
        );
        assert!(err.is_not_found());
        match err {
            OciError::Service { code, message, opc_request_id, .. } => {
                assert_eq!(code, "BucketNotFound");
                assert!(message.starts_with("Either the bucket"));
                assert_eq!(opc_request_id.as_deref(), Some("req-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_service_error_non_json_body() {
        let err = OciError::from_response(StatusCode::BAD_GATEWAY, None, "upstream down");
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        let text = err.to_string();
        assert!(text.contains("502"));
        assert!(text.contains("upstream down"));
        assert!(text.contains("[opc-request-id: -]"));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::MissingEnv("OCI_COMPARTMENT_OCID".to_string());
        assert_eq!(err.to_string(), "Missing env var: OCI_COMPARTMENT_OCID");
        assert!(err.hint().is_none());

        let err = ConfigError::ConfigFileNotFound(PathBuf::from("/home/me/.oci/config"));
        assert_eq!(err.to_string(), "OCI config file not found at /home/me/.oci/config");
        assert!(err.hint().unwrap().contains("oci setup config"));

        let err = ConfigError::MissingKeys {
            profile: "DEFAULT".to_string(),
            keys: vec!["fingerprint", "region"],
        };
        assert_eq!(
            err.to_string(),
            "Profile 'DEFAULT' is missing required keys: fingerprint, region"
        );
    }
}
