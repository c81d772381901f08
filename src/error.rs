//! Error types for the SantimPay relay

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors produced while loading keys, signing claims or talking to the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The key text is not a PEM block
    #[error("Malformed private key: {0}")]
    MalformedKey(String),

    /// The PEM body is neither a SEC1 nor a PKCS#8 P-256 key
    #[error("Unable to parse private key: {0}")]
    UnparsableKey(String),

    /// PKCS#8 unwrapped successfully but holds a non elliptic-curve key
    #[error("Private key is not an elliptic-curve key (algorithm {algorithm})")]
    WrongKeyType { algorithm: String },

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The gateway answered with a non-success status
    #[error("Gateway rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Socket bind or accept failure in the relay server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a gateway rejection error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether this error came from loading the merchant key
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedKey(_) | Self::UnparsableKey(_) | Self::WrongKeyType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let err: GatewayError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use").into();
        assert!(matches!(err, GatewayError::Io(_)));
        assert!(!err.is_key_error());
        assert_eq!(err.to_string(), "I/O error: address in use");
    }

    #[test]
    fn test_key_error_classification() {
        assert!(GatewayError::MalformedKey("x".into()).is_key_error());
        assert!(GatewayError::UnparsableKey("x".into()).is_key_error());
        assert!(GatewayError::WrongKeyType {
            algorithm: "1.2.840.113549.1.1.1".into()
        }
        .is_key_error());
        assert!(!GatewayError::SigningFailed("x".into()).is_key_error());
        assert!(!GatewayError::config("x").is_key_error());
    }

    #[test]
    fn test_rejected_display() {
        let err = GatewayError::rejected(401, "invalid token");
        assert_eq!(
            err.to_string(),
            "Gateway rejected request with status 401: invalid token"
        );
    }
}
