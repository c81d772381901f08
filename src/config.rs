//! Relay configuration

use crate::types::Environment;
use crate::{GatewayError, Result};
use std::time::Duration;

/// Default outbound request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default relay listen port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Gateway client configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Merchant identifier issued by SantimPay
    pub merchant_id: String,
    /// PEM text of the merchant P-256 private key
    pub private_key_pem: String,
    /// Target deployment
    pub environment: Environment,
    /// Overrides the environment's base URL when set
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("private_key_pem", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a new gateway config targeting the test environment
    pub fn new(merchant_id: impl Into<String>, private_key_pem: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            private_key_pem: private_key_pem.into(),
            environment: Environment::Test,
            base_url: None,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Set the target environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the gateway base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL requests are sent to, without a trailing slash
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Validate the gateway configuration
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(GatewayError::config("Merchant ID cannot be empty"));
        }

        if self.private_key_pem.trim().is_empty() {
            return Err(GatewayError::config("Private key cannot be empty"));
        }

        let base_url = url::Url::parse(self.resolved_base_url())
            .map_err(|e| GatewayError::config(format!("Invalid gateway base URL: {}", e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GatewayError::config(
                "Gateway base URL must start with http:// or https://",
            ));
        }

        Ok(())
    }
}

/// Full relay configuration: listen port plus gateway settings
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub server_port: u16,
    pub gateway: GatewayConfig,
}

impl RelayConfig {
    /// Load configuration from the process environment and an optional `.env` file
    pub fn from_env() -> Result<Self> {
        if dotenv::dotenv().is_err() {
            tracing::info!("No .env file found, using environment variables");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let server_port = match get("SERVER_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| GatewayError::config(format!("Invalid SERVER_PORT: {}", port)))?,
            None => DEFAULT_SERVER_PORT,
        };

        let merchant_id = get("SANTIMPAY_MERCHANT_ID")
            .ok_or_else(|| GatewayError::config("SANTIMPAY_MERCHANT_ID is required"))?;
        let private_key = get("SANTIMPAY_PRIVATE_KEY")
            .ok_or_else(|| GatewayError::config("SANTIMPAY_PRIVATE_KEY is required"))?;

        let test_mode = get("SANTIMPAY_TEST_MODE")
            .map(|value| value == "true" || value == "1")
            .unwrap_or(true);

        let mut gateway = GatewayConfig::new(merchant_id, private_key)
            .with_environment(Environment::from_test_mode(test_mode));

        if let Some(base_url) = get("SANTIMPAY_BASE_URL") {
            gateway = gateway.with_base_url(base_url);
        }

        if let Some(secs) = get("SANTIMPAY_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                GatewayError::config(format!("Invalid SANTIMPAY_TIMEOUT_SECS: {}", secs))
            })?;
            gateway = gateway.with_timeout(Duration::from_secs(secs));
        }

        gateway.validate()?;

        Ok(Self {
            server_port,
            gateway,
        })
    }

    /// Socket address the relay binds to
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}
