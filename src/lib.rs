//! # SantimPay Relay
//!
//! A merchant-side relay for the SantimPay payment gateway. Every gateway call
//! must carry a `signedToken`: an ES256 JWS over a small per-operation claim
//! payload, signed with the merchant's P-256 private key. This crate loads that
//! key, builds and signs the claims, and forwards the requests.
//!
//! ## Features
//!
//! - **Key loading**: P-256 private keys in SEC1 (`EC PRIVATE KEY`) or PKCS#8 PEM
//! - **Claim payloads**: typed claims for initiate-payment, direct-payment,
//!   payout-transfer and transaction-status
//! - **ES256 signing**: compact JWS tokens accepted by the gateway
//! - **Gateway client**: async HTTP client for the production and test gateways
//! - **Relay server**: an Axum HTTP API in front of the client (`axum` feature, default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use santimpay_relay::{
//!     config::GatewayConfig,
//!     gateway::{GatewayClient, PaymentGateway},
//!     types::InitiatePaymentRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pem = std::fs::read_to_string("merchant_key.pem")?;
//!     let client = GatewayClient::new(GatewayConfig::new("M123", pem))?;
//!
//!     let request = InitiatePaymentRequest {
//!         id: "ORD-1".to_string(),
//!         amount: 100.50,
//!         payment_reason: "order-42".to_string(),
//!         success_redirect_url: "https://merchant.example.com/ok".to_string(),
//!         failure_redirect_url: "https://merchant.example.com/fail".to_string(),
//!         notify_url: "https://merchant.example.com/notify".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let payment_url = client.initiate_payment(&request).await?;
//!     println!("Redirect the payer to {}", payment_url);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`crypto`**: key loading and ES256 token signing
//! - **`types`**: claim payloads, merchant requests, gateway bodies and replies
//! - **`gateway`**: the outbound gateway client
//! - **`server`**: the inbound relay API
//! - **`config`**: environment-driven configuration
//! - **`clock`**: time source for the `generated` claim
//! - **`error`**: error handling

pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod gateway;
pub mod types;

#[cfg(feature = "axum")]
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{GatewayConfig, RelayConfig};
pub use crypto::{load_private_key, sign, PrivateKeyHandle, SignedToken};
pub use error::{GatewayError, Result};
pub use gateway::{GatewayClient, PaymentGateway};
pub use types::*;

/// Current version of the relay
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_end_to_end_signing() {
        let key = load_private_key(test_support::EC_PKCS8_PEM).unwrap();
        let request = InitiatePaymentRequest {
            amount: 100.50,
            payment_reason: "order-42".to_string(),
            ..Default::default()
        };

        let token = sign(&request.claims("M123", 1_700_000_000), &key).unwrap();

        assert!(test_support::verify_token(
            token.as_str(),
            &key.verifying_key()
        ));
        assert_eq!(
            test_support::decode_segment(token.as_str(), 1),
            serde_json::json!({
                "amount": 100.50,
                "paymentReason": "order-42",
                "merchantId": "M123",
                "generated": 1_700_000_000
            })
        );
    }
}
