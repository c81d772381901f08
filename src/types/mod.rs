//! Core types for the SantimPay relay
//!
//! # Architecture
//!
//! - [`claims`] - Per-operation claim payloads signed into the request token
//! - [`requests`] - Merchant-facing operation requests and their validation
//! - [`gateway`] - Gateway request bodies and response envelopes
//! - [`environment`] - Production/test environment selection
//! - [`constants`] - Gateway base URLs and endpoint paths
//!
//! # Examples
//!
//! ```
//! use santimpay_relay::types::{ClaimPayload, OperationKind};
//!
//! let payload = ClaimPayload::transaction_status("TX1", "M123", 1_700_000_000);
//! assert_eq!(payload.kind(), OperationKind::TransactionStatus);
//!
//! let json = serde_json::to_value(&payload).unwrap();
//! assert_eq!(json["merId"], "M123");
//! ```

pub mod claims;
pub mod constants;
pub mod environment;
pub mod gateway;
pub mod requests;

// Re-export commonly used types
pub use claims::{
    ClaimPayload, MethodClaims, OperationKind, PaymentClaims, SignedOperation, StatusClaims,
};
pub use constants::{endpoints, PRODUCTION_BASE_URL, TEST_BASE_URL};
pub use environment::Environment;
pub use gateway::{
    DirectPaymentBody, DirectPaymentResponse, ErrorResponse, GatewayReply, InitiatePaymentBody,
    PaymentUrlResponse, PayoutTransferBody, Transaction, TransactionStatusBody,
    TransactionStatusResponse,
};
pub use requests::{
    DirectPaymentRequest, InitiatePaymentRequest, PayoutTransferRequest, TransactionStatusRequest,
};
