//! SantimPay gateway client
//!
//! The client owns the merchant signing key and turns each merchant request
//! into a signed gateway call: build the claims, sign them, embed the token in
//! the request body as `signedToken`, POST it, and decode the reply.
//!
//! # Examples
//!
//! ```no_run
//! use santimpay_relay::config::GatewayConfig;
//! use santimpay_relay::gateway::{GatewayClient, PaymentGateway};
//! use santimpay_relay::types::TransactionStatusRequest;
//!
//! # async fn example(pem: &str) -> santimpay_relay::Result<()> {
//! let client = GatewayClient::new(GatewayConfig::new("M123", pem))?;
//!
//! let status = client
//!     .transaction_status(&TransactionStatusRequest::new("TX1"))
//!     .await?;
//! println!("Transaction status: {}", status.status);
//! # Ok(())
//! # }
//! ```

use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::crypto::{self, PrivateKeyHandle, SignedToken};
use crate::types::{
    DirectPaymentBody, DirectPaymentRequest, DirectPaymentResponse, ErrorResponse, GatewayReply,
    InitiatePaymentBody, InitiatePaymentRequest, OperationKind, PaymentUrlResponse,
    PayoutTransferBody, PayoutTransferRequest, SignedOperation, TransactionStatusBody,
    TransactionStatusRequest, TransactionStatusResponse,
};
use crate::{GatewayError, Result};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;


/// Operations the relay can forward to the gateway
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a hosted checkout and return the payment page URL
    async fn initiate_payment(&self, request: &InitiatePaymentRequest) -> Result<String>;

    /// Charge a payer's wallet directly
    async fn direct_payment(&self, request: &DirectPaymentRequest)
        -> Result<DirectPaymentResponse>;

    /// Send money from the merchant to a customer
    async fn payout_transfer(
        &self,
        request: &PayoutTransferRequest,
    ) -> Result<DirectPaymentResponse>;

    /// Look up a transaction
    async fn transaction_status(
        &self,
        request: &TransactionStatusRequest,
    ) -> Result<TransactionStatusResponse>;
}

/// HTTP client for the SantimPay gateway
#[derive(Clone)]
pub struct GatewayClient {
    /// Base URL of the gateway, without a trailing slash
    base_url: String,
    merchant_id: String,
    signing_key: Arc<PrivateKeyHandle>,
    clock: Arc<dyn Clock>,
    client: Client,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("base_url", &self.base_url)
            .field("merchant_id", &self.merchant_id)
            .field("signing_key", &self.signing_key)
            .finish()
    }
}

impl GatewayClient {
    /// Create a new gateway client, loading the merchant key once
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let signing_key = crypto::load_private_key(&config.private_key_pem)?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.resolved_base_url().to_string(),
            merchant_id: config.merchant_id,
            signing_key: Arc::new(signing_key),
            clock: Arc::new(SystemClock),
            client,
        })
    }

    /// Replace the time source used for the `generated` claim
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Get the base URL of this gateway
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Build and sign the claims for one operation as of now
    pub fn sign_operation<O: SignedOperation>(&self, operation: &O) -> Result<SignedToken> {
        let payload = operation.claims(&self.merchant_id, self.clock.now());
        tracing::debug!("Signing {} claims", payload.kind());
        crypto::sign(&payload, &self.signing_key)
    }

    async fn post<B: Serialize>(&self, kind: OperationKind, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, kind.endpoint());
        tracing::debug!("Sending {} request to: {}", kind, url);

        let response = self.client.post(url).json(body).send().await?;
        Ok(response)
    }

    /// Decode a reply that carries a body on both success and failure
    async fn decode_reply<T: GatewayReply>(
        &self,
        kind: OperationKind,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        let reply: T = serde_json::from_slice(&body)?;

        if !status.is_success() {
            tracing::warn!(
                "Gateway {} failed with status {}: {}",
                kind,
                status,
                reply.message()
            );
            return Err(GatewayError::rejected(status.as_u16(), reply.message()));
        }

        Ok(reply)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for GatewayClient {
    async fn initiate_payment(&self, request: &InitiatePaymentRequest) -> Result<String> {
        let token = self.sign_operation(request)?;
        let body = InitiatePaymentBody::new(request, &self.merchant_id, token);

        let response = self.post(OperationKind::InitiatePayment, &body).await?;
        let status = response.status();

        if !status.is_success() {
            let response_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&response_body)
                .ok()
                .map(|error| error.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| format!("payment initiation failed with status: {}", status));
            tracing::error!(
                "Gateway initiate-payment failed with status {}: {}",
                status,
                message
            );
            return Err(GatewayError::rejected(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let payment: PaymentUrlResponse = serde_json::from_slice(&body)?;
        Ok(payment.url)
    }

    async fn direct_payment(
        &self,
        request: &DirectPaymentRequest,
    ) -> Result<DirectPaymentResponse> {
        let token = self.sign_operation(request)?;
        let body = DirectPaymentBody::new(request, &self.merchant_id, token);

        let response = self.post(OperationKind::DirectPayment, &body).await?;
        self.decode_reply(OperationKind::DirectPayment, response).await
    }

    async fn payout_transfer(
        &self,
        request: &PayoutTransferRequest,
    ) -> Result<DirectPaymentResponse> {
        let token = self.sign_operation(request)?;
        let body = PayoutTransferBody::new(request, &self.merchant_id, token);

        let response = self.post(OperationKind::PayoutTransfer, &body).await?;
        self.decode_reply(OperationKind::PayoutTransfer, response).await
    }

    async fn transaction_status(
        &self,
        request: &TransactionStatusRequest,
    ) -> Result<TransactionStatusResponse> {
        let token = self.sign_operation(request)?;
        let body = TransactionStatusBody::new(request, &self.merchant_id, token);

        let response = self.post(OperationKind::TransactionStatus, &body).await?;
        self.decode_reply(OperationKind::TransactionStatus, response).await
    }
}
