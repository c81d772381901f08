//! Gateway request bodies and response types

use super::requests::{
    DirectPaymentRequest, InitiatePaymentRequest, PayoutTransferRequest, TransactionStatusRequest,
};
use crate::crypto::SignedToken;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway reply that carries a human-readable message on failure
pub trait GatewayReply: DeserializeOwned + Send {
    fn message(&self) -> &str;
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Body posted to `/initiate-payment`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentBody {
    pub id: String,
    pub amount: f64,
    pub reason: String,
    pub merchant_id: String,
    pub signed_token: SignedToken,
    pub success_redirect_url: String,
    pub failure_redirect_url: String,
    pub notify_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl InitiatePaymentBody {
    pub fn new(request: &InitiatePaymentRequest, merchant_id: &str, token: SignedToken) -> Self {
        Self {
            id: request.id.clone(),
            amount: request.amount,
            reason: request.payment_reason.clone(),
            merchant_id: merchant_id.to_string(),
            signed_token: token,
            success_redirect_url: request.success_redirect_url.clone(),
            failure_redirect_url: request.failure_redirect_url.clone(),
            notify_url: request.notify_url.clone(),
            cancel_redirect_url: non_empty(&request.cancel_redirect_url),
            phone_number: non_empty(&request.phone_number),
        }
    }
}

/// Body posted to `/direct-payment`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPaymentBody {
    pub id: String,
    pub amount: f64,
    pub reason: String,
    pub merchant_id: String,
    pub signed_token: SignedToken,
    pub phone_number: String,
    pub payment_method: String,
    pub notify_url: String,
}

impl DirectPaymentBody {
    pub fn new(request: &DirectPaymentRequest, merchant_id: &str, token: SignedToken) -> Self {
        Self {
            id: request.id.clone(),
            amount: request.amount,
            reason: request.payment_reason.clone(),
            merchant_id: merchant_id.to_string(),
            signed_token: token,
            phone_number: request.phone_number.clone(),
            payment_method: request.payment_method.clone(),
            notify_url: request.notify_url.clone(),
        }
    }
}

/// Body posted to `/payout-transfer`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransferBody {
    pub id: String,
    /// Always the merchant transaction id
    pub client_reference: String,
    pub amount: f64,
    pub reason: String,
    pub merchant_id: String,
    pub signed_token: SignedToken,
    pub receiver_account_number: String,
    pub notify_url: String,
    pub payment_method: String,
}

impl PayoutTransferBody {
    pub fn new(request: &PayoutTransferRequest, merchant_id: &str, token: SignedToken) -> Self {
        Self {
            id: request.id.clone(),
            client_reference: request.id.clone(),
            amount: request.amount,
            reason: request.payment_reason.clone(),
            merchant_id: merchant_id.to_string(),
            signed_token: token,
            receiver_account_number: request.phone_number.clone(),
            notify_url: request.notify_url.clone(),
            payment_method: request.payment_method.clone(),
        }
    }
}

/// Body posted to `/fetch-transaction-status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusBody {
    pub id: String,
    pub merchant_id: String,
    pub signed_token: SignedToken,
}

impl TransactionStatusBody {
    pub fn new(request: &TransactionStatusRequest, merchant_id: &str, token: SignedToken) -> Self {
        Self {
            id: request.id.clone(),
            merchant_id: merchant_id.to_string(),
            signed_token: token,
        }
    }
}

/// Successful `/initiate-payment` reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUrlResponse {
    pub url: String,
}

/// Error envelope, used both by the gateway and by the relay's own replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.to_string()),
        }
    }
}

/// Reply to direct payments and payouts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectPaymentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl GatewayReply for DirectPaymentResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Reply to a transaction status lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
}

impl GatewayReply for TransactionStatusResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Transaction record as reported by the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub status: String,
    pub payment_method: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
