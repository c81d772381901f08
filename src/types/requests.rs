//! Merchant-facing operation requests

use super::claims::{ClaimPayload, OperationKind, SignedOperation};
use crate::{GatewayError, Result};
use serde::{Deserialize, Serialize};

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::invalid_request(format!(
            "field '{}' is required",
            field
        )));
    }
    Ok(())
}

fn require_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(GatewayError::invalid_request(
            "field 'amount' must be a positive number",
        ));
    }
    Ok(())
}

/// Request for a hosted checkout URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitiatePaymentRequest {
    /// Merchant transaction id
    pub id: String,
    pub amount: f64,
    pub payment_reason: String,
    pub success_redirect_url: String,
    pub failure_redirect_url: String,
    pub notify_url: String,
    /// Prefills the payer phone number on the checkout page
    pub phone_number: Option<String>,
    pub cancel_redirect_url: Option<String>,
}

impl InitiatePaymentRequest {
    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require_amount(self.amount)?;
        require("paymentReason", &self.payment_reason)?;
        require("successRedirectUrl", &self.success_redirect_url)?;
        require("failureRedirectUrl", &self.failure_redirect_url)?;
        require("notifyUrl", &self.notify_url)
    }
}

impl SignedOperation for InitiatePaymentRequest {
    const KIND: OperationKind = OperationKind::InitiatePayment;

    fn claims(&self, merchant_id: &str, now: i64) -> ClaimPayload {
        ClaimPayload::initiate_payment(self.amount, &self.payment_reason, merchant_id, now)
    }
}

/// Request to charge a payer's wallet directly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectPaymentRequest {
    pub id: String,
    pub amount: f64,
    pub payment_reason: String,
    pub notify_url: String,
    pub phone_number: String,
    /// Wallet or bank identifier, e.g. "Telebirr"
    pub payment_method: String,
}

impl DirectPaymentRequest {
    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require_amount(self.amount)?;
        require("paymentReason", &self.payment_reason)?;
        require("notifyUrl", &self.notify_url)?;
        require("phoneNumber", &self.phone_number)?;
        require("paymentMethod", &self.payment_method)
    }
}

impl SignedOperation for DirectPaymentRequest {
    const KIND: OperationKind = OperationKind::DirectPayment;

    fn claims(&self, merchant_id: &str, now: i64) -> ClaimPayload {
        ClaimPayload::direct_payment(
            self.amount,
            &self.payment_reason,
            &self.payment_method,
            &self.phone_number,
            merchant_id,
            now,
        )
    }
}

/// Request to send money from the merchant to a customer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayoutTransferRequest {
    pub id: String,
    pub amount: f64,
    pub payment_reason: String,
    /// Receiver account; sent to the gateway as `receiverAccountNumber`
    pub phone_number: String,
    pub payment_method: String,
    pub notify_url: String,
}

impl PayoutTransferRequest {
    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require_amount(self.amount)?;
        require("paymentReason", &self.payment_reason)?;
        require("phoneNumber", &self.phone_number)?;
        require("paymentMethod", &self.payment_method)?;
        require("notifyUrl", &self.notify_url)
    }
}

impl SignedOperation for PayoutTransferRequest {
    const KIND: OperationKind = OperationKind::PayoutTransfer;

    fn claims(&self, merchant_id: &str, now: i64) -> ClaimPayload {
        ClaimPayload::payout_transfer(
            self.amount,
            &self.payment_reason,
            &self.payment_method,
            &self.phone_number,
            merchant_id,
            now,
        )
    }
}

/// Request for the current state of a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionStatusRequest {
    pub id: String,
}

impl TransactionStatusRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)
    }
}

impl SignedOperation for TransactionStatusRequest {
    const KIND: OperationKind = OperationKind::TransactionStatus;

    fn claims(&self, merchant_id: &str, now: i64) -> ClaimPayload {
        ClaimPayload::transaction_status(&self.id, merchant_id, now)
    }
}
