//! Claim payloads signed into gateway tokens
//!
//! Each operation kind has its own claim struct so the exact key names are
//! fixed at compile time. Note the status query uses `merId` where every other
//! kind uses `merchantId`; the gateway expects exactly that.

use serde::Serialize;

/// Gateway operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    InitiatePayment,
    DirectPayment,
    PayoutTransfer,
    TransactionStatus,
}

impl OperationKind {
    /// Gateway endpoint path, relative to the environment base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            OperationKind::InitiatePayment => super::endpoints::INITIATE_PAYMENT,
            OperationKind::DirectPayment => super::endpoints::DIRECT_PAYMENT,
            OperationKind::PayoutTransfer => super::endpoints::PAYOUT_TRANSFER,
            OperationKind::TransactionStatus => super::endpoints::FETCH_TRANSACTION_STATUS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::InitiatePayment => "initiate-payment",
            OperationKind::DirectPayment => "direct-payment",
            OperationKind::PayoutTransfer => "payout-transfer",
            OperationKind::TransactionStatus => "transaction-status",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims for a hosted checkout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentClaims {
    pub amount: f64,
    pub payment_reason: String,
    pub merchant_id: String,
    pub generated: i64,
}

/// Claims for operations that name a payment method and phone number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodClaims {
    pub amount: f64,
    pub payment_reason: String,
    pub payment_method: String,
    pub phone_number: String,
    pub merchant_id: String,
    pub generated: i64,
}

/// Claims for a transaction status lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusClaims {
    pub id: String,
    #[serde(rename = "merId")]
    pub mer_id: String,
    pub generated: i64,
}

/// Claim set for one outbound operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimPayload {
    InitiatePayment(PaymentClaims),
    DirectPayment(MethodClaims),
    PayoutTransfer(MethodClaims),
    TransactionStatus(StatusClaims),
}

impl ClaimPayload {
    pub fn initiate_payment(
        amount: f64,
        payment_reason: impl Into<String>,
        merchant_id: impl Into<String>,
        now: i64,
    ) -> Self {
        ClaimPayload::InitiatePayment(PaymentClaims {
            amount,
            payment_reason: payment_reason.into(),
            merchant_id: merchant_id.into(),
            generated: now,
        })
    }

    pub fn direct_payment(
        amount: f64,
        payment_reason: impl Into<String>,
        payment_method: impl Into<String>,
        phone_number: impl Into<String>,
        merchant_id: impl Into<String>,
        now: i64,
    ) -> Self {
        ClaimPayload::DirectPayment(MethodClaims {
            amount,
            payment_reason: payment_reason.into(),
            payment_method: payment_method.into(),
            phone_number: phone_number.into(),
            merchant_id: merchant_id.into(),
            generated: now,
        })
    }

    /// Same claim shape as a direct payment; the receiver account and client
    /// reference travel in the request body, not the token.
    pub fn payout_transfer(
        amount: f64,
        payment_reason: impl Into<String>,
        payment_method: impl Into<String>,
        phone_number: impl Into<String>,
        merchant_id: impl Into<String>,
        now: i64,
    ) -> Self {
        ClaimPayload::PayoutTransfer(MethodClaims {
            amount,
            payment_reason: payment_reason.into(),
            payment_method: payment_method.into(),
            phone_number: phone_number.into(),
            merchant_id: merchant_id.into(),
            generated: now,
        })
    }

    pub fn transaction_status(id: impl Into<String>, merchant_id: impl Into<String>, now: i64) -> Self {
        ClaimPayload::TransactionStatus(StatusClaims {
            id: id.into(),
            mer_id: merchant_id.into(),
            generated: now,
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            ClaimPayload::InitiatePayment(_) => OperationKind::InitiatePayment,
            ClaimPayload::DirectPayment(_) => OperationKind::DirectPayment,
            ClaimPayload::PayoutTransfer(_) => OperationKind::PayoutTransfer,
            ClaimPayload::TransactionStatus(_) => OperationKind::TransactionStatus,
        }
    }

    /// Amount carried by the claims, if this kind has one
    pub fn amount(&self) -> Option<f64> {
        match self {
            ClaimPayload::InitiatePayment(claims) => Some(claims.amount),
            ClaimPayload::DirectPayment(claims) | ClaimPayload::PayoutTransfer(claims) => {
                Some(claims.amount)
            }
            ClaimPayload::TransactionStatus(_) => None,
        }
    }

    /// Unix time the payload was built at
    pub fn generated(&self) -> i64 {
        match self {
            ClaimPayload::InitiatePayment(claims) => claims.generated,
            ClaimPayload::DirectPayment(claims) | ClaimPayload::PayoutTransfer(claims) => {
                claims.generated
            }
            ClaimPayload::TransactionStatus(claims) => claims.generated,
        }
    }
}

/// An inbound request that knows its operation kind and claim set
pub trait SignedOperation {
    const KIND: OperationKind;

    /// Build the claims for this request as of `now`
    fn claims(&self, merchant_id: &str, now: i64) -> ClaimPayload;
}
