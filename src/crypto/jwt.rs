//! ES256 token signing for gateway requests

use super::keys::PrivateKeyHandle;
use crate::types::ClaimPayload;
use crate::{GatewayError, Result};
use jsonwebtoken::{Algorithm, Header};
use serde::Serialize;

/// Compact JWS (`header.claims.signature`) authenticating one gateway request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignedToken(String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl std::fmt::Display for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SignedToken> for String {
    fn from(token: SignedToken) -> Self {
        token.0
    }
}

/// Sign a claim payload with the merchant key
///
/// The ECDSA nonce is random, so signing the same payload twice gives two
/// different tokens that both verify against the merchant public key.
/// A NaN or infinite amount has no JSON number form and is refused.
pub fn sign(payload: &ClaimPayload, key: &PrivateKeyHandle) -> Result<SignedToken> {
    if let Some(amount) = payload.amount().filter(|amount| !amount.is_finite()) {
        return Err(GatewayError::SigningFailed(format!(
            "{} claims carry a non-finite amount: {}",
            payload.kind(),
            amount
        )));
    }

    let header = Header::new(Algorithm::ES256);
    let token = jsonwebtoken::encode(&header, payload, key.encoding_key())
        .map_err(|e| GatewayError::SigningFailed(e.to_string()))?;

    Ok(SignedToken(token))
}
