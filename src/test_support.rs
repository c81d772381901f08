//! Fixtures and token checks shared by the unit tests

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;
use serde_json::Value;

/// P-256 key in SEC1 form
pub const EC_SEC1_PEM: &str = include_str!("../tests/fixtures/ec_sec1.pem");
/// The same P-256 key wrapped in PKCS#8
pub const EC_PKCS8_PEM: &str = include_str!("../tests/fixtures/ec_pkcs8.pem");
/// SubjectPublicKeyInfo for the fixture key
pub const EC_PUBLIC_PEM: &str = include_str!("../tests/fixtures/ec_public.pem");
/// RSA key in PKCS#8 form
pub const RSA_PKCS8_PEM: &str = include_str!("../tests/fixtures/rsa_pkcs8.pem");

pub fn fixture_public_key() -> VerifyingKey {
    VerifyingKey::from(p256::PublicKey::from_public_key_pem(EC_PUBLIC_PEM).unwrap())
}

/// Decode one base64url segment of a compact token as JSON
pub fn decode_segment(token: &str, index: usize) -> Value {
    let segment = token.split('.').nth(index).unwrap();
    let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Raw signature bytes of a compact token
pub fn signature_bytes(token: &str) -> Vec<u8> {
    let segment = token.split('.').nth(2).unwrap();
    URL_SAFE_NO_PAD.decode(segment).unwrap()
}

/// Check an ES256 compact token against a public key
pub fn verify_token(token: &str, key: &VerifyingKey) -> bool {
    let Some((signing_input, signature)) = token.rsplit_once('.') else {
        return false;
    };
    let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature) else {
        return false;
    };
    key.verify(signing_input.as_bytes(), &signature).is_ok()
}
