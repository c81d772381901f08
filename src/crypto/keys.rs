//! Merchant private key loading
//!
//! The gateway hands merchants a P-256 key that may arrive either as a SEC1
//! `EC PRIVATE KEY` block or wrapped in a PKCS#8 `PRIVATE KEY` block. The PEM
//! label is not trusted: the DER body is run through an ordered list of
//! decoders and the first structural match wins.

use crate::{GatewayError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::EncodingKey;
use p256::ecdsa::VerifyingKey;
use p256::elliptic_curve::zeroize::Zeroizing;
use p256::pkcs8::{EncodePrivateKey, ObjectIdentifier, PrivateKeyInfo};
use p256::SecretKey;

/// `id-ecPublicKey`, the PKCS#8 algorithm identifier of every EC key
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_DASHES: &str = "-----";

fn malformed(reason: impl Into<String>) -> GatewayError {
    GatewayError::MalformedKey(reason.into())
}

/// Extract the DER body of the first PEM block in `text`
///
/// Lenient about the body layout: any line width, CRLF endings, text before
/// the armor and `Key: value` header lines are all accepted. Only missing or
/// mismatched armor and a non-base64 body are errors.
fn decode_pem(text: &str) -> Result<Zeroizing<Vec<u8>>> {
    let start = text
        .find(PEM_BEGIN)
        .ok_or_else(|| malformed("missing PEM BEGIN line"))?;
    let rest = &text[start + PEM_BEGIN.len()..];

    let label_len = rest
        .find(PEM_DASHES)
        .ok_or_else(|| malformed("unterminated PEM BEGIN line"))?;
    let label = &rest[..label_len];
    if label.contains('\n') {
        return Err(malformed("unterminated PEM BEGIN line"));
    }
    let rest = &rest[label_len + PEM_DASHES.len()..];

    let end_line = format!("{}{}{}", PEM_END, label, PEM_DASHES);
    let body_len = rest
        .find(&end_line)
        .ok_or_else(|| malformed(format!("missing PEM END line for {}", label)))?;

    let body: Zeroizing<String> = Zeroizing::new(
        rest[..body_len]
            .lines()
            .filter(|line| !line.contains(':'))
            .flat_map(str::chars)
            .filter(|c| !c.is_ascii_whitespace())
            .collect(),
    );

    let der = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| malformed(format!("invalid PEM body: {}", e)))?;
    Ok(Zeroizing::new(der))
}

/// Outcome of a single DER decoder
enum Decoded {
    Key(SecretKey),
    /// The bytes are not in this decoder's encoding
    NotThisEncoding(String),
    /// The encoding matched but the key is from another algorithm family
    WrongFamily(ObjectIdentifier),
}

type Decoder = fn(&[u8]) -> Decoded;

/// Decoders in priority order
const DECODERS: &[(&str, Decoder)] = &[("SEC1", decode_sec1), ("PKCS#8", decode_pkcs8)];

fn decode_sec1(der: &[u8]) -> Decoded {
    match SecretKey::from_sec1_der(der) {
        Ok(key) => Decoded::Key(key),
        Err(e) => Decoded::NotThisEncoding(e.to_string()),
    }
}

fn decode_pkcs8(der: &[u8]) -> Decoded {
    let info = match PrivateKeyInfo::try_from(der) {
        Ok(info) => info,
        Err(e) => return Decoded::NotThisEncoding(e.to_string()),
    };

    if info.algorithm.oid != EC_PUBLIC_KEY_OID {
        return Decoded::WrongFamily(info.algorithm.oid);
    }

    match SecretKey::try_from(info) {
        Ok(key) => Decoded::Key(key),
        Err(e) => Decoded::NotThisEncoding(e.to_string()),
    }
}

/// Loaded P-256 signing key
///
/// Immutable after construction, so one handle can be shared behind an `Arc`
/// by any number of concurrent signing calls.
#[derive(Clone)]
pub struct PrivateKeyHandle {
    secret: SecretKey,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyHandle")
            .field("curve", &"P-256")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl PrivateKeyHandle {
    /// Parse a PEM-armored SEC1 or PKCS#8 P-256 private key
    pub fn from_pem(pem_text: &str) -> Result<Self> {
        let der = decode_pem(pem_text)?;

        let mut failures = Vec::with_capacity(DECODERS.len());
        for (name, decoder) in DECODERS {
            match decoder(&der) {
                Decoded::Key(secret) => {
                    tracing::debug!("Loaded merchant key from {} encoding", name);
                    return Self::from_secret(secret);
                }
                Decoded::WrongFamily(oid) => {
                    return Err(GatewayError::WrongKeyType {
                        algorithm: oid.to_string(),
                    });
                }
                Decoded::NotThisEncoding(reason) => failures.push(format!("{}: {}", name, reason)),
            }
        }

        Err(GatewayError::UnparsableKey(failures.join("; ")))
    }

    /// Wrap an already decoded P-256 secret key
    pub fn from_secret(secret: SecretKey) -> Result<Self> {
        // jsonwebtoken takes EC keys as PKCS#8 DER regardless of the input form
        let document = secret
            .to_pkcs8_der()
            .map_err(|e| GatewayError::UnparsableKey(format!("PKCS#8 re-encoding failed: {}", e)))?;
        let encoding_key = EncodingKey::from_ec_der(document.as_bytes());

        Ok(Self {
            secret,
            encoding_key,
        })
    }

    /// Public half of the key, for verifying tokens signed with this handle
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(self.secret.public_key())
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

/// Load the merchant signing key from PEM text
pub fn load_private_key(pem_text: &str) -> Result<PrivateKeyHandle> {
    PrivateKeyHandle::from_pem(pem_text)
}
