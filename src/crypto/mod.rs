//! Request signing for the SantimPay gateway
//!
//! Every gateway call carries a `signedToken`: an ES256 JWS over the
//! operation's claim payload, signed with the merchant's P-256 key.
//!
//! # Architecture
//!
//! - [`keys`] - PEM key loading (SEC1 or PKCS#8) into a [`PrivateKeyHandle`]
//! - [`jwt`] - ES256 signing of a [`ClaimPayload`](crate::types::ClaimPayload)
//!
//! # Examples
//!
//! ```no_run
//! use santimpay_relay::crypto::{load_private_key, sign};
//! use santimpay_relay::types::ClaimPayload;
//!
//! # fn example(pem: &str) -> santimpay_relay::Result<()> {
//! let key = load_private_key(pem)?;
//! let payload = ClaimPayload::initiate_payment(100.50, "order-42", "M123", 1_700_000_000);
//! let token = sign(&payload, &key)?;
//! println!("signedToken: {}", token);
//! # Ok(())
//! # }
//! ```

pub mod jwt;
pub mod keys;


pub use jwt::{sign, SignedToken};
pub use keys::{load_private_key, PrivateKeyHandle};
