//! Verification of the `X-Hub-Signature-256` header GitHub sends with every
//! webhook delivery.

use hmac::{Hmac, Mac};
use sha2::Sha256;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

/// Header carrying the HMAC-SHA256 of the request body.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Reasons a delivery signature is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature header is missing")]
    Missing,

    #[error("Signature header is not of the form 'sha256=<hex>'")]
    Malformed,

    #[error("Signature does not match the request body")]
    Mismatch,
}

/// Checks `header` against the HMAC-SHA256 of `body` keyed with `secret`.
///
/// The comparison is constant time.
pub fn verify_signature(
    secret: &[u8],
    body: &[u8],
    header: Option<&str>,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::Missing)?;
    let hex_part = header
        .trim()
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or(SignatureError::Malformed)?;
    let expected = hex::decode(hex_part).map_err(|_| SignatureError::Malformed)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).map_err(|_| SignatureError::Mismatch)?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

/// Computes the header value GitHub would send for `body`.
#[cfg(test)]
pub(crate) fn sign(secret: &[u8], body: &[u8]) -> String {
    // HMAC accepts keys of any length.
    let digest = match Hmac::<Sha256>::new_from_slice(secret) {
        Ok(mut mac) => {
            mac.update(body);
            mac.finalize().into_bytes().to_vec()
        }
        Err(_) => Vec::new(),
    };
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest))
}
