//! Signed attachment URLs
//!
//! `sig = hex(HMAC-SHA256(secret, "{path}:{expires}"))`, `expires` in unix millis.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Route prefix attachments are served under
pub const ATTACHMENT_ROUTE: &str = "/api/attachments";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Link has expired")]
    Expired,
    #[error("Link signature is invalid")]
    BadSignature,
}

#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    ttl_millis: i64,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("ttl_millis", &self.ttl_millis)
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl_millis: ttl_secs.saturating_mul(1000),
        }
    }

    fn mac(&self, path: &str, expires: i64) -> HmacSha256 {
        // HMAC accepts keys of any length
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
        mac.update(format!("{path}:{expires}").as_bytes());
        mac
    }

    pub fn sign(&self, path: &str, expires: i64) -> String {
        hex::encode(self.mac(path, expires).finalize().into_bytes())
    }

    /// Download URL for a stored reference like `receipts/<name>`, valid from `now`.
    pub fn url_for(&self, path: &str, now: i64) -> String {
        let expires = now.saturating_add(self.ttl_millis);
        let sig = self.sign(path, expires);
        format!("{ATTACHMENT_ROUTE}/{path}?expires={expires}&sig={sig}")
    }

    /// Check a presented `(expires, sig)` pair at time `now`.
    pub fn verify(&self, path: &str, expires: i64, sig: &str, now: i64) -> Result<(), SignatureError> {
        let sig_bytes = hex::decode(sig).map_err(|_| SignatureError::BadSignature)?;
        self.mac(path, expires)
            .verify_slice(&sig_bytes)
            .map_err(|_| SignatureError::BadSignature)?;
        if now > expires {
            return Err(SignatureError::Expired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> UrlSigner {
        UrlSigner::new("test-secret", 60)
    }

    #[test]
    fn test_url_shape() {
        let url = signer().url_for("receipts/a.png", 1_000);
        assert!(url.starts_with("/api/attachments/receipts/a.png?expires=61000&sig="));
    }

    #[test]
    fn test_verify_roundtrip() {
        let s = signer();
        let sig = s.sign("receipts/a.png", 61_000);
        assert_eq!(s.verify("receipts/a.png", 61_000, &sig, 60_000), Ok(()));
        assert_eq!(s.verify("receipts/a.png", 61_000, &sig, 61_000), Ok(()));
    }

    #[test]
    fn test_expired_link() {
        let s = signer();
        let sig = s.sign("receipts/a.png", 61_000);
        assert_eq!(
            s.verify("receipts/a.png", 61_000, &sig, 61_001),
            Err(SignatureError::Expired)
        );
    }

    #[test]
    fn test_tampered_link() {
        let s = signer();
        let sig = s.sign("receipts/a.png", 61_000);
        assert_eq!(
            s.verify("receipts/b.png", 61_000, &sig, 0),
            Err(SignatureError::BadSignature)
        );
        assert_eq!(
            s.verify("receipts/a.png", 99_000, &sig, 0),
            Err(SignatureError::BadSignature)
        );
        assert_eq!(
            s.verify("receipts/a.png", 61_000, "zz-not-hex", 0),
            Err(SignatureError::BadSignature)
        );
        let other = UrlSigner::new("other-secret", 60);
        assert_eq!(
            other.verify("receipts/a.png", 61_000, &sig, 0),
            Err(SignatureError::BadSignature)
        );
    }
}
