//! Content signing.
//!
//! Documents are signed with HMAC-SHA256; the signed form is the original
//! content with the 32-byte tag appended, so recipients holding the shared
//! key can split and verify.

use ring::hmac;

use crate::error::{RelayError, Result};

/// Length in bytes of the appended HMAC-SHA256 tag.
pub const TAG_LEN: usize = 32;

/// Signs document content for transport.
#[cfg_attr(test, mockall::automock)]
pub trait Signer {
    /// Produce the signed form of `content`.
    fn sign(&self, content: &[u8]) -> Vec<u8>;
}

/// HMAC-SHA256 signer over a shared key.
#[derive(Debug)]
pub struct HmacSigner {
    key: hmac::Key,
}

impl HmacSigner {
    /// Build a signer from a hex-encoded key.
    ///
    /// Keys shorter than 16 bytes are rejected.
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let key_bytes = hex::decode(key_hex)
            .map_err(|e| RelayError::Crypto(format!("signing key is not valid hex: {}", e)))?;
        if key_bytes.len() < 16 {
            return Err(RelayError::Crypto(format!(
                "signing key too short: {} bytes, need at least 16",
                key_bytes.len()
            )));
        }
        Ok(Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, &key_bytes),
        })
    }

    /// Check a signed blob produced by [`Signer::sign`].
    pub fn verify(&self, signed: &[u8]) -> bool {
        if signed.len() < TAG_LEN {
            return false;
        }
        let (content, tag) = signed.split_at(signed.len() - TAG_LEN);
        hmac::verify(&self.key, content, tag).is_ok()
    }
}

impl Signer for HmacSigner {
    fn sign(&self, content: &[u8]) -> Vec<u8> {
        let tag = hmac::sign(&self.key, content);
        let mut signed = Vec::with_capacity(content.len() + TAG_LEN);
        signed.extend_from_slice(content);
        signed.extend_from_slice(tag.as_ref());
        signed
    }
}
