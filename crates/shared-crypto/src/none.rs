//! # Null Driver
//!
//! Inert driver used to run a chain with authentication switched off
//! (test networks). Every factory call answers "not applicable" and every
//! validation succeeds, so the execution path needs no special case.

use crate::capability::{Crypto, CryptoResult, PrivateKey, PublicKey, Signature};
use crate::CryptoError;

/// Registered driver name.
pub const NONE_NAME: &str = "none";

/// Manually assigned type id.
pub const NONE_TYPE_ID: i32 = 10;

/// The null driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneCrypto;

impl Crypto for NoneCrypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(None)
    }

    fn private_key_from_bytes(&self, _bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(None)
    }

    fn public_key_from_bytes(&self, _bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>> {
        Ok(None)
    }

    fn signature_from_bytes(&self, _bytes: &[u8]) -> CryptoResult<Box<dyn Signature>> {
        Ok(None)
    }

    fn validate(
        &self,
        _message: &[u8],
        _public_key: &[u8],
        _signature: &[u8],
    ) -> Result<(), CryptoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_from_bytes_is_empty() {
        let driver = NoneCrypto;
        assert!(driver.generate_key().unwrap().is_none());
        assert!(driver.private_key_from_bytes(b"test").unwrap().is_none());
        assert!(driver.public_key_from_bytes(b"test").unwrap().is_none());
        assert!(driver.signature_from_bytes(b"test").unwrap().is_none());
    }

    #[test]
    fn test_none_validate_always_succeeds() {
        let driver = NoneCrypto;
        assert!(driver.validate(b"test", &[], &[]).is_ok());
        assert!(driver.validate(&[], b"garbage", &[0xFF; 7]).is_ok());
    }
}
