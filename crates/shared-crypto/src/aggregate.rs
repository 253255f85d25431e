//! # Aggregate Capability
//!
//! Optional extension for drivers whose signatures can be combined
//! (BLS-style schemes). Obtained through [`to_aggregate`], never assumed.

use crate::capability::{Crypto, CryptoResult, PublicKey, Signature};
use crate::CryptoError;

/// Signature aggregation method set.
pub trait AggregateCrypto: Crypto {
    /// Combine signatures into one. An empty input yields `Ok(None)`.
    fn aggregate(&self, signatures: &[Box<dyn Signature>]) -> CryptoResult<Box<dyn Signature>>;

    /// Combine public keys into one. An empty input yields `Ok(None)`.
    fn aggregate_public(&self, keys: &[Box<dyn PublicKey>]) -> CryptoResult<Box<dyn PublicKey>>;

    /// Verify an aggregate signature where every signer signed `message`.
    fn verify_aggregated_one(
        &self,
        keys: &[Box<dyn PublicKey>],
        message: &[u8],
        signature: &dyn Signature,
    ) -> Result<(), CryptoError>;

    /// Verify an aggregate signature where `keys[i]` signed `messages[i]`.
    fn verify_aggregated_n(
        &self,
        keys: &[Box<dyn PublicKey>],
        messages: &[&[u8]],
        signature: &dyn Signature,
    ) -> Result<(), CryptoError>;
}

/// View a driver through its aggregate method set.
///
/// # Errors
///
/// `CryptoError::NotSupportedAggregate` if the driver does not expose one.
pub fn to_aggregate(crypto: &dyn Crypto) -> Result<&dyn AggregateCrypto, CryptoError> {
    crypto.as_aggregate().ok_or(CryptoError::NotSupportedAggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::PrivateKey;

    /// Inert driver that answers every call with "nothing to do".
    struct DemoCrypto;

    impl Crypto for DemoCrypto {
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

        fn validate(&self, _m: &[u8], _p: &[u8], _s: &[u8]) -> Result<(), CryptoError> {
            Ok(())
        }

        fn as_aggregate(&self) -> Option<&dyn AggregateCrypto> {
            Some(self)
        }
    }

    impl AggregateCrypto for DemoCrypto {
        fn aggregate(&self, _sigs: &[Box<dyn Signature>]) -> CryptoResult<Box<dyn Signature>> {
            Ok(None)
        }

        fn aggregate_public(
            &self,
            _keys: &[Box<dyn PublicKey>],
        ) -> CryptoResult<Box<dyn PublicKey>> {
            Ok(None)
        }

        fn verify_aggregated_one(
            &self,
            _keys: &[Box<dyn PublicKey>],
            _message: &[u8],
            _signature: &dyn Signature,
        ) -> Result<(), CryptoError> {
            Ok(())
        }

        fn verify_aggregated_n(
            &self,
            _keys: &[Box<dyn PublicKey>],
            _messages: &[&[u8]],
            _signature: &dyn Signature,
        ) -> Result<(), CryptoError> {
            Ok(())
        }
    }

    #[test]
    fn test_secp256k1_not_aggregatable() {
        let driver = crate::Secp256k1Crypto;
        let result = to_aggregate(&driver);
        assert_eq!(result.err(), Some(CryptoError::NotSupportedAggregate));
    }

    #[test]
    fn test_demo_aggregate_empty_is_noop() {
        let driver = DemoCrypto;
        let aggr = to_aggregate(&driver).unwrap();

        let sig = aggr.aggregate(&[]).unwrap();
        assert!(sig.is_none());
    }

    #[test]
    fn test_bls_is_aggregatable() {
        let driver = crate::BlsCrypto;
        assert!(to_aggregate(&driver).is_ok());
    }
}
