//! # Crypto Capability
//!
//! The polymorphic surface every signature driver implements.
//!
//! A driver is a factory: it generates keys and rebuilds keys and
//! signatures from their byte encodings. The value objects it hands out
//! carry the actual sign/verify logic.
//!
//! ## Null values
//!
//! Every factory method returns `Result<Option<_>, CryptoError>`. `Ok(None)`
//! means "not applicable" and is only produced by inert drivers such as
//! [`crate::NoneCrypto`]; a real driver either returns a value or an error.

use std::fmt;

use subtle::ConstantTimeEq;

use crate::aggregate::AggregateCrypto;
use crate::CryptoError;

/// Private key handed out by a driver.
pub trait PrivateKey: Send + Sync + fmt::Debug {
    /// Sign a message.
    fn sign(&self, message: &[u8]) -> Box<dyn Signature>;

    /// Derive the matching public key.
    fn public_key(&self) -> Box<dyn PublicKey>;

    /// Serialize. `Crypto::private_key_from_bytes` is the exact inverse.
    fn to_bytes(&self) -> Vec<u8>;

    /// Compare encodings in constant time.
    fn equals(&self, other: &dyn PrivateKey) -> bool {
        let mine = self.to_bytes();
        let theirs = other.to_bytes();
        mine.as_slice().ct_eq(theirs.as_slice()).into()
    }
}

/// Public key handed out by a driver.
pub trait PublicKey: Send + Sync + fmt::Debug {
    /// Verify `signature` over `message`.
    fn verify(&self, message: &[u8], signature: &dyn Signature) -> bool;

    /// Serialize. `Crypto::public_key_from_bytes` is the exact inverse.
    fn to_bytes(&self) -> Vec<u8>;

    /// Compare encodings.
    fn equals(&self, other: &dyn PublicKey) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

/// Signature handed out by a driver.
pub trait Signature: Send + Sync + fmt::Debug {
    /// Serialize. `Crypto::signature_from_bytes` is the exact inverse.
    fn to_bytes(&self) -> Vec<u8>;

    /// Compare encodings.
    fn equals(&self, other: &dyn Signature) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

/// Outcome of a driver factory call.
pub type CryptoResult<T> = Result<Option<T>, CryptoError>;

/// Signature driver.
///
/// Implementations must be thread-safe: the registry hands the same
/// instance to every validation worker.
pub trait Crypto: Send + Sync {
    /// Generate a fresh random private key.
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>>;

    /// Rebuild a private key from `PrivateKey::to_bytes` output.
    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>>;

    /// Rebuild a public key from `PublicKey::to_bytes` output.
    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>>;

    /// Rebuild a signature from `Signature::to_bytes` output.
    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn Signature>>;

    /// Verify raw encodings without building key objects.
    ///
    /// This is the hot path used during block validation.
    fn validate(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError>;

    /// Capability probe for the aggregate method set.
    ///
    /// Drivers that support aggregation override this to return `Some(self)`.
    fn as_aggregate(&self) -> Option<&dyn AggregateCrypto> {
        None
    }
}

/// Copy `bytes` into a fixed-size array or fail with `err`.
pub(crate) fn fixed<const N: usize>(
    bytes: &[u8],
    err: CryptoError,
) -> Result<[u8; N], CryptoError> {
    bytes.try_into().map_err(|_| err)
}
