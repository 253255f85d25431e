//! # ECDSA Signatures (secp256k1)
//!
//! Pure-Rust secp256k1 driver.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2)
//! - Constant-time operations
//!
//! ## Encodings
//!
//! | Value | Bytes | Format |
//! |-------|-------|--------|
//! | private key | 32 | big-endian scalar |
//! | public key | 33 | SEC1 compressed |
//! | signature | 64 | `r || s`, low-S |

use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};

use crate::capability::{self, fixed, Crypto, CryptoResult, PrivateKey, PublicKey};
use crate::CryptoError;

/// Registered driver name.
pub const SECP256K1_NAME: &str = "secp256k1";

/// Manually assigned type id.
pub const SECP256K1_TYPE_ID: i32 = 1;

/// Private key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Compressed public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; PUBLIC_KEY_LEN]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes = fixed(bytes, CryptoError::InvalidPublicKey)?;
        // Validate it's a valid compressed point
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    fn verify_raw(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        verify(&self.0, message, signature)
    }
}

impl PublicKey for Secp256k1PublicKey {
    fn verify(&self, message: &[u8], signature: &dyn capability::Signature) -> bool {
        self.verify_raw(message, &signature.to_bytes()).is_ok()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; SIGNATURE_LEN]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes). Rejects values that are not a valid
    /// scalar pair.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Signature::from_slice(bytes).map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(fixed(bytes, CryptoError::InvalidSignature)?))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl capability::Signature for Secp256k1Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// secp256k1 ECDSA private key.
///
/// The inner `SigningKey` zeroizes itself on drop.
pub struct Secp256k1PrivateKey {
    signing_key: SigningKey,
}

impl Secp256k1PrivateKey {
    /// Generate random key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public(&self) -> Secp256k1PublicKey {
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        // SEC1 compressed public key is always exactly 33 bytes
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        bytes.copy_from_slice(&sec1_bytes[..PUBLIC_KEY_LEN]);
        Secp256k1PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979 over SHA-256 of the message).
    pub fn sign_message(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        Secp256k1Signature(sig.to_bytes().into())
    }
}

impl std::fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1PrivateKey")
            .field("public", &self.public())
            .finish_non_exhaustive()
    }
}

impl PrivateKey for Secp256k1PrivateKey {
    fn sign(&self, message: &[u8]) -> Box<dyn capability::Signature> {
        Box::new(self.sign_message(message))
    }

    fn public_key(&self) -> Box<dyn PublicKey> {
        Box::new(self.public())
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.signing_key.to_bytes().to_vec()
    }
}

/// Verify raw encodings.
fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = Signature::from_slice(signature).map_err(|_| CryptoError::InvalidSignature)?;
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Software secp256k1 driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Crypto;

impl Crypto for Secp256k1Crypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(Secp256k1PrivateKey::generate())))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Ok(Some(Box::new(Secp256k1PrivateKey::from_bytes(bytes)?)))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>> {
        Ok(Some(Box::new(Secp256k1PublicKey::from_bytes(bytes)?)))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn capability::Signature>> {
        Ok(Some(Box::new(Secp256k1Signature::from_bytes(bytes)?)))
    }

    fn validate(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        if public_key.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidPublicKey);
        }
        verify(public_key, message, signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let key = Secp256k1PrivateKey::generate();
        let message = b"Hello, secp256k1!";

        let signature = key.sign(message);
        assert!(key.public_key().verify(message, signature.as_ref()));
    }

    #[test]
    fn test_wrong_message_fails() {
        let key = Secp256k1PrivateKey::generate();

        let signature = key.sign(b"message1");
        assert!(!key.public_key().verify(b"message2", signature.as_ref()));
    }

    #[test]
    fn test_deterministic_signatures() {
        let key = Secp256k1PrivateKey::from_bytes(&[0xABu8; 32]).unwrap();
        let message = b"deterministic test";

        let sig1 = key.sign_message(message);
        let sig2 = key.sign_message(message);

        assert_eq!(sig1.as_bytes(), sig2.as_bytes());
    }

    #[test]
    fn test_roundtrip_bytes() {
        let driver = Secp256k1Crypto;
        let original = driver.generate_key().unwrap().unwrap();
        let restored = driver
            .private_key_from_bytes(&original.to_bytes())
            .unwrap()
            .unwrap();

        assert!(original.equals(restored.as_ref()));
        assert!(original.public_key().equals(restored.public_key().as_ref()));
    }

    #[test]
    fn test_encoding_lengths() {
        let key = Secp256k1PrivateKey::generate();
        assert_eq!(key.to_bytes().len(), PRIVATE_KEY_LEN);
        assert_eq!(key.public_key().to_bytes().len(), PUBLIC_KEY_LEN);
        assert_eq!(key.sign(b"m").to_bytes().len(), SIGNATURE_LEN);
    }

    #[test]
    fn test_validate_raw() {
        let driver = Secp256k1Crypto;
        let key = Secp256k1PrivateKey::generate();
        let pub_bytes = key.public().as_bytes().to_vec();
        let sig = key.sign_message(b"hot path");

        assert!(driver.validate(b"hot path", &pub_bytes, sig.as_bytes()).is_ok());
        assert_eq!(
            driver.validate(b"other", &pub_bytes, sig.as_bytes()),
            Err(CryptoError::SignatureVerificationFailed)
        );
        assert_eq!(
            driver.validate(b"hot path", &pub_bytes[..32], sig.as_bytes()),
            Err(CryptoError::InvalidPublicKey)
        );
    }

    #[test]
    fn test_rejects_bad_encodings() {
        let driver = Secp256k1Crypto;
        assert_eq!(
            driver.private_key_from_bytes(&[0u8; 32]).unwrap_err(),
            CryptoError::InvalidPrivateKey
        );
        assert_eq!(
            driver.public_key_from_bytes(&[0x05; 33]).unwrap_err(),
            CryptoError::InvalidPublicKey
        );
        assert_eq!(
            driver.signature_from_bytes(&[1u8; 63]).unwrap_err(),
            CryptoError::InvalidSignature
        );
    }
}
