//! # Ed25519 Signatures
//!
//! Twisted Edwards curve signatures with deterministic nonces.
//!
//! ## Security Properties
//!
//! - No RNG dependency (deterministic nonce from message)
//! - Complete addition formulas (no conditional branches)
//! - Immune to side-channel timing attacks

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use crate::capability::{fixed, Crypto, CryptoResult, PrivateKey, PublicKey, Signature};
use crate::CryptoError;

/// Registered driver name.
pub const ED25519_NAME: &str = "ed25519";

/// Manually assigned type id.
pub const ED25519_TYPE_ID: i32 = 2;

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes = fixed(bytes, CryptoError::InvalidPublicKey)?;
        // Validate it's a valid point
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl PublicKey for Ed25519PublicKey {
    fn verify(&self, message: &[u8], signature: &dyn Signature) -> bool {
        verify(&self.0, message, &signature.to_bytes()).is_ok()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; 64]);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(fixed(bytes, CryptoError::InvalidSignature)?))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl Signature for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Ed25519 private key, serialized as its 32-byte seed.
pub struct Ed25519PrivateKey {
    signing_key: SigningKey,
}

impl Ed25519PrivateKey {
    /// Generate random key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Get public key.
    pub fn public(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign_message(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519PrivateKey")
            .field("public", &self.public())
            .finish_non_exhaustive()
    }
}

impl PrivateKey for Ed25519PrivateKey {
    fn sign(&self, message: &[u8]) -> Box<dyn Signature> {
        Box::new(self.sign_message(message))
    }

    fn public_key(&self) -> Box<dyn PublicKey> {
        Box::new(self.public())
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.signing_key.to_bytes().to_vec()
    }
}

fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig = ed25519_dalek::Signature::from_slice(signature)
        .map_err(|_| CryptoError::InvalidSignature)?;
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// Ed25519 driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Crypto;

impl Crypto for Ed25519Crypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(Ed25519PrivateKey::generate())))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        let seed = fixed(bytes, CryptoError::InvalidPrivateKey)?;
        Ok(Some(Box::new(Ed25519PrivateKey::from_seed(seed))))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>> {
        Ok(Some(Box::new(Ed25519PublicKey::from_bytes(bytes)?)))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn Signature>> {
        Ok(Some(Box::new(Ed25519Signature::from_bytes(bytes)?)))
    }

    fn validate(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let public_key = fixed(public_key, CryptoError::InvalidPublicKey)?;
        verify(&public_key, message, signature)
    }
}
