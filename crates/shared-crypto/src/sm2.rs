//! # SM2 Signatures
//!
//! SM2 digital signatures (GB/T 32918) over the SM2 prime curve, with the
//! SM3-based user identity hash.
//!
//! ## Encodings
//!
//! | Value | Bytes | Format |
//! |-------|-------|--------|
//! | private key | 32 | big-endian scalar |
//! | public key | 33 | SEC1 compressed |
//! | signature | 64 | `r || s` |
//!
//! Only the compressed public key form is accepted, so every key has a
//! single wire encoding.

use ::sm2::dsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use ::sm2::elliptic_curve::sec1::ToEncodedPoint;
use ::sm2::SecretKey;

use crate::capability::{self, fixed, Crypto, CryptoResult, PrivateKey, PublicKey};
use crate::CryptoError;

/// Registered driver name.
pub const SM2_NAME: &str = "auth_sm2";

/// Manually assigned type id.
pub const SM2_TYPE_ID: i32 = 258;

/// Private key length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Compressed public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Default distinguishing identifier from GB/T 32918.
const DIST_ID: &str = "1234567812345678";

fn verifying_key(bytes: &[u8]) -> Result<VerifyingKey, CryptoError> {
    if bytes.len() != PUBLIC_KEY_LEN {
        return Err(CryptoError::InvalidPublicKey);
    }
    VerifyingKey::from_sec1_bytes(DIST_ID, bytes).map_err(|_| CryptoError::InvalidPublicKey)
}

fn signature(bytes: &[u8]) -> Result<Signature, CryptoError> {
    if bytes.len() != SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignature);
    }
    Signature::from_slice(bytes).map_err(|_| CryptoError::InvalidSignature)
}

/// Compressed SM2 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm2PublicKey([u8; PUBLIC_KEY_LEN]);

impl Sm2PublicKey {
    /// Create from compressed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        verifying_key(bytes)?;
        Ok(Self(fixed(bytes, CryptoError::InvalidPublicKey)?))
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl PublicKey for Sm2PublicKey {
    fn verify(&self, message: &[u8], signature: &dyn capability::Signature) -> bool {
        verify(&self.0, message, &signature.to_bytes()).is_ok()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// SM2 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm2Signature([u8; SIGNATURE_LEN]);

impl Sm2Signature {
    /// Create from `r || s` bytes. Rejects out-of-range scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        signature(bytes)?;
        Ok(Self(fixed(bytes, CryptoError::InvalidSignature)?))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl capability::Signature for Sm2Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// SM2 private key. `SecretKey` zeroizes itself on drop.
pub struct Sm2PrivateKey {
    secret: SecretKey,
    signing_key: SigningKey,
    public: Sm2PublicKey,
}

impl Sm2PrivateKey {
    /// Generate a random key.
    pub fn generate() -> Result<Self, CryptoError> {
        Self::from_secret(SecretKey::random(&mut rand::thread_rng()))
    }

    /// Create from a 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Self::from_secret(secret)
    }

    fn from_secret(secret: SecretKey) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::new(DIST_ID, &secret).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let point = secret.public_key().to_encoded_point(true);
        let public = Sm2PublicKey(fixed(point.as_bytes(), CryptoError::InvalidPublicKey)?);
        Ok(Self {
            secret,
            signing_key,
            public,
        })
    }

    /// Get the compressed public key.
    pub fn public(&self) -> Sm2PublicKey {
        self.public
    }

    /// Sign a message.
    pub fn sign_message(&self, message: &[u8]) -> Sm2Signature {
        let sig: Signature = self.signing_key.sign(message);
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes.copy_from_slice(&sig.to_bytes());
        Sm2Signature(bytes)
    }
}

impl std::fmt::Debug for Sm2PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sm2PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl PrivateKey for Sm2PrivateKey {
    fn sign(&self, message: &[u8]) -> Box<dyn capability::Signature> {
        Box::new(self.sign_message(message))
    }

    fn public_key(&self) -> Box<dyn PublicKey> {
        Box::new(self.public)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.secret.to_bytes().to_vec()
    }
}

fn verify(public_key: &[u8], message: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let key = verifying_key(public_key)?;
    let sig = signature(sig)?;
    key.verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

/// SM2 driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Crypto;

impl Crypto for Sm2Crypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(Sm2PrivateKey::generate()?)))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(Sm2PrivateKey::from_bytes(bytes)?)))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>> {
        Ok(Some(Box::new(Sm2PublicKey::from_bytes(bytes)?)))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn capability::Signature>> {
        Ok(Some(Box::new(Sm2Signature::from_bytes(bytes)?)))
    }

    fn validate(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        verify(public_key, message, signature)
    }
}
