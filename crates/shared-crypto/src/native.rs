//! # Native secp256k1
//!
//! libsecp256k1-backed driver. Byte compatible with
//! [`crate::Secp256k1Crypto`]: identical encodings, and since both sides
//! use RFC 6979 over the SHA-256 digest of the message with low-S
//! normalization, identical signatures.
//!
//! Installed over the software driver with override authorization.

use secp256k1::{ecdsa, Message, SecretKey, SECP256K1};
use sha2::{Digest, Sha256};

use crate::capability::{self, Crypto, CryptoResult, PrivateKey, PublicKey};
use crate::ecdsa::{PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
use crate::CryptoError;

fn digest(message: &[u8]) -> Message {
    Message::from_digest(Sha256::digest(message).into())
}

/// Compressed public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativePublicKey(secp256k1::PublicKey);

impl PublicKey for NativePublicKey {
    fn verify(&self, message: &[u8], signature: &dyn capability::Signature) -> bool {
        ecdsa::Signature::from_compact(&signature.to_bytes())
            .and_then(|sig| SECP256K1.verify_ecdsa(&digest(message), &sig, &self.0))
            .is_ok()
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.serialize().to_vec()
    }
}

/// Compact `r || s` signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeSignature(ecdsa::Signature);

impl capability::Signature for NativeSignature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.serialize_compact().to_vec()
    }
}

/// libsecp256k1 secret key.
pub struct NativePrivateKey(SecretKey);

impl std::fmt::Debug for NativePrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativePrivateKey").finish_non_exhaustive()
    }
}

impl PrivateKey for NativePrivateKey {
    fn sign(&self, message: &[u8]) -> Box<dyn capability::Signature> {
        Box::new(NativeSignature(SECP256K1.sign_ecdsa(&digest(message), &self.0)))
    }

    fn public_key(&self) -> Box<dyn PublicKey> {
        Box::new(NativePublicKey(self.0.public_key(SECP256K1)))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.secret_bytes().to_vec()
    }
}

/// Native secp256k1 driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSecp256k1Crypto;

impl Crypto for NativeSecp256k1Crypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        let secret = SecretKey::new(&mut secp256k1::rand::thread_rng());
        Ok(Some(Box::new(NativePrivateKey(secret))))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Some(Box::new(NativePrivateKey(secret))))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PublicKey>> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidPublicKey);
        }
        let key =
            secp256k1::PublicKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Some(Box::new(NativePublicKey(key))))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn capability::Signature>> {
        let sig = ecdsa::Signature::from_compact(bytes).map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Some(Box::new(NativeSignature(sig))))
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
        let key = secp256k1::PublicKey::from_slice(public_key)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig =
            ecdsa::Signature::from_compact(signature).map_err(|_| CryptoError::InvalidSignature)?;
        SECP256K1
            .verify_ecdsa(&digest(message), &sig, &key)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}
