//! BLS12-381 Signature Driver
//!
//! Provides BLS signature primitives for:
//! - Key generation
//! - Sign/verify operations
//! - Signature and public key aggregation
//!
//! Public keys live on G1 (48 bytes compressed), signatures on G2
//! (96 bytes compressed). Registered as a plugin with a derived type id.

use blst::min_pk::{AggregatePublicKey, AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::RngCore;
use zeroize::Zeroize;

use crate::aggregate::AggregateCrypto;
use crate::capability::{self, Crypto, CryptoResult, PrivateKey};
use crate::CryptoError;

/// Registered driver name.
pub const BLS_NAME: &str = "bls";

/// Secret scalar length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Compressed G1 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Compressed G2 signature length in bytes.
pub const SIGNATURE_LEN: usize = 96;

/// Domain separation tag for BLS signatures (Ethereum 2.0 compatible)
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// BLS public key (48 bytes compressed)
#[derive(Clone, Debug)]
pub struct BlsPublicKey(PublicKey);

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes() == other.0.to_bytes()
    }
}

impl Eq for BlsPublicKey {}

impl BlsPublicKey {
    /// Create from 48-byte compressed representation.
    ///
    /// The uncompressed form is rejected so every key has one encoding.
    /// Identity and out-of-subgroup points are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidPublicKey);
        }
        PublicKey::key_validate(bytes)
            .map(BlsPublicKey)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Verify a signature against this public key
    pub fn verify_signature(&self, message: &[u8], signature: &BlsSignature) -> bool {
        signature.0.verify(true, message, DST, &[], &self.0, true) == BLST_ERROR::BLST_SUCCESS
    }
}

impl capability::PublicKey for BlsPublicKey {
    fn verify(&self, message: &[u8], signature: &dyn capability::Signature) -> bool {
        BlsSignature::from_bytes(&signature.to_bytes())
            .map(|sig| self.verify_signature(message, &sig))
            .unwrap_or(false)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }
}

/// BLS signature (96 bytes)
#[derive(Clone, Debug)]
pub struct BlsSignature(Signature);

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes() == other.0.to_bytes()
    }
}

impl Eq for BlsSignature {}

impl BlsSignature {
    /// Create from 96-byte compressed representation, group checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidSignature);
        }
        Signature::sig_validate(bytes, true)
            .map(BlsSignature)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl capability::Signature for BlsSignature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }
}

/// BLS private key
pub struct BlsPrivateKey {
    secret: SecretKey,
    public: BlsPublicKey,
}

impl BlsPrivateKey {
    /// Generate a new random key
    pub fn generate() -> Result<Self, CryptoError> {
        let mut ikm = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut ikm);
        let secret = SecretKey::key_gen(&ikm, &[])
            .map_err(|e| CryptoError::KeyGenerationFailed(format!("{e:?}")));
        ikm.zeroize();
        Ok(Self::from_secret(secret?))
    }

    /// Create from existing secret key bytes
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let secret = SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_secret(secret))
    }

    fn from_secret(secret: SecretKey) -> Self {
        let public = BlsPublicKey(secret.sk_to_pk());
        Self { secret, public }
    }

    /// Sign a message
    pub fn sign_message(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.secret.sign(message, DST, &[]))
    }
}

impl std::fmt::Debug for BlsPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlsPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl PrivateKey for BlsPrivateKey {
    fn sign(&self, message: &[u8]) -> Box<dyn capability::Signature> {
        Box::new(self.sign_message(message))
    }

    fn public_key(&self) -> Box<dyn capability::PublicKey> {
        Box::new(self.public.clone())
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.secret.to_bytes().to_vec()
    }
}

fn decode_public_keys(
    keys: &[Box<dyn capability::PublicKey>],
) -> Result<Vec<PublicKey>, CryptoError> {
    keys.iter()
        .map(|k| BlsPublicKey::from_bytes(&k.to_bytes()).map(|pk| pk.0))
        .collect()
}

/// BLS12-381 driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlsCrypto;

impl Crypto for BlsCrypto {
    fn generate_key(&self) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(BlsPrivateKey::generate()?)))
    }

    fn private_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn PrivateKey>> {
        Ok(Some(Box::new(BlsPrivateKey::from_secret_bytes(bytes)?)))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn capability::PublicKey>> {
        Ok(Some(Box::new(BlsPublicKey::from_bytes(bytes)?)))
    }

    fn signature_from_bytes(&self, bytes: &[u8]) -> CryptoResult<Box<dyn capability::Signature>> {
        Ok(Some(Box::new(BlsSignature::from_bytes(bytes)?)))
    }

    fn validate(
        &self,
        message: &[u8],
        public_key: &[u8],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let pk = BlsPublicKey::from_bytes(public_key)?;
        let sig = BlsSignature::from_bytes(signature)?;
        if pk.verify_signature(message, &sig) {
            Ok(())
        } else {
            Err(CryptoError::SignatureVerificationFailed)
        }
    }

    fn as_aggregate(&self) -> Option<&dyn AggregateCrypto> {
        Some(self)
    }
}

impl AggregateCrypto for BlsCrypto {
    fn aggregate(
        &self,
        signatures: &[Box<dyn capability::Signature>],
    ) -> CryptoResult<Box<dyn capability::Signature>> {
        if signatures.is_empty() {
            return Ok(None);
        }
        let sigs = signatures
            .iter()
            .map(|s| BlsSignature::from_bytes(&s.to_bytes()).map(|sig| sig.0))
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&Signature> = sigs.iter().collect();
        let aggregated = AggregateSignature::aggregate(&refs, true)
            .map_err(|_| CryptoError::AggregationFailed)?;
        Ok(Some(Box::new(BlsSignature(aggregated.to_signature()))))
    }

    fn aggregate_public(
        &self,
        keys: &[Box<dyn capability::PublicKey>],
    ) -> CryptoResult<Box<dyn capability::PublicKey>> {
        if keys.is_empty() {
            return Ok(None);
        }
        let pks = decode_public_keys(keys)?;
        let refs: Vec<&PublicKey> = pks.iter().collect();
        let aggregated =
            AggregatePublicKey::aggregate(&refs, true).map_err(|_| CryptoError::AggregationFailed)?;
        Ok(Some(Box::new(BlsPublicKey(aggregated.to_public_key()))))
    }

    fn verify_aggregated_one(
        &self,
        keys: &[Box<dyn capability::PublicKey>],
        message: &[u8],
        signature: &dyn capability::Signature,
    ) -> Result<(), CryptoError> {
        if keys.is_empty() {
            return Err(CryptoError::InvalidInput("empty key list".into()));
        }
        let pks = decode_public_keys(keys)?;
        let refs: Vec<&PublicKey> = pks.iter().collect();
        let sig = BlsSignature::from_bytes(&signature.to_bytes())?;
        match sig.0.fast_aggregate_verify(true, message, DST, &refs) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::SignatureVerificationFailed),
        }
    }

    fn verify_aggregated_n(
        &self,
        keys: &[Box<dyn capability::PublicKey>],
        messages: &[&[u8]],
        signature: &dyn capability::Signature,
    ) -> Result<(), CryptoError> {
        if keys.is_empty() || keys.len() != messages.len() {
            return Err(CryptoError::InvalidInput(format!(
                "{} keys for {} messages",
                keys.len(),
                messages.len()
            )));
        }
        let pks = decode_public_keys(keys)?;
        let refs: Vec<&PublicKey> = pks.iter().collect();
        let sig = BlsSignature::from_bytes(&signature.to_bytes())?;
        match sig.0.aggregate_verify(true, messages, DST, &refs, true) {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            _ => Err(CryptoError::SignatureVerificationFailed),
        }
    }
}
