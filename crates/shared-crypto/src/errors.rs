//! Crypto error types.

use thiserror::Error;

/// Errors produced by a crypto driver.
///
/// Registry callers receive these unmodified, so every variant is
/// comparable and cheap to clone.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// BLS aggregation failed
    #[error("BLS aggregation failed")]
    AggregationFailed,

    /// Invalid input for cryptographic operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Driver does not implement the aggregate method set
    #[error("Crypto driver does not support aggregation")]
    NotSupportedAggregate,
}
