//! # Shared Crypto - Signature Drivers
//!
//! The crypto capability every algorithm implements, and the concrete
//! drivers the node ships with.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `capability` | - | `Crypto` driver trait and key/signature value traits |
//! | `aggregate` | - | Optional aggregation surface, `to_aggregate` probe |
//! | `ecdsa` | secp256k1 | Transaction signing (software) |
//! | `native` | secp256k1 | libsecp256k1 override (feature `native`) |
//! | `signatures` | Ed25519 | Transaction signing |
//! | `bls` | BLS12-381 | Aggregatable signatures |
//! | `sm2` | SM2 | Transaction signing (GB/T 32918) |
//! | `none` | - | Authentication disabled |
//! | `hashing` | SHA-256, RIPEMD-160, SM3 | Digests |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **BLS**: proof-of-possession DST, group checks on every decode

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod bls;
pub mod capability;
pub mod ecdsa;
pub mod errors;
pub mod hashing;
#[cfg(feature = "native")]
pub mod native;
pub mod none;
pub mod signatures;
pub mod sm2;

// Re-exports
pub use aggregate::{to_aggregate, AggregateCrypto};
pub use bls::{BlsCrypto, BlsPrivateKey, BlsPublicKey, BlsSignature, BLS_NAME};
pub use capability::{Crypto, CryptoResult, PrivateKey, PublicKey, Signature};
pub use ecdsa::{
    Secp256k1Crypto, Secp256k1PrivateKey, Secp256k1PublicKey, Secp256k1Signature, SECP256K1_NAME,
    SECP256K1_TYPE_ID,
};
pub use errors::CryptoError;
pub use hashing::{hash160, ripemd160, sha256, sm3};
#[cfg(feature = "native")]
pub use native::NativeSecp256k1Crypto;
pub use none::{NoneCrypto, NONE_NAME, NONE_TYPE_ID};
pub use signatures::{
    Ed25519Crypto, Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, ED25519_NAME,
    ED25519_TYPE_ID,
};
pub use self::sm2::{Sm2Crypto, Sm2PrivateKey, Sm2PublicKey, Sm2Signature, SM2_NAME, SM2_TYPE_ID};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
