//! # Hashing
//!
//! Digest helpers shared by drivers and by type id derivation: SHA-256,
//! RIPEMD-160 and SM3.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sm3::Sm3;

/// SHA-256 output.
pub type Hash = [u8; 32];

/// RIPEMD-160 output.
pub type Hash160 = [u8; 20];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Hash data with RIPEMD-160 (one-shot).
pub fn ripemd160(data: &[u8]) -> Hash160 {
    Ripemd160::digest(data).into()
}

/// Hash data with SM3 (one-shot).
pub fn sm3(data: &[u8]) -> Hash {
    Sm3::digest(data).into()
}

/// `RIPEMD-160(SHA-256(data))`, the usual address digest.
pub fn hash160(data: &[u8]) -> Hash160 {
    ripemd160(&sha256(data))
}
