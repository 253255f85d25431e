//! # Type Id Allocation
//!
//! Type ids are embedded in signature wire formats, so they must never
//! change for the lifetime of a chain.
//!
//! - **Manual ids** `[1, MAX_MANUAL_TYPE_ID]`: reserved for core drivers,
//!   assigned by hand.
//! - **Derived ids** `(MAX_MANUAL_TYPE_ID, i32::MAX]`: computed from the
//!   driver name, so independently built plugins pick ids without
//!   coordinating with each other.

use shared_crypto::sha256;

use super::errors::RegistryError;

/// Largest id that may be assigned by hand.
pub const MAX_MANUAL_TYPE_ID: i32 = (1 << 12) - 1;

/// Check a hand-assigned id. The upper bound is inclusive.
pub fn validate_manual(type_id: i32) -> Result<i32, RegistryError> {
    if type_id <= 0 || type_id > MAX_MANUAL_TYPE_ID {
        return Err(RegistryError::InvalidTypeId(type_id));
    }
    Ok(type_id)
}

/// Derive a type id from a driver name.
///
/// The first four bytes of `SHA-256(name)`, big-endian, reduced into the
/// derived range. Pure function of the name.
pub fn derive(name: &str) -> i32 {
    let digest = sha256(name.as_bytes());
    let raw = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let span = (i32::MAX - MAX_MANUAL_TYPE_ID) as u32;
    // raw % span < span, so the sum stays within i32::MAX
    (raw % span) as i32 + MAX_MANUAL_TYPE_ID + 1
}

/// Resolve the id for a registration request: validate a manual id, or
/// derive one from the name.
pub fn resolve(name: &str, manual: Option<i32>) -> Result<i32, RegistryError> {
    match manual {
        Some(id) => validate_manual(id),
        None => Ok(derive(name)),
    }
}
