//! # Registry Errors
//!
//! Registration errors (`InvalidTypeId`, `DuplicateTypeId`,
//! `TypeIdMismatch`, `UnauthorizedOverride`) mean a misconfigured build and
//! are fatal at startup. Lookup errors and pass-through driver errors are
//! ordinary per-request failures.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors returned by the crypto driver registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Manual type id outside `[1, MAX_MANUAL_TYPE_ID]`
    #[error("Invalid manual type id: {0}")]
    InvalidTypeId(i32),

    /// Type id already owned by another driver
    #[error("Type id {type_id} already registered by driver '{existing}'")]
    DuplicateTypeId {
        /// The contested id
        type_id: i32,
        /// Name of the driver that owns it
        existing: String,
    },

    /// Re-registration tried to change a driver's type id
    #[error("Driver '{name}' is bound to type id {existing}, cannot re-register as {requested}")]
    TypeIdMismatch {
        /// Driver name
        name: String,
        /// Type id on record
        existing: i32,
        /// Type id in the rejected request
        requested: i32,
    },

    /// Replacing a locked driver without override authorization
    #[error("Driver '{0}' is already registered and override is not authorized")]
    UnauthorizedOverride(String),

    /// No driver with this name
    #[error("Unknown crypto driver: {0}")]
    UnknownDriver(String),

    /// No driver with this type id
    #[error("Unknown crypto type id: {0}")]
    UnknownTypeId(i32),

    /// Driver exists but is not active at the requested height
    #[error("Crypto driver '{name}' is not enabled at height {height}")]
    DriverNotEnabled {
        /// Driver name
        name: String,
        /// Queried height
        height: i64,
    },

    /// Error produced by the driver itself, unmodified
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
