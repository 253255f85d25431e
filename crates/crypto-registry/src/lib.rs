//! # Crypto Driver Registry
//!
//! Maps algorithm names to signature drivers, assigns each a permanent
//! numeric type id, and decides at which chain height each driver may be
//! used.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): type id allocation, driver table,
//!   activation table. No locking, no I/O
//! - **Ports Layer** (`ports/`): `CryptoRegistryApi` for runtime consumers
//! - **Service Layer** (`service.rs`): `CryptoRegistry`, the locked
//!   singleton that wires the domain together
//!
//! ## Lifecycle
//!
//! ```rust,ignore
//! let registry = Arc::new(CryptoRegistry::with_builtins()?);
//! registry.register("my-plugin", MyCrypto, RegisterOptions::new())?;
//! registry.init(&node_config.crypto, &node_config.sub_crypto);
//!
//! // Block validation
//! if registry.is_enabled("ed25519", height) {
//!     registry.new_instance("ed25519")?.validate(msg, pubkey, sig)?;
//! }
//! ```
//!
//! ## Invariants
//!
//! - A type id belongs to at most one name, and a name's type id never
//!   changes.
//! - A registered implementation is replaced only under override
//!   authorization; the first authorized replacement unlocks the name.
//! - `is_enabled` answers from configuration alone, so every node with the
//!   same configuration agrees.

pub mod builtin;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
#[cfg(feature = "native")]
pub use builtin::install_native_overrides;
pub use builtin::register_builtins;
pub use config::{decode_sub_config, CryptoConfig, SubConfig};
pub use domain::activation::ActivationTable;
pub use domain::driver::{
    ConfigInitializer, DriverRecord, DriverTable, RegisterOptions, Registration,
};
pub use domain::errors::RegistryError;
pub use domain::type_id::{derive as derive_type_id, validate_manual, MAX_MANUAL_TYPE_ID};
pub use ports::inbound::{CryptoRegistryApi, ValidationRequest};
pub use service::CryptoRegistry;
pub use shared_crypto::{to_aggregate, AggregateCrypto, Crypto, CryptoError};
