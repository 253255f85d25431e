//! # Inbound Ports (Driving Ports / API)
//!
//! The lookup/runtime surface other node components consume. Registration
//! and bulk configuration are startup concerns and live on
//! [`crate::CryptoRegistry`] directly.

use std::sync::Arc;

use shared_crypto::{Crypto, CryptoError};

use crate::domain::errors::RegistryError;

/// One raw verification job for the batch hot path.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRequest<'a> {
    /// Signed message
    pub message: &'a [u8],
    /// Encoded public key
    pub public_key: &'a [u8],
    /// Encoded signature
    pub signature: &'a [u8],
}

/// Crypto driver lookup API.
///
/// Implementations must be thread-safe (`Send + Sync`): validation workers
/// call it concurrently.
pub trait CryptoRegistryApi: Send + Sync {
    /// Driver registered under `name`.
    fn new_instance(&self, name: &str) -> Result<Arc<dyn Crypto>, RegistryError>;

    /// Driver registered under `name`, provided it is enabled at `height`.
    ///
    /// A negative height skips the activation check.
    fn load(&self, name: &str, height: i64) -> Result<Arc<dyn Crypto>, RegistryError>;

    /// Name bound to `type_id`.
    fn get_name(&self, type_id: i32) -> Result<String, RegistryError>;

    /// Type id bound to `name`.
    fn get_type(&self, name: &str) -> Result<i32, RegistryError>;

    /// Whether `name` may be used at `height`. Never fails.
    fn is_enabled(&self, name: &str, height: i64) -> bool;

    /// Validate many signatures with one driver, in parallel.
    ///
    /// The outer error covers driver resolution and activation; the inner
    /// results are per request, in input order.
    fn validate_batch(
        &self,
        name: &str,
        height: i64,
        requests: &[ValidationRequest<'_>],
    ) -> Result<Vec<Result<(), CryptoError>>, RegistryError>;
}
