//! # Crypto Registry Service
//!
//! Application service that owns the driver table and the activation
//! table, and implements the `CryptoRegistryApi` inbound port.
//!
//! ## Locking
//!
//! A single `RwLock` guards both tables. `register` and `init` take it
//! exclusively, so no reader can observe a half-applied override or a
//! partially rebuilt activation table. Lookups take it shared and hand out
//! `Arc` clones, so signing and verification never run under the lock.
//!
//! Mutations are additionally serialized by a reentrant mutation lock,
//! held by `init` from the table swap through the last config initializer.
//! Two overlapping `init` calls therefore apply one after the other, and
//! the activation table always matches the configuration the drivers last
//! saw. Initializers run outside the `RwLock`, so they may call any lookup;
//! the mutation lock is reentrant, so they may also register drivers.
//!
//! Construct one registry at startup and pass it by reference (usually as
//! `Arc<CryptoRegistry>`) to every consumer.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};
use rayon::prelude::*;
use shared_crypto::{Crypto, CryptoError};
use tracing::{debug, info, warn};

use crate::config::{CryptoConfig, SubConfig};
use crate::domain::activation::ActivationTable;
use crate::domain::driver::{ConfigInitializer, DriverTable, RegisterOptions, Registration};
use crate::domain::errors::RegistryError;
use crate::ports::inbound::{CryptoRegistryApi, ValidationRequest};

/// Everything guarded by the registry lock.
#[derive(Debug, Default)]
struct RegistryState {
    drivers: DriverTable,
    config: CryptoConfig,
    activation: ActivationTable,
}

impl RegistryState {
    /// Re-derive activation from the last applied config and the drivers'
    /// default-enabled flags.
    fn rebuild_activation(&mut self) {
        self.activation =
            ActivationTable::from_config(&self.config, self.drivers.default_enabled_names());
    }
}

/// Process-wide crypto driver registry.
pub struct CryptoRegistry {
    state: RwLock<RegistryState>,
    mutation: ReentrantMutex<()>,
}

impl CryptoRegistry {
    /// Empty registry. Nothing is enabled until a driver registered with
    /// `with_default_enabled` or a configuration says so.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            mutation: ReentrantMutex::new(()),
        }
    }

    /// Register a driver, or replace one under the override protocol.
    ///
    /// All-or-nothing: on error the registry is unchanged. Errors here
    /// indicate a misconfigured build and should abort startup.
    pub fn register<C>(
        &self,
        name: &str,
        crypto: C,
        options: RegisterOptions,
    ) -> Result<(), RegistryError>
    where
        C: Crypto + 'static,
    {
        self.register_shared(name, Arc::new(crypto), options)
    }

    /// `register` for an implementation that is already shared.
    pub fn register_shared(
        &self,
        name: &str,
        crypto: Arc<dyn Crypto>,
        options: RegisterOptions,
    ) -> Result<(), RegistryError> {
        options.validate()?;
        let _mutation = self.mutation.lock();

        let outcome = {
            let mut state = self.state.write();
            let outcome = state.drivers.register(name, crypto, options);
            if let Ok(Registration::Inserted { .. }) = outcome {
                state.rebuild_activation();
            }
            outcome
        };
        match &outcome {
            Ok(Registration::Inserted { type_id }) => {
                info!("[CryptoRegistry] Registered driver '{}' (type_id={})", name, type_id);
            }
            Ok(Registration::Replaced { type_id, authorized }) => {
                info!(
                    "[CryptoRegistry] Replaced driver '{}' (type_id={}, authorized={})",
                    name, type_id, authorized
                );
            }
            Err(e) => {
                warn!("[CryptoRegistry] ✗ Registration of '{}' rejected: {}", name, e);
            }
        }
        outcome.map(|_| ())
    }

    /// Rebuild the activation table and dispatch per-driver config blobs.
    ///
    /// The previous configuration is discarded, not merged. Initializers
    /// run on the calling thread, in name order, after the new table is in
    /// place and outside the state lock. Concurrent `init` calls are
    /// serialized end to end.
    pub fn init(&self, config: &CryptoConfig, sub_config: &SubConfig) {
        let _mutation = self.mutation.lock();

        let initializers: Vec<(String, ConfigInitializer)> = {
            let mut state = self.state.write();
            state.config = config.clone();
            state.rebuild_activation();

            for (name, height) in state.activation.entries() {
                if !state.drivers.contains(name) {
                    warn!(
                        "[CryptoRegistry] Activation entry for unregistered driver '{}' (height={})",
                        name, height
                    );
                }
            }

            let mut pending: Vec<_> = sub_config
                .keys()
                .filter_map(|name| {
                    let initializer = state
                        .drivers
                        .get(name)
                        .and_then(|record| record.config_initializer.clone());
                    if initializer.is_none() {
                        warn!(
                            "[CryptoRegistry] No config initializer for '{}', sub config ignored",
                            name
                        );
                    }
                    initializer.map(|init| (name.clone(), init))
                })
                .collect();
            pending.sort_by(|a, b| a.0.cmp(&b.0));
            pending
        };

        for (name, initializer) in &initializers {
            debug!("[CryptoRegistry] Initializing driver '{}'", name);
            if let Some(raw) = sub_config.get(name) {
                initializer(raw.as_slice());
            }
        }

        info!(
            "[CryptoRegistry] Init complete: {} enable entries, {} drivers configured",
            self.state.read().activation.entries().count(),
            initializers.len()
        );
    }

    /// Driver registered under `name`.
    pub fn lookup_by_name(&self, name: &str) -> Result<Arc<dyn Crypto>, RegistryError> {
        self.state
            .read()
            .drivers
            .get(name)
            .map(|record| Arc::clone(&record.crypto))
            .ok_or_else(|| RegistryError::UnknownDriver(name.to_string()))
    }

    /// Enable height configured for `name`, if any.
    pub fn enable_height(&self, name: &str) -> Option<i64> {
        self.state.read().activation.enable_height(name)
    }

    /// Registered driver names, sorted.
    pub fn driver_names(&self) -> Vec<String> {
        self.state
            .read()
            .drivers
            .records()
            .map(|record| record.name.clone())
            .collect()
    }
}

impl Default for CryptoRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CryptoRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoRegistry")
            .field("state", &*self.state.read())
            .finish()
    }
}

impl CryptoRegistryApi for CryptoRegistry {
    fn new_instance(&self, name: &str) -> Result<Arc<dyn Crypto>, RegistryError> {
        self.lookup_by_name(name)
    }

    fn load(&self, name: &str, height: i64) -> Result<Arc<dyn Crypto>, RegistryError> {
        let state = self.state.read();
        let record = state
            .drivers
            .get(name)
            .ok_or_else(|| RegistryError::UnknownDriver(name.to_string()))?;
        if height >= 0 && !state.activation.is_enabled(name, height) {
            debug!("[CryptoRegistry] '{}' requested at height {} before activation", name, height);
            return Err(RegistryError::DriverNotEnabled {
                name: name.to_string(),
                height,
            });
        }
        Ok(Arc::clone(&record.crypto))
    }

    fn get_name(&self, type_id: i32) -> Result<String, RegistryError> {
        self.state
            .read()
            .drivers
            .name_for_type_id(type_id)
            .map(str::to_string)
            .ok_or(RegistryError::UnknownTypeId(type_id))
    }

    fn get_type(&self, name: &str) -> Result<i32, RegistryError> {
        self.state
            .read()
            .drivers
            .get(name)
            .map(|record| record.type_id)
            .ok_or_else(|| RegistryError::UnknownDriver(name.to_string()))
    }

    fn is_enabled(&self, name: &str, height: i64) -> bool {
        self.state.read().activation.is_enabled(name, height)
    }

    fn validate_batch(
        &self,
        name: &str,
        height: i64,
        requests: &[ValidationRequest<'_>],
    ) -> Result<Vec<Result<(), CryptoError>>, RegistryError> {
        let crypto = self.load(name, height)?;
        Ok(requests
            .par_iter()
            .map(|req| crypto.validate(req.message, req.public_key, req.signature))
            .collect())
    }
}
