//! # Driver Table
//!
//! Name and type id bookkeeping for registered drivers. Pure logic with no
//! locking; [`crate::CryptoRegistry`] wraps it.
//!
//! ## Override protocol
//!
//! A name is locked the moment it is first registered. Replacing its
//! implementation requires a registration carrying override authorization,
//! which also unlocks the name for the rest of the process lifetime. The
//! type id bound to a name never changes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use shared_crypto::Crypto;

use super::errors::RegistryError;
use super::type_id;

/// Receives the raw per-driver configuration blob during `init`.
pub type ConfigInitializer = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Options for a single registration.
///
/// Fields are validated together by `validate`, and applied all at once
/// by `register`.
#[derive(Clone, Default)]
pub struct RegisterOptions {
    type_id: Option<i32>,
    override_authorized: bool,
    default_enabled: bool,
    config_initializer: Option<ConfigInitializer>,
}

impl RegisterOptions {
    /// Options with a derived type id, no override, no initializer,
    /// disabled until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a hand-assigned type id.
    pub fn with_type_id(mut self, type_id: i32) -> Self {
        self.type_id = Some(type_id);
        self
    }

    /// Allow this registration to replace an existing implementation.
    pub fn with_override_authorization(mut self) -> Self {
        self.override_authorized = true;
        self
    }

    /// Enable the driver at height 0 without any configuration.
    ///
    /// Only honored on the first registration of a name; like the type id,
    /// it cannot be changed by an override.
    pub fn with_default_enabled(mut self) -> Self {
        self.default_enabled = true;
        self
    }

    /// Hand the driver its raw config blob during `init`.
    pub fn with_config_initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.config_initializer = Some(Arc::new(initializer));
        self
    }

    /// Check the options without touching any registry.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if let Some(id) = self.type_id {
            type_id::validate_manual(id)?;
        }
        Ok(())
    }

    /// Manual type id, if one was requested.
    pub fn type_id(&self) -> Option<i32> {
        self.type_id
    }

    /// Whether override authorization was supplied.
    pub fn is_override_authorized(&self) -> bool {
        self.override_authorized
    }

    /// Whether the driver is enabled at height 0 by default.
    pub fn is_default_enabled(&self) -> bool {
        self.default_enabled
    }
}

impl fmt::Debug for RegisterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterOptions")
            .field("type_id", &self.type_id)
            .field("override_authorized", &self.override_authorized)
            .field("default_enabled", &self.default_enabled)
            .field("config_initializer", &self.config_initializer.is_some())
            .finish()
    }
}

/// One registered algorithm.
#[derive(Clone)]
pub struct DriverRecord {
    /// Registry key.
    pub name: String,
    /// Wire identifier, permanent for this name.
    pub type_id: i32,
    /// Current implementation.
    pub crypto: Arc<dyn Crypto>,
    /// Set once a registration with override authorization succeeded.
    pub override_unlocked: bool,
    /// Enabled at height 0 unless configuration says otherwise.
    pub default_enabled: bool,
    /// Receives the raw config blob during `init`.
    pub config_initializer: Option<ConfigInitializer>,
}

impl fmt::Debug for DriverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRecord")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .field("override_unlocked", &self.override_unlocked)
            .field("default_enabled", &self.default_enabled)
            .field("config_initializer", &self.config_initializer.is_some())
            .finish_non_exhaustive()
    }
}

/// What a successful registration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// New name.
    Inserted {
        /// Resolved type id
        type_id: i32,
    },
    /// Existing name, implementation swapped.
    Replaced {
        /// Type id on record
        type_id: i32,
        /// Whether this registration carried override authorization
        authorized: bool,
    },
}

/// Name → record map with a type id index.
#[derive(Debug, Default)]
pub struct DriverTable {
    drivers: BTreeMap<String, DriverRecord>,
    by_type_id: HashMap<i32, String>,
}

impl DriverTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a driver.
    ///
    /// Every check runs before the first write; a failed call leaves the
    /// table untouched.
    pub fn register(
        &mut self,
        name: &str,
        crypto: Arc<dyn Crypto>,
        options: RegisterOptions,
    ) -> Result<Registration, RegistryError> {
        let type_id = type_id::resolve(name, options.type_id)?;

        let Some(existing) = self.drivers.get_mut(name) else {
            if let Some(owner) = self.by_type_id.get(&type_id) {
                return Err(RegistryError::DuplicateTypeId {
                    type_id,
                    existing: owner.clone(),
                });
            }
            self.by_type_id.insert(type_id, name.to_string());
            self.drivers.insert(
                name.to_string(),
                DriverRecord {
                    name: name.to_string(),
                    type_id,
                    crypto,
                    override_unlocked: options.override_authorized,
                    default_enabled: options.default_enabled,
                    config_initializer: options.config_initializer,
                },
            );
            return Ok(Registration::Inserted { type_id });
        };

        if existing.type_id != type_id {
            return Err(RegistryError::TypeIdMismatch {
                name: name.to_string(),
                existing: existing.type_id,
                requested: type_id,
            });
        }
        if !existing.override_unlocked && !options.override_authorized {
            return Err(RegistryError::UnauthorizedOverride(name.to_string()));
        }

        existing.crypto = crypto;
        existing.override_unlocked |= options.override_authorized;
        if let Some(initializer) = options.config_initializer {
            existing.config_initializer = Some(initializer);
        }
        Ok(Registration::Replaced {
            type_id,
            authorized: options.override_authorized,
        })
    }

    /// Record for `name`.
    pub fn get(&self, name: &str) -> Option<&DriverRecord> {
        self.drivers.get(name)
    }

    /// Name bound to `type_id`.
    pub fn name_for_type_id(&self, type_id: i32) -> Option<&str> {
        self.by_type_id.get(&type_id).map(String::as_str)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// Names of drivers enabled at height 0 by default, in name order.
    pub fn default_enabled_names(&self) -> impl Iterator<Item = &str> {
        self.drivers
            .values()
            .filter(|record| record.default_enabled)
            .map(|record| record.name.as_str())
    }

    /// All records in name order.
    pub fn records(&self) -> impl Iterator<Item = &DriverRecord> {
        self.drivers.values()
    }

    /// Number of registered drivers.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Whether no driver is registered.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::{Ed25519Crypto, NoneCrypto, Secp256k1Crypto};

    fn table() -> DriverTable {
        let mut table = DriverTable::new();
        table
            .register(
                "secp256k1",
                Arc::new(Secp256k1Crypto),
                RegisterOptions::new().with_type_id(1),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_options_validation() {
        assert!(RegisterOptions::new().with_type_id(-1).validate().is_err());
        assert!(RegisterOptions::new()
            .with_type_id(type_id::MAX_MANUAL_TYPE_ID)
            .validate()
            .is_ok());
        assert!(RegisterOptions::new()
            .with_type_id(type_id::MAX_MANUAL_TYPE_ID + 1)
            .validate()
            .is_err());
        assert!(RegisterOptions::new().validate().is_ok());
    }

    #[test]
    fn test_insert_and_lookup() {
        let table = table();
        let record = table.get("secp256k1").unwrap();
        assert_eq!(record.type_id, 1);
        assert!(!record.override_unlocked);
        assert_eq!(table.name_for_type_id(1), Some("secp256k1"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_derived_id_when_not_manual() {
        let mut table = DriverTable::new();
        let outcome = table
            .register("plugin", Arc::new(NoneCrypto), RegisterOptions::new())
            .unwrap();
        assert_eq!(
            outcome,
            Registration::Inserted {
                type_id: type_id::derive("plugin")
            }
        );
    }

    #[test]
    fn test_invalid_manual_id_has_no_side_effect() {
        let mut table = DriverTable::new();
        let err = table
            .register(
                "ed25519",
                Arc::new(Ed25519Crypto),
                RegisterOptions::new().with_type_id(type_id::MAX_MANUAL_TYPE_ID + 1),
            )
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidTypeId(type_id::MAX_MANUAL_TYPE_ID + 1));
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_type_id_rejected() {
        let mut table = table();
        let err = table
            .register(
                "ed25519",
                Arc::new(Ed25519Crypto),
                RegisterOptions::new().with_type_id(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateTypeId {
                type_id: 1,
                existing: "secp256k1".into()
            }
        );
        assert!(!table.contains("ed25519"));
    }

    #[test]
    fn test_override_unlocks_name() {
        let mut table = table();
        let opts = || RegisterOptions::new().with_type_id(1);

        assert_eq!(
            table.register("secp256k1", Arc::new(NoneCrypto), opts()),
            Err(RegistryError::UnauthorizedOverride("secp256k1".into()))
        );
        assert_eq!(
            table.register(
                "secp256k1",
                Arc::new(NoneCrypto),
                opts().with_override_authorization()
            ),
            Ok(Registration::Replaced {
                type_id: 1,
                authorized: true
            })
        );
        assert!(table.get("secp256k1").unwrap().override_unlocked);

        // Unlocked names accept plain re-registration and stay unlocked.
        assert!(table.register("secp256k1", Arc::new(NoneCrypto), opts()).is_ok());
        assert!(table.get("secp256k1").unwrap().override_unlocked);
    }

    #[test]
    fn test_type_id_is_permanent() {
        let mut table = table();
        let err = table
            .register(
                "secp256k1",
                Arc::new(NoneCrypto),
                RegisterOptions::new()
                    .with_override_authorization()
                    .with_type_id(1024),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::TypeIdMismatch {
                name: "secp256k1".into(),
                existing: 1,
                requested: 1024
            }
        );
        assert!(!table.get("secp256k1").unwrap().override_unlocked);
        assert_eq!(table.name_for_type_id(1024), None);
    }

    #[test]
    fn test_initializer_replaced_only_when_supplied() {
        let mut table = DriverTable::new();
        table
            .register(
                "plugin",
                Arc::new(NoneCrypto),
                RegisterOptions::new().with_config_initializer(|_| {}),
            )
            .unwrap();
        table
            .register(
                "plugin",
                Arc::new(NoneCrypto),
                RegisterOptions::new().with_override_authorization(),
            )
            .unwrap();
        assert!(table.get("plugin").unwrap().config_initializer.is_some());
    }

    #[test]
    fn test_default_enabled_fixed_at_first_registration() {
        let mut table = DriverTable::new();
        table
            .register(
                "ed25519",
                Arc::new(Ed25519Crypto),
                RegisterOptions::new().with_type_id(2).with_default_enabled(),
            )
            .unwrap();
        table
            .register(
                "plugin",
                Arc::new(NoneCrypto),
                RegisterOptions::new().with_default_enabled(),
            )
            .unwrap();
        table
            .register("none", Arc::new(NoneCrypto), RegisterOptions::new().with_type_id(10))
            .unwrap();

        // An override cannot flip the flag.
        table
            .register(
                "none",
                Arc::new(NoneCrypto),
                RegisterOptions::new()
                    .with_type_id(10)
                    .with_override_authorization()
                    .with_default_enabled(),
            )
            .unwrap();

        let names: Vec<_> = table.default_enabled_names().collect();
        assert_eq!(names, vec!["ed25519", "plugin"]);
    }
}
