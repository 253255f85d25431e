//! # Built-in Drivers
//!
//! Drivers the node ships with.
//!
//! | Name | Type id | Activation |
//! |------|---------|------------|
//! | `secp256k1` | 1 | default enabled |
//! | `ed25519` | 2 | default enabled |
//! | `none` | 10 | opt-in |
//! | `auth_sm2` | 258 | opt-in |
//! | `bls` | derived | opt-in |
//!
//! `bls` goes through the plugin path (no manual id) like any third-party
//! driver would.

use shared_crypto::{
    BlsCrypto, Ed25519Crypto, NoneCrypto, Secp256k1Crypto, Sm2Crypto, BLS_NAME, ED25519_NAME,
    ED25519_TYPE_ID, NONE_NAME, NONE_TYPE_ID, SECP256K1_NAME, SECP256K1_TYPE_ID, SM2_NAME,
    SM2_TYPE_ID,
};

use crate::domain::driver::RegisterOptions;
use crate::domain::errors::RegistryError;
use crate::service::CryptoRegistry;

/// Register the built-in drivers into `registry`.
pub fn register_builtins(registry: &CryptoRegistry) -> Result<(), RegistryError> {
    registry.register(
        SECP256K1_NAME,
        Secp256k1Crypto,
        RegisterOptions::new()
            .with_type_id(SECP256K1_TYPE_ID)
            .with_default_enabled(),
    )?;
    registry.register(
        ED25519_NAME,
        Ed25519Crypto,
        RegisterOptions::new()
            .with_type_id(ED25519_TYPE_ID)
            .with_default_enabled(),
    )?;
    registry.register(
        NONE_NAME,
        NoneCrypto,
        RegisterOptions::new().with_type_id(NONE_TYPE_ID),
    )?;
    registry.register(
        SM2_NAME,
        Sm2Crypto,
        RegisterOptions::new().with_type_id(SM2_TYPE_ID),
    )?;
    registry.register(BLS_NAME, BlsCrypto, RegisterOptions::new())?;
    Ok(())
}

/// Replace software drivers with their native counterparts.
///
/// Type ids and encodings are unchanged, so the swap is invisible on the
/// wire.
#[cfg(feature = "native")]
pub fn install_native_overrides(registry: &CryptoRegistry) -> Result<(), RegistryError> {
    registry.register(
        SECP256K1_NAME,
        shared_crypto::NativeSecp256k1Crypto,
        RegisterOptions::new()
            .with_type_id(SECP256K1_TYPE_ID)
            .with_override_authorization(),
    )
}

impl CryptoRegistry {
    /// Registry preloaded with the built-in drivers.
    ///
    /// Fails only on a misconfigured build; callers should abort startup.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let registry = Self::new();
        register_builtins(&registry)?;
        #[cfg(feature = "native")]
        install_native_overrides(&registry)?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::type_id;
    use crate::ports::inbound::CryptoRegistryApi;

    #[test]
    fn test_builtin_ids() {
        let registry = CryptoRegistry::with_builtins().unwrap();
        assert_eq!(registry.get_type(SECP256K1_NAME), Ok(1));
        assert_eq!(registry.get_type(ED25519_NAME), Ok(2));
        assert_eq!(registry.get_type(NONE_NAME), Ok(10));
        assert_eq!(registry.get_type(SM2_NAME), Ok(258));
        assert_eq!(registry.get_name(258).unwrap(), "auth_sm2");
        assert_eq!(registry.get_type(BLS_NAME), Ok(type_id::derive(BLS_NAME)));
    }

    #[test]
    fn test_builtin_default_activation() {
        let registry = CryptoRegistry::with_builtins().unwrap();
        assert!(registry.is_enabled(SECP256K1_NAME, 0));
        assert!(registry.is_enabled(ED25519_NAME, 0));
        assert!(!registry.is_enabled(NONE_NAME, 0));
        assert!(!registry.is_enabled(SM2_NAME, 0));
        assert!(!registry.is_enabled(BLS_NAME, 0));
    }

    #[test]
    fn test_builtins_twice_is_rejected() {
        let registry = CryptoRegistry::with_builtins().unwrap();
        assert!(matches!(
            register_builtins(&registry),
            Err(RegistryError::UnauthorizedOverride(_))
        ));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_native_override_keeps_wire_identity() {
        use shared_crypto::Crypto;

        let registry = CryptoRegistry::with_builtins().unwrap();
        assert_eq!(registry.get_type(SECP256K1_NAME), Ok(SECP256K1_TYPE_ID));

        let native = registry.new_instance(SECP256K1_NAME).unwrap();
        let key = native.generate_key().unwrap().unwrap();
        let sig = key.sign(b"msg").to_bytes();
        assert!(Secp256k1Crypto
            .validate(b"msg", &key.public_key().to_bytes(), &sig)
            .is_ok());
    }
}
