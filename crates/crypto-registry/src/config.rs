//! # Crypto Configuration
//!
//! The `[crypto]` table of the node configuration, plus the raw
//! per-driver sub-configuration blobs.
//!
//! ```toml
//! [crypto]
//! enableTypes = ["secp256k1", "ed25519", "bls"]
//!
//! [crypto.enableHeight]
//! bls = 120000
//! ```

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use shared_crypto::CryptoError;

/// Driver activation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CryptoConfig {
    /// Drivers to enable at height 0 in addition to the default-enabled set.
    pub enable_types: Vec<String>,
    /// Per-driver enable height. Overrides both the default-enabled flag and
    /// `enable_types`.
    pub enable_height: HashMap<String, i64>,
}

impl CryptoConfig {
    /// Config enabling `types` at genesis.
    pub fn with_enable_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enable_types: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Schedule `name` to activate at `height`.
    pub fn enable_at(mut self, name: impl Into<String>, height: i64) -> Self {
        self.enable_height.insert(name.into(), height);
        self
    }
}

/// Raw per-driver configuration, keyed by driver name. Values are opaque
/// to the registry (JSON by convention).
pub type SubConfig = HashMap<String, Vec<u8>>;

/// Decode a JSON sub-configuration blob inside a config initializer.
pub fn decode_sub_config<T: DeserializeOwned>(raw: &[u8]) -> Result<T, CryptoError> {
    serde_json::from_slice(raw)
        .map_err(|e| CryptoError::InvalidInput(format!("crypto sub config: {e}")))
}
