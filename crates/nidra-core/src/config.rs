//! Shared "load TOML, fall back to defaults" helper.
//!
//! Every subsystem config (`TrigunaConfig`, `CompactorConfig`,
//! `NidraConfig`, `SupervisorConfig`, `MeshConfig`, ...) is
//! `#[serde(default)]` with a hand-written `Default` impl, and loads
//! through this helper the same way `ConsciousnessConfig::load` does.

use serde::de::DeserializeOwned;
use std::path::Path;

pub fn load_toml_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("failed to parse {}: {e} — using defaults", path.display());
                T::default()
            }
        },
        Err(_) => {
            tracing::info!("no config at {} — using defaults", path.display());
            T::default()
        }
    }
}
