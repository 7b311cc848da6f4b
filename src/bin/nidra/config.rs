//! `RuntimeConfig`: the union of every subsystem config, loaded from a
//! single TOML file the way each subsystem loads its own slice of it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use nidra_compactor::CompactorConfig;
use nidra_daemon::nidra::NidraConfig;
use nidra_daemon::prana::PranaConfig;
use nidra_mesh::MeshConfig;
use nidra_triguna::TrigunaConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub triguna: TrigunaConfig,
    pub compactor: CompactorConfig,
    pub nidra: NidraConfig,
    pub prana: PranaConfig,
    pub mesh: MeshConfig,
}

impl RuntimeConfig {
    pub fn load(path: &Path) -> Self {
        nidra_core::config::load_toml_or_default(path)
    }
}
