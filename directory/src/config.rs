//! Directory configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_roster_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("directory")
        .join("roster.json")
}

/// Configuration values for the roster-backed identity provider.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// Optional roster path override.
    pub roster_path: Option<PathBuf>,
}

impl DirectorySettings {
    /// Return the configured roster path, falling back to the bundled roster.
    pub fn roster_path(&self) -> PathBuf {
        self.roster_path.clone().unwrap_or_else(default_roster_path)
    }
}
