//! RON prefab manifests: an ordered list of variant hierarchies on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_BASE_MARKER, NodeDescriptor, PrefabError, PrefabRegistry};

/// Errors that can occur when loading a prefab manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Failed to read the manifest file.
    #[error("failed to read prefab manifest: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse prefab manifest: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// A variant failed registration.
    #[error(transparent)]
    Prefab(#[from] PrefabError),
}

/// One named variant in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub name: String,
    pub root: NodeDescriptor,
}

/// Ordered variant list, lowest noise band first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefabManifest {
    #[serde(default = "default_base_marker")]
    pub base_marker: String,
    pub variants: Vec<VariantEntry>,
}

fn default_base_marker() -> String {
    DEFAULT_BASE_MARKER.to_string()
}

impl PrefabManifest {
    /// Parse a manifest from RON text.
    pub fn from_ron_str(contents: &str) -> Result<Self, ManifestError> {
        ron::from_str(contents).map_err(ManifestError::ParseError)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(ManifestError::ReadError)?;
        let manifest = Self::from_ron_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            variants = manifest.variants.len(),
            "loaded prefab manifest"
        );
        Ok(manifest)
    }

    /// Classify every variant, in order, into a fresh registry.
    pub fn into_registry(self) -> Result<PrefabRegistry, ManifestError> {
        let mut registry = PrefabRegistry::with_base_marker(self.base_marker)?;
        for entry in self.variants {
            registry.register(entry.name, &entry.root)?;
        }
        Ok(registry)
    }
}
