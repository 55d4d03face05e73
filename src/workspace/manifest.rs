//! package.toml manifest parsing
//!
//! A manifest describes one discoverable package:
//!
//! ```toml
//! [package]
//! name = "pkg_a"
//! type = "cmake"
//! version = "2.0"
//!
//! hooks = ["env.sh"]
//!
//! [dependencies]
//! build = ["dep1", { name = "dep2", version_gte = "1.0" }]
//! run = ["dep1"]
//!
//! [metadata]
//! maintainer = "someone"
//! ```
//!
//! Dependency categories are open-ended; `build`, `run` and `test` are the
//! conventional ones. Table-form entries may carry exactly one `version_*`
//! constraint key.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::package::{ComparisonOp, DependencyRef, PackageDescriptor, VersionConstraint};

/// Parsed package.toml contents
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Package identity
    pub package: PackageSection,

    /// Dependency references grouped by category
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<DependencyEntry>>,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// The [package] section
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSection {
    /// Package name, unique within the workspace
    pub name: String,

    /// Build-system flavor tag
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,

    /// Package version, recorded as metadata
    pub version: Option<String>,

    /// Declared hook labels
    #[serde(default)]
    pub hooks: Vec<String>,
}

fn default_kind() -> String {
    "unknown".to_string()
}

/// A dependency entry: a bare target name, or a table carrying constraint
/// metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(flatten)]
        constraints: BTreeMap<String, String>,
    },
}

impl DependencyEntry {
    fn into_ref(self) -> Result<DependencyRef> {
        match self {
            Self::Name(name) => Ok(DependencyRef::new(name)),
            Self::Detailed { name, constraints } => {
                if constraints.len() > 1 {
                    bail!("dependency '{name}' declares more than one version constraint");
                }
                let constraint = match constraints.into_iter().next() {
                    Some((key, version)) => {
                        let Some(op) = ComparisonOp::from_key(&key) else {
                            bail!("dependency '{name}' has unknown constraint key '{key}'");
                        };
                        Some(VersionConstraint { op, version })
                    }
                    None => None,
                };
                Ok(DependencyRef { name, constraint })
            }
        }
    }
}

impl Manifest {
    /// Parse manifest content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse package.toml")
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Convert the manifest into an immutable package descriptor
    ///
    /// `dir` is the directory containing the manifest and becomes the
    /// package path label.
    pub fn into_descriptor(self, dir: &Path) -> Result<PackageDescriptor> {
        let mut descriptor = PackageDescriptor::new(self.package.name, dir, self.package.kind);
        descriptor.hooks = self.package.hooks;
        descriptor.metadata = self.metadata;
        // [package].version wins over an explicit metadata entry
        if let Some(version) = self.package.version {
            descriptor.metadata.insert("version".to_string(), version);
        }

        for (category, entries) in self.dependencies {
            let refs = entries
                .into_iter()
                .map(DependencyEntry::into_ref)
                .collect::<Result<_>>()?;
            descriptor.dependencies.insert(category, refs);
        }

        Ok(descriptor)
    }
}
