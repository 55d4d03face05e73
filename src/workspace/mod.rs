//! Workspace discovery
//!
//! Crawls one or more base paths for directories containing a
//! `package.toml` manifest and loads them into package descriptors.
//! Discovery does not recurse below a package directory, so nested
//! manifests belong to their outermost package.

pub mod manifest;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::WsinfoError;
use crate::package::PackageDescriptor;

pub use manifest::Manifest;

/// Marker file identifying a package directory
pub const MANIFEST_NAME: &str = "package.toml";

/// The set of packages found under the given base paths
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    /// Discovered packages, sorted by name
    pub packages: Vec<PackageDescriptor>,
}

impl Workspace {
    /// Discover all packages under the given base paths
    ///
    /// Hidden directories are skipped. Two packages sharing a name is a
    /// fatal error since every later stage addresses packages by name.
    pub fn discover(base_paths: &[PathBuf]) -> Result<Self, WsinfoError> {
        let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
        let mut packages = Vec::new();

        for base in base_paths {
            if !base.exists() {
                return Err(WsinfoError::discovery_error(
                    format!("Base path '{}' does not exist", base.display()),
                    None,
                ));
            }

            let mut walker = WalkDir::new(base).follow_links(false).into_iter();
            while let Some(entry) = walker.next() {
                let entry = entry.map_err(|e| {
                    WsinfoError::discovery_error(
                        format!("Failed to walk '{}'", base.display()),
                        Some(e.into()),
                    )
                })?;

                if entry.file_type().is_dir() {
                    if is_hidden(entry.path()) && entry.depth() > 0 {
                        walker.skip_current_dir();
                        continue;
                    }
                    let manifest_path = entry.path().join(MANIFEST_NAME);
                    if manifest_path.is_file() {
                        let descriptor = load_package(&manifest_path, entry.path())?;
                        if let Some(first) = seen.get(&descriptor.name) {
                            return Err(WsinfoError::duplicate_package(
                                &descriptor.name,
                                first,
                                &descriptor.path,
                            ));
                        }
                        seen.insert(descriptor.name.clone(), descriptor.path.clone());
                        packages.push(descriptor);
                        // Everything below belongs to this package
                        walker.skip_current_dir();
                    }
                }
            }
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { packages })
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Look up a package by name
    pub fn get(&self, name: &str) -> Option<&PackageDescriptor> {
        self.packages.iter().find(|p| p.name == name)
    }
}

fn load_package(manifest_path: &Path, dir: &Path) -> Result<PackageDescriptor, WsinfoError> {
    let manifest = Manifest::load(manifest_path)
        .map_err(|e| WsinfoError::manifest_error(manifest_path, "Invalid manifest", Some(e)))?;
    manifest
        .into_descriptor(dir)
        .map_err(|e| WsinfoError::manifest_error(manifest_path, "Invalid manifest", Some(e)))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with('.'))
}
