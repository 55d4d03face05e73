//! Package model
//!
//! Immutable descriptors for discovered packages plus the per-run decorator
//! carrying selection state and the cached recursive dependency closure.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Comparison operator declared on a dependency reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOp {
    /// Manifest metadata key for this operator (e.g. `version_eq`)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Eq => "version_eq",
            Self::Neq => "version_neq",
            Self::Gt => "version_gt",
            Self::Gte => "version_gte",
            Self::Lt => "version_lt",
            Self::Lte => "version_lte",
        }
    }

    /// Parse an operator from its manifest metadata key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "version_eq" => Some(Self::Eq),
            "version_neq" => Some(Self::Neq),
            "version_gt" => Some(Self::Gt),
            "version_gte" => Some(Self::Gte),
            "version_lt" => Some(Self::Lt),
            "version_lte" => Some(Self::Lte),
            _ => None,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A version constraint attached to a dependency reference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionConstraint {
    /// Comparison operator
    pub op: ComparisonOp,

    /// Version literal the target package is compared against
    pub version: String,
}

/// A single dependency reference within a category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyRef {
    /// Target package name
    pub name: String,

    /// Optional declared version constraint
    pub constraint: Option<VersionConstraint>,
}

impl DependencyRef {
    /// Create an unconstrained dependency reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    /// Create a dependency reference carrying a version constraint
    pub fn with_constraint(name: impl Into<String>, op: ComparisonOp, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: Some(VersionConstraint {
                op,
                version: version.into(),
            }),
        }
    }
}

/// A discovered workspace package
///
/// Constructed once by the discovery layer and read-only afterwards; the
/// graph engine never mutates descriptors.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Package name, unique within a run
    pub name: String,

    /// Filesystem location, used only as a label
    pub path: PathBuf,

    /// Build-system flavor tag, opaque to the graph engine
    pub kind: String,

    /// Declared dependencies grouped by category (build, run, test, ...)
    pub dependencies: BTreeMap<String, BTreeSet<DependencyRef>>,

    /// Declared hook labels
    pub hooks: Vec<String>,

    /// Free-form metadata; may contain a `version` entry
    pub metadata: BTreeMap<String, String>,
}

impl PackageDescriptor {
    /// Create a descriptor with no dependencies or metadata
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: kind.into(),
            dependencies: BTreeMap::new(),
            hooks: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Recorded version string, if any
    pub fn version(&self) -> Option<&str> {
        self.metadata.get("version").map(String::as_str)
    }
}

/// Per-run view over a package adding selection state and the cached
/// recursive dependency closure
///
/// One decorator per package, created by the sequencing pass; the original
/// descriptor stays untouched.
#[derive(Debug, Clone)]
pub struct PackageDecorator<'a> {
    /// The wrapped immutable descriptor
    pub descriptor: &'a PackageDescriptor,

    /// Whether this package is part of the current selection
    pub selected: bool,

    /// Transitive dependency names, restricted to the recursive categories
    /// configured for the sequencing pass that created this decorator
    pub recursive_dependencies: BTreeSet<String>,
}

impl<'a> PackageDecorator<'a> {
    /// Wrap a descriptor; packages start selected with an empty closure
    pub fn new(descriptor: &'a PackageDescriptor) -> Self {
        Self {
            descriptor,
            selected: true,
            recursive_dependencies: BTreeSet::new(),
        }
    }

    /// Shorthand for the wrapped package's name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}
