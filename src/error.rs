//! Error types and helpers for user-friendly error messages
//!
//! This module provides custom error types with actionable hints to help
//! users quickly resolve common workspace issues.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum WsinfoError {
    /// Workspace discovery errors
    #[error("Discovery error: {message}")]
    Discovery {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Package manifest errors
    #[error("Invalid manifest {path}: {message}")]
    Manifest {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Two discovered packages share the same name
    #[error("Duplicate package name '{name}'")]
    DuplicatePackage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Packages form a dependency cycle within the recursive categories
    #[error("Circular dependency detected: {}", format_cycle(cycle))]
    CyclicDependency { cycle: Vec<String> },
}

fn format_cycle(cycle: &[String]) -> String {
    let mut chain = cycle.join(" -> ");
    if let Some(first) = cycle.first() {
        chain.push_str(" -> ");
        chain.push_str(first);
    }
    chain
}

impl WsinfoError {
    /// Create a discovery error
    pub fn discovery_error(message: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::Discovery {
            message: message.into(),
            source,
            hint: None,
        }
    }

    /// Create a manifest error with a hint
    pub fn manifest_error(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
            source,
            hint: Some(hints::invalid_manifest().to_string()),
        }
    }

    /// Create a duplicate package error
    pub fn duplicate_package(
        name: impl Into<String>,
        first: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
    ) -> Self {
        Self::DuplicatePackage {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a cyclic dependency error naming the cycle
    pub fn cyclic_dependency(cycle: Vec<String>) -> Self {
        Self::CyclicDependency { cycle }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            WsinfoError::Discovery { hint, .. } | WsinfoError::Manifest { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            WsinfoError::DuplicatePackage { first, second, .. } => {
                eprintln!("\n{}", style("FOUND AT:").cyan().bold());
                eprintln!("  • {}", first.display());
                eprintln!("  • {}", second.display());
                eprintln!(
                    "\n{} {}",
                    style("HINT:").yellow().bold(),
                    "Package names must be unique across the workspace. Rename one of the packages."
                );
            }
            WsinfoError::CyclicDependency { .. } => {
                eprintln!(
                    "\n{} {}",
                    style("HINT:").yellow().bold(),
                    hints::dependency_cycle()
                );
            }
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for an invalid package.toml
    pub fn invalid_manifest() -> &'static str {
        "package.toml is invalid. Common issues:\n\
         • Missing [package] section or name field\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • A dependency entry with more than one version_* constraint key"
    }

    /// Get hint for a dependency cycle
    pub fn dependency_cycle() -> &'static str {
        "A topological order cannot be computed while these packages depend on\n\
         each other. Remove one of the listed dependencies, or move it to a\n\
         category outside --recursive-categories."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_names_full_cycle() {
        let err = WsinfoError::cyclic_dependency(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: a -> b -> c -> a"
        );
    }

    #[test]
    fn test_manifest_error_carries_hint() {
        let err = WsinfoError::manifest_error("/ws/pkg/package.toml", "bad toml", None);
        match err {
            WsinfoError::Manifest { hint, .. } => assert!(hint.is_some()),
            _ => panic!("expected manifest error"),
        }
    }
}
