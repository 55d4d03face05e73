//! Command implementations

pub mod graph;
pub mod info;
pub mod list;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;

use crate::dependency::sequencer::default_recursive_categories;
use crate::workspace::Workspace;

/// Flags shared by every command that crawls the workspace
#[derive(Args, Debug, Clone)]
pub struct DiscoveryArgs {
    /// Base paths to crawl for packages
    #[arg(long, value_name = "PATH", num_args = 1.., default_value = ".")]
    pub base_paths: Vec<PathBuf>,
}

impl DiscoveryArgs {
    pub fn discover(&self) -> anyhow::Result<Workspace> {
        Ok(Workspace::discover(&self.base_paths)?)
    }
}

/// Parse the --recursive-categories values, falling back to the default set
pub fn recursive_categories(values: &[String]) -> BTreeSet<String> {
    if values.is_empty() {
        default_recursive_categories()
    } else {
        values.iter().cloned().collect()
    }
}
