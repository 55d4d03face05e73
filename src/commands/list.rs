//! List command implementation

use anyhow::Result;
use clap::Args;

use crate::commands::{recursive_categories, DiscoveryArgs};
use crate::dependency::sequencer::{decorate, topological_order};
use crate::package::PackageDecorator;
use crate::selection::SelectionArgs;

/// List workspace packages
#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Order output by dependencies instead of alphabetically
    #[arg(short = 't', long)]
    pub topological_order: bool,

    /// Output only the package names
    #[arg(short = 'n', long, conflicts_with = "paths_only")]
    pub names_only: bool,

    /// Output only the package paths
    #[arg(short = 'p', long)]
    pub paths_only: bool,

    /// Dependency categories considered for recursive resolution
    #[arg(long, value_name = "CATEGORY", num_args = 1..)]
    pub recursive_categories: Vec<String>,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let workspace = self.discovery.discover()?;
        if verbose {
            eprintln!("Discovered {} package(s)", workspace.len());
        }
        if workspace.is_empty() {
            eprintln!("No packages found");
            return Ok(());
        }

        let categories = recursive_categories(&self.recursive_categories);
        let mut decorators = if self.topological_order {
            topological_order(&workspace.packages, &categories)?
        } else {
            decorate(&workspace.packages, &categories)
        };
        self.selection.apply(&mut decorators);

        let mut lines: Vec<String> = decorators
            .iter()
            .filter(|d| d.selected)
            .map(|d| self.format_line(d))
            .collect();
        // Alphabetical mode sorts the emitted lines, not the package names,
        // so paths-only output comes out in path order
        if !self.topological_order {
            lines.sort();
        }
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    fn format_line(&self, decorator: &PackageDecorator<'_>) -> String {
        let descriptor = decorator.descriptor;
        if self.names_only {
            descriptor.name.clone()
        } else if self.paths_only {
            descriptor.path.display().to_string()
        } else {
            format!(
                "{}\t{}\t({})",
                descriptor.name,
                descriptor.path.display(),
                descriptor.kind
            )
        }
    }
}
