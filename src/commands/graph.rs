//! Graph command implementation

use anyhow::Result;
use clap::Args;

use crate::commands::{recursive_categories, DiscoveryArgs};
use crate::dependency::constraint::{check_constraints, ConsoleWarningSink};
use crate::dependency::sequencer::topological_order;
use crate::render::{render_dot, render_matrix, MatrixOptions};
use crate::selection::SelectionArgs;

/// Render the package dependency graph
#[derive(Args, Debug)]
pub struct GraphCommand {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output a Graphviz DOT digraph instead of the ASCII matrix
    #[arg(long)]
    pub dot: bool,

    /// Print a legend explaining the matrix markers
    #[arg(long, conflicts_with = "dot")]
    pub legend: bool,

    /// Append the dependency density of the matrix
    #[arg(long, conflicts_with = "dot")]
    pub density: bool,

    /// Order rows alphabetically instead of by dependency distance
    #[arg(long)]
    pub alphabetical: bool,

    /// Dependency categories considered for recursive resolution
    #[arg(long, value_name = "CATEGORY", num_args = 1..)]
    pub recursive_categories: Vec<String>,
}

impl GraphCommand {
    /// Execute the graph command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let workspace = self.discovery.discover()?;
        if verbose {
            eprintln!("Discovered {} package(s)", workspace.len());
        }
        if workspace.is_empty() {
            eprintln!("No packages found");
            return Ok(());
        }

        // Constraint violations are advisory and never block rendering
        let mut sink = ConsoleWarningSink;
        check_constraints(&workspace.packages, &mut sink);

        let categories = recursive_categories(&self.recursive_categories);
        let mut decorators = topological_order(&workspace.packages, &categories)?;
        if self.alphabetical {
            decorators.sort_by(|a, b| a.name().cmp(b.name()));
        }
        self.selection.apply(&mut decorators);

        let output = if self.dot {
            render_dot(&decorators)
        } else {
            render_matrix(
                &decorators,
                &MatrixOptions {
                    legend: self.legend,
                    density: self.density,
                },
            )
        };
        print!("{output}");
        Ok(())
    }
}
