//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{graph::GraphCommand, info::InfoCommand, list::ListCommand};

/// wsinfo - Workspace Package Inspector
///
/// Discovers the packages of a workspace and reports on their dependency
/// relationships.
#[derive(Parser, Debug)]
#[command(name = "wsinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List workspace packages, optionally in topological order
    List(ListCommand),

    /// Show detailed information about packages
    Info(InfoCommand),

    /// Render the package dependency graph
    Graph(GraphCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Execute the subcommand
        match self.command {
            Commands::List(cmd) => cmd.execute(self.verbose),
            Commands::Info(cmd) => cmd.execute(self.verbose),
            Commands::Graph(cmd) => cmd.execute(self.verbose),
        }
    }
}
