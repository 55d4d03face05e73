//! wsinfo - Workspace Package Inspector
//!
//! Discovers packages by their `package.toml` manifests and answers
//! questions about them: what is here, what does each package need, and
//! in what order do they build.

mod cli;
mod commands;
mod dependency;
mod error;
mod package;
mod render;
mod selection;
mod workspace;

use std::process;

use clap::Parser;

use cli::Cli;
use error::WsinfoError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        match err.downcast_ref::<WsinfoError>() {
            Some(wsinfo_err) => wsinfo_err.display_with_hints(),
            None => eprintln!("{}: {err:#}", console::style("ERROR").red().bold()),
        }
        process::exit(1);
    }
}
