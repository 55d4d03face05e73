//! Info command implementation

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

use crate::commands::DiscoveryArgs;
use crate::package::{DependencyRef, PackageDescriptor};

/// Output format for package information
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Show detailed information about packages
#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Restrict the report to packages under this path
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Only report on the named packages
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub packages_select: Option<Vec<String>>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl InfoCommand {
    /// Execute the info command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let discovery = match &self.path {
            Some(path) => DiscoveryArgs {
                base_paths: vec![path.clone()],
            },
            None => self.discovery.clone(),
        };
        let workspace = discovery.discover()?;
        if verbose {
            eprintln!("Discovered {} package(s)", workspace.len());
        }

        let reported: Vec<&PackageDescriptor> = workspace
            .packages
            .iter()
            .filter(|pkg| match &self.packages_select {
                Some(select) => select.iter().any(|name| name == &pkg.name),
                None => true,
            })
            .collect();

        if reported.is_empty() {
            eprintln!("No package found");
            return Ok(());
        }

        match self.format {
            OutputFormat::Text => {
                for pkg in &reported {
                    print!("{}", render_text(pkg));
                }
            }
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = reported.iter().map(|p| render_json(p)).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }
        Ok(())
    }
}

fn format_dependency(dep: &DependencyRef) -> String {
    match &dep.constraint {
        Some(constraint) => format!("{} ({} {})", dep.name, constraint.op, constraint.version),
        None => dep.name.clone(),
    }
}

fn render_text(pkg: &PackageDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "path: {}", pkg.path.display());
    let _ = writeln!(out, "  type: {}", pkg.kind);
    let _ = writeln!(out, "  name: {}", pkg.name);

    if !pkg.dependencies.is_empty() {
        let _ = writeln!(out, "  dependencies:");
        for (category, refs) in &pkg.dependencies {
            let entries: Vec<String> = refs.iter().map(format_dependency).collect();
            let _ = writeln!(out, "    {category}: {}", entries.join(" "));
        }
    }
    if !pkg.hooks.is_empty() {
        let _ = writeln!(out, "  hooks: {}", pkg.hooks.join(" "));
    }
    if !pkg.metadata.is_empty() {
        let _ = writeln!(out, "  metadata:");
        for (key, value) in &pkg.metadata {
            let _ = writeln!(out, "    {key}: {value}");
        }
    }
    out
}

fn render_json(pkg: &PackageDescriptor) -> serde_json::Value {
    let dependencies: serde_json::Map<String, serde_json::Value> = pkg
        .dependencies
        .iter()
        .map(|(category, refs)| {
            let entries: Vec<serde_json::Value> = refs
                .iter()
                .map(|dep| match &dep.constraint {
                    Some(constraint) => json!({
                        "name": dep.name,
                        constraint.op.key(): constraint.version,
                    }),
                    None => json!(dep.name),
                })
                .collect();
            (category.clone(), json!(entries))
        })
        .collect();

    json!({
        "name": pkg.name,
        "path": pkg.path.display().to_string(),
        "type": pkg.kind,
        "dependencies": dependencies,
        "hooks": pkg.hooks,
        "metadata": pkg.metadata,
    })
}
