//! Package selection arguments shared by the list and graph commands

use clap::Args;

use crate::package::PackageDecorator;

/// Flags narrowing the set of packages a command reports on
///
/// Deselected packages stay in the decorator slice so renderers can still
/// reason about indirect reachability through them.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Only process a subset of packages
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub packages_select: Option<Vec<String>>,

    /// Skip a set of packages
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub packages_skip: Option<Vec<String>>,

    /// Only process a subset of packages and their recursive dependencies
    #[arg(long, value_name = "PKG", num_args = 1..)]
    pub packages_up_to: Option<Vec<String>>,
}

impl SelectionArgs {
    /// Apply the selection flags to an already decorated package set
    ///
    /// Order matters: up-to widens from the named targets, select then
    /// restricts, skip always wins.
    pub fn apply(&self, decorators: &mut [PackageDecorator<'_>]) {
        if let Some(up_to) = &self.packages_up_to {
            let mut keep: Vec<String> = Vec::new();
            for decorator in decorators.iter() {
                if up_to.iter().any(|name| name == decorator.name()) {
                    keep.push(decorator.name().to_string());
                    keep.extend(decorator.recursive_dependencies.iter().cloned());
                }
            }
            for decorator in decorators.iter_mut() {
                if !keep.iter().any(|name| name == decorator.name()) {
                    decorator.selected = false;
                }
            }
        }

        if let Some(select) = &self.packages_select {
            for decorator in decorators.iter_mut() {
                if !select.iter().any(|name| name == decorator.name()) {
                    decorator.selected = false;
                }
            }
        }

        if let Some(skip) = &self.packages_skip {
            for decorator in decorators.iter_mut() {
                if skip.iter().any(|name| name == decorator.name()) {
                    decorator.selected = false;
                }
            }
        }
    }
}
