//! Breadth-first topological ordering of packages
//!
//! Produces the processing order rendering stages rely on: a package becomes
//! ready once all of its recursive dependencies (within the configured
//! categories) are processed, and each breadth-first layer is appended in
//! name-sorted order so ties break deterministically.

use std::collections::{BTreeMap, BTreeSet};

use crate::dependency::resolver::{find_cycle, package_index, recursive_dependencies};
use crate::error::WsinfoError;
use crate::package::{PackageDecorator, PackageDescriptor};

/// Default categories used for the transitive closure
pub fn default_recursive_categories() -> BTreeSet<String> {
    ["run".to_string()].into_iter().collect()
}

/// Decorate packages in name order, without imposing a dependency order
///
/// Used by the views that do not need sequencing; unlike
/// [`topological_order`] this never fails, so cyclic workspaces can still
/// be listed and inspected.
pub fn decorate<'a>(
    packages: &'a [PackageDescriptor],
    recursive_categories: &BTreeSet<String>,
) -> Vec<PackageDecorator<'a>> {
    let index = package_index(packages);
    let categories = Some(recursive_categories);

    let mut decorators: Vec<PackageDecorator<'a>> = packages
        .iter()
        .map(|pkg| PackageDecorator {
            descriptor: pkg,
            selected: true,
            recursive_dependencies: recursive_dependencies(pkg, &index, categories),
        })
        .collect();
    decorators.sort_by(|a, b| a.name().cmp(b.name()));
    decorators
}

/// Order packages into a dependency-respecting, breadth-first sequence
///
/// Every package gets exactly one decorator carrying the recursive closure
/// computed at this pass's categories; decorators start selected. Fails with
/// [`WsinfoError::CyclicDependency`] when no package can become ready while
/// unprocessed packages remain.
pub fn topological_order<'a>(
    packages: &'a [PackageDescriptor],
    recursive_categories: &BTreeSet<String>,
) -> Result<Vec<PackageDecorator<'a>>, WsinfoError> {
    let index = package_index(packages);
    let categories = Some(recursive_categories);

    // Closures are computed once here and cached on the decorators; the
    // renderers reuse them instead of re-deriving per call.
    let mut remaining: BTreeMap<&str, (&PackageDescriptor, BTreeSet<String>)> = packages
        .iter()
        .map(|pkg| {
            let closure = recursive_dependencies(pkg, &index, categories);
            (pkg.name.as_str(), (pkg, closure))
        })
        .collect();

    let mut processed: BTreeSet<String> = BTreeSet::new();
    let mut ordered = Vec::with_capacity(packages.len());

    while !remaining.is_empty() {
        // All currently ready packages form one layer; BTreeMap iteration
        // keeps each layer name-sorted.
        let ready: Vec<String> = remaining
            .iter()
            .filter(|(_, (_, deps))| deps.iter().all(|dep| processed.contains(dep)))
            .map(|(name, _)| name.to_string())
            .collect();

        if ready.is_empty() {
            if let Some(cycle) = find_cycle(packages, categories) {
                return Err(WsinfoError::cyclic_dependency(cycle));
            }
            // Closures only contain known names, so a stall without a cycle
            // should not happen; report the remainder rather than spin.
            let stuck: Vec<String> = remaining.keys().map(|name| name.to_string()).collect();
            return Err(WsinfoError::cyclic_dependency(stuck));
        }

        for name in &ready {
            if let Some((pkg, closure)) = remaining.remove(name.as_str()) {
                ordered.push(PackageDecorator {
                    descriptor: pkg,
                    selected: true,
                    recursive_dependencies: closure,
                });
            }
        }
        processed.extend(ready);
    }

    Ok(ordered)
}
