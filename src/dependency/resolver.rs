//! Direct and recursive dependency resolution
//!
//! Pure functions over the immutable package set. Dependency references to
//! packages outside the known set are dropped silently; they belong to the
//! surrounding system and are not an error at this layer.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::package::PackageDescriptor;

/// Build a name -> descriptor lookup over the package set
pub fn package_index(packages: &[PackageDescriptor]) -> BTreeMap<&str, &PackageDescriptor> {
    packages.iter().map(|pkg| (pkg.name.as_str(), pkg)).collect()
}

/// Target names referenced by `pkg` under the given categories
///
/// `None` means all categories. Unknown categories contribute nothing.
pub fn direct_dependencies(
    pkg: &PackageDescriptor,
    categories: Option<&BTreeSet<String>>,
) -> BTreeSet<String> {
    pkg.dependencies
        .iter()
        .filter(|(category, _)| categories.map_or(true, |wanted| wanted.contains(*category)))
        .flat_map(|(_, refs)| refs.iter().map(|dep| dep.name.clone()))
        .collect()
}

/// Transitive closure of `pkg`'s direct dependencies restricted to
/// `categories`, expanded to a fixed point over the known package set
///
/// The result never contains `pkg` itself and never contains names absent
/// from `index`. Terminates on cyclic inputs; cycle reporting is handled by
/// [`find_cycle`].
pub fn recursive_dependencies(
    pkg: &PackageDescriptor,
    index: &BTreeMap<&str, &PackageDescriptor>,
    categories: Option<&BTreeSet<String>>,
) -> BTreeSet<String> {
    let mut closure: BTreeSet<String> = direct_dependencies(pkg, categories)
        .into_iter()
        .filter(|name| index.contains_key(name.as_str()))
        .collect();

    let mut pending: Vec<String> = closure.iter().cloned().collect();
    while let Some(name) = pending.pop() {
        if let Some(dep) = index.get(name.as_str()) {
            for next in direct_dependencies(dep, categories) {
                if index.contains_key(next.as_str()) && closure.insert(next.clone()) {
                    pending.push(next);
                }
            }
        }
    }

    closure.remove(pkg.name.as_str());
    closure
}

/// Detect a dependency cycle within the given categories
///
/// Returns the package names forming the cycle, or None for acyclic input.
/// Starting nodes are visited in name order so the reported cycle is
/// deterministic.
pub fn find_cycle(
    packages: &[PackageDescriptor],
    categories: Option<&BTreeSet<String>>,
) -> Option<Vec<String>> {
    let index = package_index(packages);
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for name in index.keys() {
        if !visited.contains(*name) {
            if let Some(cycle) = dfs_cycle(
                name,
                &index,
                categories,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                return Some(cycle);
            }
        }
    }

    None
}

/// DFS-based cycle detection helper
fn dfs_cycle(
    node: &str,
    index: &BTreeMap<&str, &PackageDescriptor>,
    categories: Option<&BTreeSet<String>>,
    visited: &mut HashSet<String>,
    rec_stack: &mut HashSet<String>,
    path: &mut Vec<String>,
) -> Option<Vec<String>> {
    visited.insert(node.to_string());
    rec_stack.insert(node.to_string());
    path.push(node.to_string());

    if let Some(pkg) = index.get(node) {
        for neighbor in direct_dependencies(pkg, categories) {
            if !index.contains_key(neighbor.as_str()) {
                continue;
            }
            if !visited.contains(&neighbor) {
                if let Some(cycle) =
                    dfs_cycle(&neighbor, index, categories, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(&neighbor) {
                // Found a cycle, extract it from the path
                let cycle_start = path.iter().position(|n| n == &neighbor).unwrap();
                return Some(path[cycle_start..].to_vec());
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}
