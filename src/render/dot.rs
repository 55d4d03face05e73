//! Graphviz DOT digraph rendering
//!
//! Direct edges are colored by the union of their categories; indirect
//! edges (reachable only through unselected packages) are dashed and
//! colored by the categories of the first hop. A direct edge always
//! suppresses the indirect edge for the same pair.

use std::collections::{BTreeMap, BTreeSet};

use crate::package::PackageDecorator;

/// Category colors in fixed priority order
const CATEGORY_COLORS: &[(&str, &str)] = &[("build", "blue"), ("run", "red"), ("test", "tan")];

/// Concatenate the colors of the present categories, priority-ordered,
/// joined by ':'
fn color_string(categories: &BTreeSet<String>) -> String {
    let colors: Vec<&str> = CATEGORY_COLORS
        .iter()
        .filter(|(category, _)| categories.contains(*category))
        .map(|(_, color)| *color)
        .collect();
    if colors.is_empty() {
        // Custom categories outside build/run/test carry no color of their own
        "black".to_string()
    } else {
        colors.join(":")
    }
}

/// Render the selected packages as a DOT digraph
pub fn render_dot(decorators: &[PackageDecorator<'_>]) -> String {
    let selected: Vec<&PackageDecorator<'_>> = decorators.iter().filter(|d| d.selected).collect();
    let selected_names: BTreeSet<&str> = selected.iter().map(|d| d.name()).collect();
    let by_name: BTreeMap<&str, &PackageDecorator<'_>> =
        decorators.iter().map(|d| (d.name(), d)).collect();

    let mut out = String::from("digraph graphname {\n");
    for decorator in &selected {
        out.push_str(&format!("  \"{}\";\n", decorator.name()));
    }

    // Direct edges, categories merged per (source, target) pair
    let mut direct: BTreeMap<(&str, &str), BTreeSet<String>> = BTreeMap::new();
    for decorator in &selected {
        for (category, refs) in &decorator.descriptor.dependencies {
            for dep in refs {
                if selected_names.contains(dep.name.as_str()) {
                    direct
                        .entry((decorator.name(), dep.name.as_str()))
                        .or_default()
                        .insert(category.clone());
                }
            }
        }
    }

    // Indirect edges through unselected intermediates. Intermediates are
    // visited in name order and the first one producing a pair fixes the
    // edge's categories (taken from the source -> intermediate hop).
    let mut indirect: BTreeMap<(&str, &str), BTreeSet<String>> = BTreeMap::new();
    for decorator in &selected {
        let mut first_hops: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for (category, refs) in &decorator.descriptor.dependencies {
            for dep in refs {
                if !selected_names.contains(dep.name.as_str())
                    && by_name.contains_key(dep.name.as_str())
                {
                    first_hops
                        .entry(dep.name.as_str())
                        .or_default()
                        .insert(category.clone());
                }
            }
        }

        for (hop, categories) in &first_hops {
            let hop_decorator = by_name[hop];
            for target in &hop_decorator.recursive_dependencies {
                if !selected_names.contains(target.as_str()) {
                    continue;
                }
                let pair = (decorator.name(), target.as_str());
                if direct.contains_key(&pair) {
                    continue;
                }
                indirect.entry(pair).or_insert_with(|| categories.clone());
            }
        }
    }

    for ((from, to), categories) in &direct {
        out.push_str(&format!(
            "  \"{from}\" -> \"{to}\" [color=\"{}\"];\n",
            color_string(categories)
        ));
    }
    for ((from, to), categories) in &indirect {
        out.push_str(&format!(
            "  \"{from}\" -> \"{to}\" [color=\"{}\", style=\"dashed\"];\n",
            color_string(categories)
        ));
    }

    out.push('}');
    out.push('\n');
    out
}
