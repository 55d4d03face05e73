//! ASCII dependency matrix rendering

use crate::dependency::resolver::direct_dependencies;
use crate::package::PackageDecorator;

/// Matrix rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixOptions {
    /// Print a legend explaining the markers before the matrix
    pub legend: bool,

    /// Append the dependency density of the matrix
    pub density: bool,
}

/// Render the selected packages as an adjacency matrix
///
/// Rows and columns follow the order of `decorators`; pass them in
/// sequencer order for dependency-distance reasoning or name-sorted for
/// alphabetical output. Cell markers: `+` on the diagonal, `*` for a direct
/// dependency (any category), `.` for a transitive-only dependency.
pub fn render_matrix(decorators: &[PackageDecorator<'_>], options: &MatrixOptions) -> String {
    let selected: Vec<&PackageDecorator<'_>> = decorators.iter().filter(|d| d.selected).collect();

    let mut out = String::new();
    if options.legend {
        out.push_str("+ marks the package in this row\n");
        out.push_str("* marks a direct dependency of the package in this row\n");
        out.push_str(". marks a transitive dependency of the package in this row\n");
    }

    let label_width = selected
        .iter()
        .map(|d| d.name().len())
        .max()
        .unwrap_or(0)
        + 2;

    let mut empty_cells = 0usize;
    for row in &selected {
        let direct = direct_dependencies(row.descriptor, None);
        let mut line = format!("{:<width$}", row.name(), width = label_width);
        for col in &selected {
            let marker = if row.name() == col.name() {
                '+'
            } else if direct.contains(col.name()) {
                '*'
            } else if row.recursive_dependencies.contains(col.name()) {
                '.'
            } else {
                empty_cells += 1;
                ' '
            };
            line.push(marker);
        }
        out.push_str(&line);
        out.push('\n');
    }

    if options.density {
        let n = selected.len();
        // The 200x factor normalizes against the DAG maximum of half the
        // off-diagonal cells being non-empty.
        let density = if n > 1 {
            200.0 * (1.0 - empty_cells as f64 / (n * (n - 1)) as f64)
        } else {
            100.0
        };
        out.push_str(&format!("density {density:.2}%\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::sequencer::{default_recursive_categories, topological_order};
    use crate::package::{DependencyRef, PackageDescriptor};

    fn pkg(name: &str, run_deps: &[&str]) -> PackageDescriptor {
        let mut descriptor = PackageDescriptor::new(name, format!("/ws/{name}"), "cmake");
        if !run_deps.is_empty() {
            let refs = run_deps.iter().map(|t| DependencyRef::new(*t)).collect();
            descriptor.dependencies.insert("run".to_string(), refs);
        }
        descriptor
    }

    fn matrix_for(packages: &[PackageDescriptor], options: &MatrixOptions) -> String {
        let decorators = topological_order(packages, &default_recursive_categories()).unwrap();
        render_matrix(&decorators, options)
    }

    #[test]
    fn test_markers_for_chain() {
        let packages = vec![pkg("app", &["lib"]), pkg("lib", &["base"]), pkg("base", &[])];
        let output = matrix_for(&packages, &MatrixOptions::default());

        // Sequencer order: base, lib, app. Longest name is 4, labels padded
        // to 6 columns.
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "base  +  ");
        assert_eq!(lines[1], "lib   *+ ");
        assert_eq!(lines[2], "app   .*+");
    }

    #[test]
    fn test_markers_are_mutually_exclusive() {
        // app depends on base both directly and through lib; the cell must
        // show '*' only.
        let packages = vec![
            pkg("app", &["lib", "base"]),
            pkg("lib", &["base"]),
            pkg("base", &[]),
        ];
        let output = matrix_for(&packages, &MatrixOptions::default());

        let app_row = output.lines().find(|l| l.starts_with("app")).unwrap();
        // Labels are padded to 6 columns ("base" + 2)
        let cells: Vec<char> = app_row.chars().skip(6).collect();
        // Columns: base, lib, app
        assert_eq!(cells, vec!['*', '*', '+']);
    }

    #[test]
    fn test_density_chain_vs_independent() {
        let chain = vec![pkg("a", &["b"]), pkg("b", &["c"]), pkg("c", &[])];
        let chain_out = matrix_for(&chain, &MatrixOptions { legend: false, density: true });
        assert!(chain_out.ends_with("density 100.00%\n"), "{chain_out}");

        let independent = vec![pkg("a", &[]), pkg("b", &[]), pkg("c", &[])];
        let indep_out = matrix_for(&independent, &MatrixOptions { legend: false, density: true });
        assert!(indep_out.ends_with("density 0.00%\n"), "{indep_out}");
    }

    #[test]
    fn test_density_single_package_is_full() {
        let single = vec![pkg("only", &[])];
        let output = matrix_for(&single, &MatrixOptions { legend: false, density: true });
        assert!(output.ends_with("density 100.00%\n"), "{output}");
    }

    #[test]
    fn test_legend_precedes_matrix() {
        let packages = vec![pkg("a", &[])];
        let output = matrix_for(&packages, &MatrixOptions { legend: true, density: false });
        let first = output.lines().next().unwrap();
        assert!(first.starts_with('+'), "{output}");
        assert!(output.contains("* marks a direct dependency"));
    }

    #[test]
    fn test_unselected_rows_are_omitted() {
        let packages = vec![pkg("app", &["lib"]), pkg("lib", &[])];
        let mut decorators =
            topological_order(&packages, &default_recursive_categories()).unwrap();
        for d in &mut decorators {
            if d.name() == "lib" {
                d.selected = false;
            }
        }
        let output = render_matrix(&decorators, &MatrixOptions::default());
        assert_eq!(output, "app  +\n");
    }
}
