//! Dependency version constraint checking
//!
//! Evaluates declared version constraints between workspace packages and
//! reports violations as non-fatal warnings. Missing packages, missing
//! versions, and unparseable version strings are skipped silently so one
//! malformed package never blocks inspection of the rest.

use std::fmt;

use console::style;
use semver::Version;

use crate::dependency::resolver::package_index;
use crate::package::{ComparisonOp, PackageDescriptor};

/// A violated constraint, reported through a [`WarningSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintWarning {
    /// Package declaring the constraint
    pub dependent: String,

    /// Target package of the dependency
    pub dependency: String,

    /// Declared comparison operator
    pub operator: ComparisonOp,

    /// Version literal from the constraint
    pub expected: String,

    /// Version actually recorded for the target package
    pub actual: String,
}

impl fmt::Display for ConstraintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "package '{}' depends on '{}' with constraint '{} {}' but the resolved version is '{}'",
            self.dependent, self.dependency, self.operator, self.expected, self.actual
        )
    }
}

/// Injected warning capability for constraint checking
///
/// Commands pass the console sink; tests substitute a capturing one to
/// assert on the emitted warnings.
pub trait WarningSink {
    /// Report one violated constraint
    fn warn(&mut self, warning: ConstraintWarning);
}

/// Sink printing warnings to stderr in the standard terminal style
#[derive(Debug, Default)]
pub struct ConsoleWarningSink;

impl WarningSink for ConsoleWarningSink {
    fn warn(&mut self, warning: ConstraintWarning) {
        eprintln!("{}: {}", style("warning").yellow().bold(), warning);
    }
}

/// Check every declared version constraint against resolved package versions
///
/// One warning per violated constraint; never aborts. Invoked once per
/// inspection run, so the O(packages x dependencies) scan is not cached.
pub fn check_constraints(packages: &[PackageDescriptor], sink: &mut dyn WarningSink) {
    let index = package_index(packages);

    for pkg in packages {
        for refs in pkg.dependencies.values() {
            for dep in refs {
                let Some(constraint) = &dep.constraint else {
                    continue;
                };
                // A dependency outside the known set is not this layer's
                // concern.
                let Some(target) = index.get(dep.name.as_str()) else {
                    continue;
                };
                let Some(actual_str) = target.version() else {
                    continue;
                };
                let Some(actual) = parse_loose_version(actual_str) else {
                    continue;
                };
                let Some(expected) = parse_loose_version(&constraint.version) else {
                    continue;
                };

                if !evaluate(constraint.op, &actual, &expected) {
                    sink.warn(ConstraintWarning {
                        dependent: pkg.name.clone(),
                        dependency: dep.name.clone(),
                        operator: constraint.op,
                        expected: constraint.version.clone(),
                        actual: actual_str.to_string(),
                    });
                }
            }
        }
    }
}

fn evaluate(op: ComparisonOp, actual: &Version, expected: &Version) -> bool {
    match op {
        ComparisonOp::Eq => actual == expected,
        ComparisonOp::Neq => actual != expected,
        ComparisonOp::Gt => actual > expected,
        ComparisonOp::Gte => actual >= expected,
        ComparisonOp::Lt => actual < expected,
        ComparisonOp::Lte => actual <= expected,
    }
}

/// Tolerant, order-preserving version parse
///
/// Accepts full semver, plus bare numeric strings like "2" or "2.0" which
/// are padded with ".0" components. Anything else is unparseable and the
/// caller skips the constraint.
pub fn parse_loose_version(input: &str) -> Option<Version> {
    let input = input.trim();
    let input = input.strip_prefix('v').unwrap_or(input);

    if let Ok(version) = Version::parse(input) {
        return Some(version);
    }

    let parts: Vec<&str> = input.split('.').collect();
    if parts.is_empty() || parts.len() > 2 {
        return None;
    }
    if !parts
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let padded = if parts.len() == 1 {
        format!("{input}.0.0")
    } else {
        format!("{input}.0")
    };
    Version::parse(&padded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::DependencyRef;

    /// Capturing sink for assertions
    #[derive(Debug, Default)]
    struct CollectingSink {
        warnings: Vec<ConstraintWarning>,
    }

    impl WarningSink for CollectingSink {
        fn warn(&mut self, warning: ConstraintWarning) {
            self.warnings.push(warning);
        }
    }

    fn target_pkg(version: Option<&str>) -> PackageDescriptor {
        let mut pkg = PackageDescriptor::new("pkg_a", "/ws/pkg_a", "cmake");
        if let Some(v) = version {
            pkg.metadata.insert("version".to_string(), v.to_string());
        }
        pkg
    }

    fn dependent_pkg(op: Option<ComparisonOp>, literal: &str) -> PackageDescriptor {
        let mut pkg = PackageDescriptor::new("pkg_b", "/ws/pkg_b", "cmake");
        let dep = match op {
            Some(op) => DependencyRef::with_constraint("pkg_a", op, literal),
            None => DependencyRef::new("pkg_a"),
        };
        pkg.dependencies
            .insert("build".to_string(), [dep].into_iter().collect());
        pkg
    }

    fn warning_count(target_version: &str, op: ComparisonOp, literal: &str) -> usize {
        let packages = vec![target_pkg(Some(target_version)), dependent_pkg(Some(op), literal)];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        sink.warnings.len()
    }

    #[test]
    fn test_operator_matrix_against_literal() {
        // Actual versions 1.0 / 2.0 / 3.0 against literal 2.0, mirroring
        // the lt / eq / gt warning expectations per operator.
        let cases: &[(ComparisonOp, usize, usize, usize)] = &[
            (ComparisonOp::Eq, 1, 0, 1),
            (ComparisonOp::Gt, 1, 1, 0),
            (ComparisonOp::Gte, 1, 0, 0),
            (ComparisonOp::Lt, 0, 1, 1),
            (ComparisonOp::Lte, 0, 0, 1),
            (ComparisonOp::Neq, 0, 1, 0),
        ];
        for (op, expect_lt, expect_eq, expect_gt) in cases {
            assert_eq!(warning_count("1.0", *op, "2.0"), *expect_lt, "{op} vs 1.0");
            assert_eq!(warning_count("2.0", *op, "2.0"), *expect_eq, "{op} vs 2.0");
            assert_eq!(warning_count("3.0", *op, "2.0"), *expect_gt, "{op} vs 3.0");
        }
    }

    #[test]
    fn test_no_constraint_no_warning() {
        let packages = vec![target_pkg(Some("1.0")), dependent_pkg(None, "")];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_missing_dependency_is_skipped() {
        let packages = vec![dependent_pkg(Some(ComparisonOp::Eq), "2.0")];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_missing_version_is_skipped() {
        let packages = vec![target_pkg(None), dependent_pkg(Some(ComparisonOp::Eq), "2.0")];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_invalid_actual_version_is_skipped() {
        let packages = vec![
            target_pkg(Some("totally!invalid&version")),
            dependent_pkg(Some(ComparisonOp::Eq), "2.0"),
        ];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_invalid_literal_is_skipped() {
        let packages = vec![
            target_pkg(Some("2.0")),
            dependent_pkg(Some(ComparisonOp::Eq), "totally!invalid&version"),
        ];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);
        assert!(sink.warnings.is_empty());
    }

    #[test]
    fn test_warning_identifies_violation() {
        let packages = vec![target_pkg(Some("1.0")), dependent_pkg(Some(ComparisonOp::Eq), "2.0")];
        let mut sink = CollectingSink::default();
        check_constraints(&packages, &mut sink);

        assert_eq!(sink.warnings.len(), 1);
        let warning = &sink.warnings[0];
        assert_eq!(warning.dependent, "pkg_b");
        assert_eq!(warning.dependency, "pkg_a");
        assert_eq!(warning.operator, ComparisonOp::Eq);
        assert_eq!(warning.expected, "2.0");
        assert_eq!(warning.actual, "1.0");
    }

    #[test]
    fn test_parse_loose_version() {
        assert_eq!(parse_loose_version("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_loose_version("2.0"), Some(Version::new(2, 0, 0)));
        assert_eq!(parse_loose_version("2"), Some(Version::new(2, 0, 0)));
        assert_eq!(parse_loose_version("v1.4"), Some(Version::new(1, 4, 0)));
        assert!(parse_loose_version("1.0.0-rc.1").is_some());
        assert_eq!(parse_loose_version("totally!invalid&version"), None);
        assert_eq!(parse_loose_version("1.2.3.4"), None);
        assert_eq!(parse_loose_version(""), None);
    }

    #[test]
    fn test_version_ordering_is_numeric() {
        // "1.10" must sort after "1.9"
        let newer = parse_loose_version("1.10").unwrap();
        let older = parse_loose_version("1.9").unwrap();
        assert!(newer > older);
    }
}
