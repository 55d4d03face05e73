//! Dependency graph engine
//!
//! This module provides direct/recursive dependency resolution, cycle
//! detection, breadth-first topological ordering, and version constraint
//! checking over the immutable package set.

pub mod constraint;
pub mod resolver;
pub mod sequencer;

pub use constraint::{check_constraints, ConsoleWarningSink, ConstraintWarning, WarningSink};
pub use resolver::{direct_dependencies, find_cycle, package_index, recursive_dependencies};
pub use sequencer::{decorate, default_recursive_categories, topological_order};
