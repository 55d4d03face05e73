//! Graph rendering
//!
//! Turns the decorated package set into an ASCII adjacency matrix or a
//! Graphviz DOT digraph. Both renderers only emit packages marked selected,
//! but rely on decorators produced over the full package set so that row
//! positions and indirect reachability stay correct.

pub mod dot;
pub mod matrix;

pub use dot::render_dot;
pub use matrix::{render_matrix, MatrixOptions};
