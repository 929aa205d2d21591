//! Per-algorithm step generators.
//!
//! Each driver advances one unit of observable progress at a time: mutate
//! the shared state, journal a line, wait on the clock. Cancellation is
//! observed at wait boundaries and abandons the pass where it stands,
//! leaving the partial state as-is.

mod bfs;
mod sort;
mod traverse;

pub(crate) use bfs::bfs;
pub(crate) use sort::{bubble_sort, quicksort};
pub(crate) use traverse::traverse;
