//! Dependency Graph
//!
//! This module implements the directed dependency graph between axis widgets
//! and the plotters that use them, and the evaluation order derived from it.
//!
//! # Overview
//!
//! Some plotters tell an axis how wide its range must be; some plotters need
//! a finalized axis range before they can compute their own geometry. Both
//! relationships become directed edges between `(widget, aspect)` vertices:
//!
//! - Vertices represent one facet of a widget ([`DepNode`]): an axis as a
//!   whole, or a single named dependency of a plotter.
//! - An edge points from producer to consumer: the consumer must not be
//!   evaluated until the producer has been.
//!
//! # Design Decisions
//!
//! 1. Vertices are `(widget, aspect)` pairs rather than bare widgets so a
//!    plotter's x and y dependencies order independently; one of them can
//!    sit on a cycle without dragging the other in.
//!
//! 2. Edges and vertex discovery keep insertion order throughout
//!    (`Vec` + `IndexMap`), because the scheduler's tie-breaking, and hence
//!    the final numeric ranges, must be identical across repeated passes on
//!    an unchanged tree.
//!
//! 3. The whole graph is transient: built, ordered, consumed and dropped
//!    within one layout pass. Nothing here outlives the borrow of the tree.

mod builder;
mod node;
mod scheduler;

pub use builder::DependencyGraph;
pub use node::{Aspect, DepNode, Edge};
pub use scheduler::Schedule;
