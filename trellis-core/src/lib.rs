//! Trellis Core
//!
//! This crate provides the axis-range dependency resolution engine for the
//! Trellis plotting framework. It implements:
//!
//! - Capability traits through which the widget tree is observed
//! - Dependency graph construction between axes and plotters
//! - Cycle-tolerant topological scheduling
//! - Two-phase range propagation with automatic fallback
//!
//! # Architecture
//!
//! Axis ranges in a Trellis document are not fixed by the user; they are
//! inferred from the plotters that draw against them. Some plotters in turn
//! need a finalized axis range before they can compute their own extent
//! (a curve `x = f(y)` must know the y range first), which makes the
//! relationship between axes and plotters a directed graph that has to be
//! evaluated in dependency order, and tolerated rather than rejected when a
//! user wires it into a cycle.
//!
//! The crate is organized into three modules:
//!
//! - `widget`: borrowed capability traits ([`Widget`], [`Axis`],
//!   [`AxisUser`]) the surrounding document system implements
//! - `graph`: graph construction and topological scheduling
//! - `resolve`: range accumulation and the resolution pass itself
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_core::resolve_axis_ranges;
//!
//! // `page` is the root of a widget tree implementing the capability
//! // traits; one call per layout pass resolves every axis below it.
//! let resolution = resolve_axis_ranges(&page);
//!
//! for (axis, range) in &resolution.ranges {
//!     println!("axis {axis}: {range:?}");
//! }
//! // Unresolved axis references are reported per widget, the rest of the
//! // tree still resolves:
//! for err in &resolution.errors {
//!     eprintln!("{err}");
//! }
//! ```

pub mod error;
pub mod graph;
pub mod resolve;
pub mod widget;

pub use error::ResolveError;
pub use graph::{Aspect, DepNode, DependencyGraph, Edge, Schedule};
pub use resolve::{resolve_axis_ranges, RangeAccumulator, Resolution, ResolvedRange};
pub use widget::{Axis, AxisUser, Widget, WidgetId};
