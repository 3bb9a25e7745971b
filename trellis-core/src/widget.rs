//! Widget Capabilities
//!
//! The resolver never owns the widget tree. It borrows it for the duration
//! of one resolution pass through a small set of capability traits:
//!
//! - [`Widget`]: tree traversal and identity. Every node implements this.
//! - [`Axis`]: a widget representing one coordinate dimension. It receives
//!   the resolved range at the end of a pass.
//! - [`AxisUser`]: a widget (a "plotter") that reads from or contributes to
//!   the ranges of one or more axes.
//!
//! A node exposes its capabilities through `as_axis` / `as_axis_user`, which
//! the graph builder queries exactly once per node during traversal. This
//! keeps capability dispatch out of the inner propagation loop.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::graph::Aspect;
use crate::resolve::{RangeAccumulator, ResolvedRange};

/// Unique identifier for a widget in the tree.
///
/// Identity, not ownership: the resolver keys all of its maps by `WidgetId`
/// and holds borrowed capability handles alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Generate a new unique widget ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<u64> for WidgetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the widget tree.
///
/// The tree is read-only during a resolution pass; the only mutation the
/// resolver ever performs is [`Axis::set_resolved_range`], once per axis.
pub trait Widget {
    /// Stable identity of this widget for the duration of the pass.
    fn id(&self) -> WidgetId;

    /// Child widgets, in document order.
    fn children(&self) -> Vec<&dyn Widget> {
        Vec::new()
    }

    /// The axis capability of this widget, if it is an axis.
    fn as_axis(&self) -> Option<&dyn Axis> {
        None
    }

    /// The axis-user capability of this widget, if it plots against axes.
    fn as_axis_user(&self) -> Option<&dyn AxisUser> {
        None
    }
}

/// A widget representing one coordinate dimension.
pub trait Axis: Widget {
    /// Receive the resolved range for this axis.
    ///
    /// Called exactly once per axis per resolution pass. Implementations
    /// typically store the value with interior mutability; layout code reads
    /// it back after the pass completes.
    fn set_resolved_range(&self, range: ResolvedRange);
}

/// A widget that reads from or contributes to axis ranges.
///
/// Each dependency of the widget is identified by an [`Aspect`] (e.g. `"sx"`
/// and `"sy"` for the x and y data of an xy plotter), so a single widget can
/// participate in several independent dependencies.
pub trait AxisUser: Widget {
    /// Names of the axes this widget plots against (e.g. `"x"`, `"y"`).
    fn axes_names(&self) -> Vec<Aspect>;

    /// Resolve a declared axis name to the axis widget it refers to.
    ///
    /// Returns `None` when the name does not match any axis reachable from
    /// this widget; the resolver reports that as an unresolved reference and
    /// skips this widget's contribution.
    fn lookup_axis(&self, name: &Aspect) -> Option<WidgetId>;

    /// Pairs `(own aspect, axis name)`: this aspect supplies range
    /// information to the named axis.
    fn affects_axis_range(&self) -> Vec<(Aspect, Aspect)>;

    /// Pairs `(own aspect, axis name)`: this aspect needs the named axis's
    /// range to be finalized before it can compute its own geometry.
    fn requires_axis_range(&self) -> Vec<(Aspect, Aspect)>;

    /// Widen `acc` with the data this aspect would plot on `axis`.
    ///
    /// The accumulator is threaded through by value and returned; the
    /// propagator unions the result with its own copy, so an implementation
    /// can only ever widen the range, never narrow it.
    fn get_range(&self, axis: WidgetId, aspect: &Aspect, acc: RangeAccumulator) -> RangeAccumulator;

    /// Hidden widgets are excluded from contributing ranges, but do not
    /// block dependencies flowing through them.
    fn is_hidden(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_ids_are_unique() {
        let id1 = WidgetId::new();
        let id2 = WidgetId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn widget_id_from_raw() {
        let id = WidgetId::from(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{id}"), "#42");
    }
}
