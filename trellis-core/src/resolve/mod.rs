//! Resolution Pass
//!
//! This module ties the pipeline together: build the dependency graph from
//! the widget tree, schedule it, propagate ranges, and hand the results
//! back for layout.
//!
//! A pass is synchronous, single-threaded and stateless: everything is
//! re-derived from the live tree each time and discarded afterwards. The
//! caller is responsible for not starting a second pass while one is in
//! flight, and for keeping the tree unchanged for the duration.
//!
//! There is no hard failure path. Cyclic graphs and axes without data
//! degrade to best-effort or automatic ranges; the only condition surfaced
//! to the caller is an unresolved axis reference, reported per offending
//! widget in [`Resolution::errors`] while the rest of the tree still
//! resolves.

mod propagator;
mod range;

pub use range::{RangeAccumulator, ResolvedRange};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::ResolveError;
use crate::graph::{DepNode, DependencyGraph, Schedule};
use crate::widget::{Widget, WidgetId};

/// Everything one resolution pass produces.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Final range per axis, in axis traversal order. Also written onto the
    /// axis widgets themselves via [`crate::widget::Axis::set_resolved_range`].
    pub ranges: IndexMap<WidgetId, ResolvedRange>,
    /// Axis to the plotters attached to it, for layout bookkeeping.
    pub axis_plotters: IndexMap<WidgetId, Vec<WidgetId>>,
    /// Vertices that sat on (or behind) a dependency cycle and were
    /// resolved best-effort.
    pub cyclic: Vec<DepNode>,
    /// Unresolved axis references encountered during the pass.
    pub errors: Vec<ResolveError>,
}

impl Resolution {
    /// The resolved range for `axis`, if it was part of the pass.
    pub fn range(&self, axis: WidgetId) -> Option<ResolvedRange> {
        self.ranges.get(&axis).copied()
    }

    /// The reverse attachment map: plotter to the axes it plots against.
    pub fn plotter_axes(&self) -> IndexMap<WidgetId, Vec<WidgetId>> {
        let mut map: IndexMap<WidgetId, Vec<WidgetId>> = IndexMap::new();
        for (&axis, plotters) in &self.axis_plotters {
            for &plotter in plotters {
                map.entry(plotter).or_default().push(axis);
            }
        }
        map
    }
}

/// Resolve the range of every axis in the tree below `root`.
///
/// This is the single entry point the drawing framework calls once per
/// layout pass.
pub fn resolve_axis_ranges(root: &dyn Widget) -> Resolution {
    let graph = DependencyGraph::build(root);
    let schedule = Schedule::compute(&graph.edges);
    let ranges = propagator::propagate(&graph, &schedule);

    debug!(
        axes = ranges.len(),
        edges = graph.edges.len(),
        cyclic = schedule.cyclic.len(),
        errors = graph.errors.len(),
        "resolution pass complete"
    );

    Resolution {
        ranges,
        axis_plotters: graph.axis_plotters,
        cyclic: schedule.cyclic.into_iter().collect(),
        errors: graph.errors,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::graph::Aspect;
    use crate::widget::{Axis, AxisUser};

    struct Page {
        id: WidgetId,
        children: Vec<Rc<dyn Widget>>,
    }

    impl Page {
        fn new(children: Vec<Rc<dyn Widget>>) -> Self {
            Self {
                id: WidgetId::new(),
                children,
            }
        }
    }

    impl Widget for Page {
        fn id(&self) -> WidgetId {
            self.id
        }

        fn children(&self) -> Vec<&dyn Widget> {
            self.children.iter().map(|c| &**c).collect()
        }
    }

    struct MockAxis {
        id: WidgetId,
        resolved: Cell<Option<ResolvedRange>>,
    }

    impl MockAxis {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                id: WidgetId::new(),
                resolved: Cell::new(None),
            })
        }
    }

    impl Widget for MockAxis {
        fn id(&self) -> WidgetId {
            self.id
        }

        fn as_axis(&self) -> Option<&dyn Axis> {
            Some(self)
        }
    }

    impl Axis for MockAxis {
        fn set_resolved_range(&self, range: ResolvedRange) {
            self.resolved.set(Some(range));
        }
    }

    /// What a mock plotter contributes when queried for a range.
    enum Contribution {
        /// A fixed data extent.
        Fixed(f64, f64),
        /// The resolved range of another axis, doubled, standing in for a
        /// curve whose extent is a function of an upstream axis.
        DoubledAxis(Rc<MockAxis>),
    }

    struct MockPlotter {
        id: WidgetId,
        axes: Vec<(Aspect, Rc<MockAxis>)>,
        affects: Vec<(Aspect, Aspect)>,
        requires: Vec<(Aspect, Aspect)>,
        contribution: Contribution,
        hidden: bool,
    }

    impl MockPlotter {
        /// An xy-style plotter feeding fixed data into one axis.
        fn feeding(axis: &Rc<MockAxis>, min: f64, max: f64) -> Rc<Self> {
            Rc::new(Self {
                id: WidgetId::new(),
                axes: vec![("x".into(), axis.clone())],
                affects: vec![("sx".into(), "x".into())],
                requires: vec![],
                contribution: Contribution::Fixed(min, max),
                hidden: false,
            })
        }

        fn hidden(axis: &Rc<MockAxis>, min: f64, max: f64) -> Rc<Self> {
            Rc::new(Self {
                id: WidgetId::new(),
                axes: vec![("x".into(), axis.clone())],
                affects: vec![("sx".into(), "x".into())],
                requires: vec![],
                contribution: Contribution::Fixed(min, max),
                hidden: true,
            })
        }

        /// A function-style plotter: needs `from`'s range first, then feeds
        /// twice that range into `into`. Same aspect on both sides so the
        /// requirement orders before the contribution.
        fn doubling(from: &Rc<MockAxis>, into: &Rc<MockAxis>) -> Rc<Self> {
            Rc::new(Self {
                id: WidgetId::new(),
                axes: vec![("y".into(), from.clone()), ("x".into(), into.clone())],
                affects: vec![("f".into(), "x".into())],
                requires: vec![("f".into(), "y".into())],
                contribution: Contribution::DoubledAxis(from.clone()),
                hidden: false,
            })
        }
    }

    impl Widget for MockPlotter {
        fn id(&self) -> WidgetId {
            self.id
        }

        fn as_axis_user(&self) -> Option<&dyn AxisUser> {
            Some(self)
        }
    }

    impl AxisUser for MockPlotter {
        fn axes_names(&self) -> Vec<Aspect> {
            self.axes.iter().map(|(name, _)| name.clone()).collect()
        }

        fn lookup_axis(&self, name: &Aspect) -> Option<WidgetId> {
            self.axes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, axis)| axis.id)
        }

        fn affects_axis_range(&self) -> Vec<(Aspect, Aspect)> {
            self.affects.clone()
        }

        fn requires_axis_range(&self) -> Vec<(Aspect, Aspect)> {
            self.requires.clone()
        }

        fn get_range(
            &self,
            _axis: WidgetId,
            _aspect: &Aspect,
            mut acc: RangeAccumulator,
        ) -> RangeAccumulator {
            match &self.contribution {
                Contribution::Fixed(min, max) => acc.include(*min, *max),
                Contribution::DoubledAxis(axis) => {
                    if let Some((min, max)) =
                        axis.resolved.get().and_then(|range| range.bounds())
                    {
                        acc.include(min * 2.0, max * 2.0);
                    }
                }
            }
            acc
        }

        fn is_hidden(&self) -> bool {
            self.hidden
        }
    }

    #[test]
    fn tree_without_edges_resolves_every_axis_automatic() {
        let ax = MockAxis::new();
        let ay = MockAxis::new();
        let page = Page::new(vec![ax.clone(), ay.clone()]);

        let resolution = resolve_axis_ranges(&page);

        assert_eq!(resolution.range(ax.id), Some(ResolvedRange::Automatic));
        assert_eq!(resolution.range(ay.id), Some(ResolvedRange::Automatic));
        assert_eq!(ax.resolved.get(), Some(ResolvedRange::Automatic));
        assert_eq!(ay.resolved.get(), Some(ResolvedRange::Automatic));
        assert!(resolution.cyclic.is_empty());
        assert!(resolution.errors.is_empty());
    }

    #[test]
    fn two_visible_plotters_union_their_ranges() {
        let axis = MockAxis::new();
        let p1 = MockPlotter::feeding(&axis, 0.0, 10.0);
        let p2 = MockPlotter::feeding(&axis, 5.0, 20.0);
        let page = Page::new(vec![axis.clone(), p1, p2]);

        let resolution = resolve_axis_ranges(&page);

        assert_eq!(
            resolution.range(axis.id),
            Some(ResolvedRange::explicit(0.0, 20.0))
        );
        assert_eq!(axis.resolved.get(), Some(ResolvedRange::explicit(0.0, 20.0)));
    }

    #[test]
    fn hidden_only_plotter_leaves_axis_automatic() {
        let axis = MockAxis::new();
        let hidden = MockPlotter::hidden(&axis, 0.0, 5.0);
        let page = Page::new(vec![axis.clone(), hidden]);

        let resolution = resolve_axis_ranges(&page);
        assert_eq!(resolution.range(axis.id), Some(ResolvedRange::Automatic));
    }

    #[test]
    fn hidden_plotter_does_not_block_visible_ones() {
        let axis = MockAxis::new();
        let hidden = MockPlotter::hidden(&axis, 0.0, 5.0);
        let visible = MockPlotter::feeding(&axis, 1.0, 2.0);
        let page = Page::new(vec![axis.clone(), hidden, visible]);

        let resolution = resolve_axis_ranges(&page);
        assert_eq!(
            resolution.range(axis.id),
            Some(ResolvedRange::explicit(1.0, 2.0))
        );
    }

    #[test]
    fn requiring_plotter_sees_finalized_upstream_axis() {
        let y = MockAxis::new();
        let x = MockAxis::new();
        // The data plotter binds its declared name to the y axis.
        let data = MockPlotter::feeding(&y, 0.0, 4.0);
        let fplot = MockPlotter::doubling(&y, &x);
        let page = Page::new(vec![y.clone(), x.clone(), data, fplot]);

        let resolution = resolve_axis_ranges(&page);

        assert_eq!(resolution.range(y.id), Some(ResolvedRange::explicit(0.0, 4.0)));
        assert_eq!(resolution.range(x.id), Some(ResolvedRange::explicit(0.0, 8.0)));
        assert!(resolution.cyclic.is_empty());
    }

    #[test]
    fn full_cycle_still_resolves_every_axis() {
        let x = MockAxis::new();
        let y = MockAxis::new();
        // P1 affects x and requires y on one aspect; P2 does the reverse.
        let p1 = Rc::new(MockPlotter {
            id: WidgetId::new(),
            axes: vec![("x".into(), x.clone()), ("y".into(), y.clone())],
            affects: vec![("v".into(), "x".into())],
            requires: vec![("v".into(), "y".into())],
            contribution: Contribution::Fixed(0.0, 1.0),
            hidden: false,
        });
        let p2 = Rc::new(MockPlotter {
            id: WidgetId::new(),
            axes: vec![("x".into(), x.clone()), ("y".into(), y.clone())],
            affects: vec![("w".into(), "y".into())],
            requires: vec![("w".into(), "x".into())],
            contribution: Contribution::Fixed(2.0, 3.0),
            hidden: false,
        });
        let page = Page::new(vec![x.clone(), y.clone(), p1, p2]);

        let resolution = resolve_axis_ranges(&page);

        // No hard failure: both axes end with a defined (possibly
        // automatic) range, and the cycle is reported.
        assert!(resolution.range(x.id).is_some());
        assert!(resolution.range(y.id).is_some());
        assert!(x.resolved.get().is_some());
        assert!(y.resolved.get().is_some());
        assert!(!resolution.cyclic.is_empty());

        // The exact numbers are a policy band; what matters is that a
        // repeated pass lands on the same ones.
        let again = resolve_axis_ranges(&page);
        assert_eq!(resolution.ranges, again.ranges);
        assert_eq!(resolution.cyclic, again.cyclic);
    }

    #[test]
    fn repeated_passes_are_idempotent() {
        let axis = MockAxis::new();
        let p1 = MockPlotter::feeding(&axis, 0.0, 10.0);
        let p2 = MockPlotter::feeding(&axis, 5.0, 20.0);
        let page = Page::new(vec![axis.clone(), p1, p2]);

        let first = resolve_axis_ranges(&page);
        let second = resolve_axis_ranges(&page);
        assert_eq!(first.ranges, second.ranges);
    }

    #[test]
    fn attachment_maps_round_trip() {
        let axis = MockAxis::new();
        let plotter = MockPlotter::feeding(&axis, 0.0, 1.0);
        let plotter_id = plotter.id;
        let page = Page::new(vec![axis.clone(), plotter]);

        let resolution = resolve_axis_ranges(&page);
        assert_eq!(
            resolution.axis_plotters.get(&axis.id),
            Some(&vec![plotter_id])
        );
        assert_eq!(
            resolution.plotter_axes().get(&plotter_id),
            Some(&vec![axis.id])
        );
    }
}
