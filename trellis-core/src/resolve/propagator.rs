//! Range Propagation
//!
//! The propagator walks the scheduled vertex sequence and turns the
//! dependency structure into concrete per-axis ranges.
//!
//! # Algorithm
//!
//! 1. Every axis opens a [`RangeAccumulator`] at the empty sentinel.
//! 2. Each consumer vertex is visited in evaluation order, pulling from its
//!    producers:
//!    - a producer that is a plotter aspect contributes data to the
//!      consumer axis's accumulator (unless the plotter is hidden or the
//!      axis is already closed);
//!    - a producer that is an axis is closed on first use: the consumer
//!      needs its range now, and every contribution to it was scheduled
//!      earlier, so the accumulator is final.
//! 3. Axes nobody required (including axes with no edges at all) close
//!    after the walk.
//!
//! An accumulator that was never widened resolves to
//! [`ResolvedRange::Automatic`]. A closed axis is never reopened, even when
//! a forced cyclic ordering routes further edges at it; first finalization
//! wins, and because the schedule is deterministic so is the winner.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::range::{RangeAccumulator, ResolvedRange};
use crate::graph::{DependencyGraph, Schedule};
use crate::widget::WidgetId;

/// Run the two-phase propagation and write ranges back onto the axes.
pub(crate) fn propagate(
    graph: &DependencyGraph<'_>,
    schedule: &Schedule,
) -> IndexMap<WidgetId, ResolvedRange> {
    let mut pending: IndexMap<WidgetId, RangeAccumulator> = graph
        .axes
        .iter()
        .map(|&axis| (axis, RangeAccumulator::EMPTY))
        .collect();
    let mut resolved = IndexMap::with_capacity(graph.axes.len());

    for node in &schedule.sequence {
        for producer in graph.producers_of(node) {
            match &producer.aspect {
                Some(aspect) => {
                    // `node` is an axis collecting a contribution.
                    let Some(user) = graph.users.get(&producer.widget) else {
                        continue;
                    };
                    if user.is_hidden() {
                        continue;
                    }
                    if let Some(acc) = pending.get(&node.widget).copied() {
                        // Union with the previous state so a contribution
                        // can only ever widen the range.
                        let next = acc.union(user.get_range(node.widget, aspect, acc));
                        trace!(
                            axis = %node.widget,
                            plotter = %producer,
                            min = next.min(),
                            max = next.max(),
                            "range contribution"
                        );
                        pending.insert(node.widget, next);
                    }
                }
                None => {
                    // `node` requires the producer axis; close it now.
                    if let Some(acc) = pending.shift_remove(&producer.widget) {
                        finalize(graph, producer.widget, acc, &mut resolved);
                    }
                }
            }
        }
    }

    for (axis, acc) in pending {
        finalize(graph, axis, acc, &mut resolved);
    }

    resolved
}

fn finalize(
    graph: &DependencyGraph<'_>,
    axis: WidgetId,
    acc: RangeAccumulator,
    resolved: &mut IndexMap<WidgetId, ResolvedRange>,
) {
    let range = acc.resolve();
    debug!(%axis, ?range, "axis range finalized");
    if let Some(widget) = graph.axis_widgets.get(&axis) {
        widget.set_resolved_range(range);
    }
    resolved.insert(axis, range);
}
