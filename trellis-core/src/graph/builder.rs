//! Dependency Graph Builder
//!
//! One recursive pre-order walk over the widget tree discovers every axis
//! and every axis user, and records two kinds of relationship declared by
//! the users:
//!
//! - *affects*: a widget aspect supplies range data to an axis. Edge
//!   `widget-aspect -> axis`: the plotter must be queried before the axis
//!   can close its range.
//! - *requires*: a widget aspect needs an axis's finalized range first
//!   (e.g. a curve `x = f(y)` cannot know its x extent until the y axis is
//!   settled). Edge `axis -> widget-aspect`.
//!
//! The walk never mutates the tree. Edges are emitted in traversal order,
//! which downstream becomes the deterministic tie-break order for
//! scheduling.
//!
//! Axis names that fail to resolve are recorded as
//! [`ResolveError::UnresolvedAxis`] and abort only the offending widget's
//! contribution; the rest of the tree still resolves.

use std::collections::HashMap;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{trace, warn};

use super::node::{Aspect, DepNode, Edge};
use crate::error::ResolveError;
use crate::widget::{Axis, AxisUser, Widget, WidgetId};

/// The dependency graph for one resolution pass.
///
/// Borrows the widget tree; everything here is rebuilt from scratch on every
/// pass and discarded once ranges are written back.
pub struct DependencyGraph<'a> {
    /// All dependency edges, in discovery order.
    pub edges: Vec<Edge>,
    /// Consumer vertex to the producers it depends on.
    pub(crate) deps: IndexMap<DepNode, SmallVec<[DepNode; 2]>>,
    /// Every axis widget in the tree, in traversal order, whether or not it
    /// participates in any edge.
    pub axes: Vec<WidgetId>,
    /// Axis to the plotters attached to it, kept for layout bookkeeping.
    pub axis_plotters: IndexMap<WidgetId, Vec<WidgetId>>,
    /// Capability handles for the axis users discovered during the walk.
    pub(crate) users: HashMap<WidgetId, &'a dyn AxisUser>,
    /// Capability handles for the axes discovered during the walk.
    pub(crate) axis_widgets: HashMap<WidgetId, &'a dyn Axis>,
    /// Unresolved axis references, one per offending (widget, name).
    pub errors: Vec<ResolveError>,
}

impl<'a> DependencyGraph<'a> {
    /// Walk the tree below `root` and build the graph.
    pub fn build(root: &'a dyn Widget) -> Self {
        let mut builder = GraphBuilder::default();
        builder.visit(root);
        builder.finish()
    }

    /// The producers a vertex depends on, empty when it has none.
    pub(crate) fn producers_of(&self, node: &DepNode) -> &[DepNode] {
        self.deps.get(node).map(|p| p.as_slice()).unwrap_or(&[])
    }
}

/// Accumulates graph state during the tree walk.
#[derive(Default)]
struct GraphBuilder<'a> {
    edges: Vec<Edge>,
    axes: Vec<WidgetId>,
    axis_plotters: IndexMap<WidgetId, Vec<WidgetId>>,
    users: HashMap<WidgetId, &'a dyn AxisUser>,
    axis_widgets: HashMap<WidgetId, &'a dyn Axis>,
    /// Axis ids handed out by `lookup_axis`, with the widgets that named
    /// them. Checked against the discovered axes once the walk completes.
    referenced: IndexMap<WidgetId, Vec<(WidgetId, Aspect)>>,
    errors: Vec<ResolveError>,
}

impl<'a> GraphBuilder<'a> {
    fn visit(&mut self, widget: &'a dyn Widget) {
        if let Some(user) = widget.as_axis_user() {
            self.visit_user(widget.id(), user);
        }

        if let Some(axis) = widget.as_axis() {
            self.axes.push(widget.id());
            self.axis_widgets.insert(widget.id(), axis);
        }

        for child in widget.children() {
            self.visit(child);
        }
    }

    fn visit_user(&mut self, id: WidgetId, user: &'a dyn AxisUser) {
        // Resolve the declared axis names once; contributions and
        // requirements below refer back to these bindings.
        let mut named: IndexMap<Aspect, WidgetId> = IndexMap::new();
        for name in user.axes_names() {
            match user.lookup_axis(&name) {
                Some(axis_id) => {
                    self.referenced
                        .entry(axis_id)
                        .or_default()
                        .push((id, name.clone()));
                    let attached = self.axis_plotters.entry(axis_id).or_default();
                    if !attached.contains(&id) {
                        attached.push(id);
                    }
                    named.insert(name, axis_id);
                }
                None => self.unresolved(id, name),
            }
        }

        for (aspect, axis_name) in user.affects_axis_range() {
            match named.get(&axis_name) {
                Some(&axis_id) => {
                    self.push_edge(DepNode::aspect(id, aspect), DepNode::axis(axis_id));
                }
                None => self.unresolved(id, axis_name),
            }
        }

        for (aspect, axis_name) in user.requires_axis_range() {
            match named.get(&axis_name) {
                Some(&axis_id) => {
                    self.push_edge(DepNode::axis(axis_id), DepNode::aspect(id, aspect));
                }
                None => self.unresolved(id, axis_name),
            }
        }

        self.users.insert(id, user);
    }

    fn push_edge(&mut self, producer: DepNode, consumer: DepNode) {
        trace!(%producer, %consumer, "dependency edge");
        self.edges.push(Edge::new(producer, consumer));
    }

    fn unresolved(&mut self, widget: WidgetId, axis: Aspect) {
        warn!(%widget, %axis, "unresolved axis reference");
        let err = ResolveError::UnresolvedAxis { widget, axis };
        if !self.errors.contains(&err) {
            self.errors.push(err);
        }
    }

    fn finish(mut self) -> DependencyGraph<'a> {
        // `lookup_axis` may hand back a widget that never turned out to be
        // an axis in the tree. Those references are as unresolved as a
        // failed lookup; drop the edges and attachments they produced.
        let dangling: Vec<WidgetId> = self
            .referenced
            .keys()
            .filter(|id| !self.axis_widgets.contains_key(id))
            .copied()
            .collect();

        for axis_id in &dangling {
            for (widget, name) in self.referenced.shift_remove(axis_id).unwrap_or_default() {
                self.unresolved(widget, name);
            }
            self.axis_plotters.shift_remove(axis_id);
        }
        if !dangling.is_empty() {
            self.edges.retain(|edge| {
                let dangles = |node: &DepNode| node.is_axis() && dangling.contains(&node.widget);
                !dangles(&edge.producer) && !dangles(&edge.consumer)
            });
        }

        let mut deps: IndexMap<DepNode, SmallVec<[DepNode; 2]>> = IndexMap::new();
        for edge in &self.edges {
            deps.entry(edge.consumer.clone())
                .or_default()
                .push(edge.producer.clone());
        }

        DependencyGraph {
            edges: self.edges,
            deps,
            axes: self.axes,
            axis_plotters: self.axis_plotters,
            users: self.users,
            axis_widgets: self.axis_widgets,
            errors: self.errors,
        }
    }
}
