//! Graph Nodes
//!
//! The unit of dependency tracking is not a widget but a widget *facet*: an
//! xy plotter has independent dependencies for its x data and its y data, so
//! each gets its own vertex in the graph. [`DepNode`] is that vertex, and
//! [`Aspect`] is the symbolic label naming the facet.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::widget::WidgetId;

/// Symbolic label for one facet of a widget's participation in the graph.
///
/// The same type names axes (`"x"`, `"y"`) and plotter dependencies (`"sx"`,
/// `"sy"`); both are just names declared by widgets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Aspect(Cow<'static, str>);

impl Aspect {
    /// Create an aspect from any string-like value.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The aspect name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Aspect {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Aspect {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A vertex in the dependency graph: a widget paired with the aspect of it
/// that participates in the dependency.
///
/// Axis widgets enter the graph as a whole (`aspect == None`); axis users
/// enter once per declared aspect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepNode {
    /// The widget this vertex belongs to.
    pub widget: WidgetId,
    /// The facet of the widget, or `None` for an axis vertex.
    pub aspect: Option<Aspect>,
}

impl DepNode {
    /// Vertex for an axis widget.
    pub fn axis(widget: WidgetId) -> Self {
        Self {
            widget,
            aspect: None,
        }
    }

    /// Vertex for one aspect of an axis-user widget.
    pub fn aspect(widget: WidgetId, aspect: impl Into<Aspect>) -> Self {
        Self {
            widget,
            aspect: Some(aspect.into()),
        }
    }

    /// Whether this vertex stands for an axis widget.
    pub fn is_axis(&self) -> bool {
        self.aspect.is_none()
    }
}

impl fmt::Display for DepNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.aspect {
            Some(aspect) => write!(f, "{}/{}", self.widget, aspect),
            None => write!(f, "{}", self.widget),
        }
    }
}

/// A directed dependency: `consumer` requires `producer` to be resolved
/// first.
///
/// Edge direction is the single source of truth for evaluation order; the
/// scheduler emits producers before their consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// The vertex that must resolve first.
    pub producer: DepNode,
    /// The vertex that depends on it.
    pub consumer: DepNode,
}

impl Edge {
    /// Create an edge from producer to consumer.
    pub fn new(producer: DepNode, consumer: DepNode) -> Self {
        Self { producer, consumer }
    }
}
