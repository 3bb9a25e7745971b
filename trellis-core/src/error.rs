//! Resolver Errors
//!
//! Almost nothing that can go wrong during a resolution pass is an error:
//! cyclic graphs degrade to best-effort ranges and axes without data fall
//! back to automatic ranges. The one condition that must reach the caller is
//! an unresolved axis reference: a widget naming an axis that does not exist
//! in the tree. That is a configuration problem the resolver cannot repair.
//!
//! Unresolved references are reported per offending widget and only abort
//! that widget's contribution; the rest of the tree still resolves.

use thiserror::Error;

use crate::graph::Aspect;
use crate::widget::WidgetId;

/// An error attributable to a single widget during a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A widget declared a dependency on an axis name that could not be
    /// resolved to an axis widget in the tree.
    #[error("widget {widget} references unknown axis \"{axis}\"")]
    UnresolvedAxis {
        /// The widget holding the dangling reference.
        widget: WidgetId,
        /// The axis name that failed to resolve.
        axis: Aspect,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_axis_message_names_widget_and_axis() {
        let err = ResolveError::UnresolvedAxis {
            widget: WidgetId::from(7),
            axis: Aspect::from("x"),
        };
        assert_eq!(err.to_string(), "widget #7 references unknown axis \"x\"");
    }
}
