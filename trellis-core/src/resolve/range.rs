//! Range Accumulation
//!
//! Each axis owns one [`RangeAccumulator`] for the duration of a pass. It
//! starts at the empty sentinel `[+inf, -inf]` (no data has touched it) and
//! only ever widens as plotters contribute, never narrows. When the axis is
//! finalized the accumulator resolves to either an explicit `(min, max)`
//! pair or [`ResolvedRange::Automatic`] if nothing contributed.

use serde::{Deserialize, Serialize};

/// Working range for one axis while a pass is in flight.
///
/// `Copy` on purpose: the propagator threads accumulators through plotter
/// callbacks by value and unions the result back, so no callback ever holds
/// a mutable alias to resolver state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeAccumulator {
    min: f64,
    max: f64,
}

impl RangeAccumulator {
    /// The empty sentinel: no data seen yet.
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Create an accumulator already spanning `[min, max]`.
    pub fn from_bounds(min: f64, max: f64) -> Self {
        let mut acc = Self::EMPTY;
        acc.include(min, max);
        acc
    }

    /// Widen to cover `[min, max]`. NaN bounds are ignored.
    pub fn include(&mut self, min: f64, max: f64) {
        self.min = self.min.min(min);
        self.max = self.max.max(max);
    }

    /// Widen to cover a single value.
    pub fn include_value(&mut self, value: f64) {
        self.include(value, value);
    }

    /// The union of two accumulators, at least as wide as either.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True while no data has widened the accumulator.
    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Lower bound; `+inf` while empty.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound; `-inf` while empty.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the accumulated range, or 0.0 while empty.
    pub fn span(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Close the accumulator into a resolved range.
    pub fn resolve(self) -> ResolvedRange {
        if self.is_empty() {
            ResolvedRange::Automatic
        } else {
            ResolvedRange::Explicit {
                min: self.min,
                max: self.max,
            }
        }
    }
}

impl Default for RangeAccumulator {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// The final outcome for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResolvedRange {
    /// No explicit bound was derived; downstream layout picks defaults.
    Automatic,
    /// The accumulated data range.
    Explicit {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl ResolvedRange {
    /// Shorthand for an explicit range.
    pub fn explicit(min: f64, max: f64) -> Self {
        Self::Explicit { min, max }
    }

    /// Whether this range fell back to automatic.
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::Automatic)
    }

    /// The explicit bounds, if any.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Automatic => None,
            Self::Explicit { min, max } => Some((min, max)),
        }
    }
}
