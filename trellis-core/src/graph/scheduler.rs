//! Topological Scheduler
//!
//! The scheduler turns the edge list into an evaluation order in which every
//! producer precedes its consumers.
//!
//! # Algorithm
//!
//! Kahn's algorithm over the vertex set induced by the edges:
//!
//! 1. Compute the in-degree of every vertex.
//! 2. Repeatedly emit a zero-in-degree vertex and decrement the in-degree of
//!    its successors.
//! 3. Vertices still holding nonzero in-degree when no zero-in-degree vertex
//!    remains are part of (or downstream of) a cycle.
//!
//! # Cycle tolerance
//!
//! Cycles are not an error. User-constructed plots can legitimately contain
//! circular axis references (two plotters each auto-ranging off the other),
//! and a page must still draw. Cyclic vertices are reported in
//! [`Schedule::cyclic`] and appended to the sequence in discovery order so
//! downstream processing proceeds best-effort.
//!
//! # Determinism
//!
//! Repeated passes over an unchanged tree must produce identical ranges, so
//! ties among simultaneously-ready vertices break by edge insertion order:
//! vertices are discovered into an `IndexMap` in the order the builder
//! emitted edges, and the ready queue is FIFO.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::debug;

use super::node::{DepNode, Edge};

/// The evaluation order for one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    /// Every vertex induced by the edge list, exactly once, producers before
    /// consumers wherever the graph allows it.
    pub sequence: Vec<DepNode>,
    /// Vertices whose ordering could not be honoured because they sit on or
    /// behind a cycle. Still present in `sequence`.
    pub cyclic: IndexSet<DepNode>,
}

impl Schedule {
    /// Order the vertices induced by `edges`.
    pub fn compute(edges: &[Edge]) -> Self {
        // Discovery order doubles as the tie-break order, so both endpoints
        // of every edge are registered up front, producer first.
        let mut in_degree: IndexMap<DepNode, usize> = IndexMap::new();
        let mut successors: IndexMap<DepNode, SmallVec<[DepNode; 2]>> = IndexMap::new();

        for edge in edges {
            in_degree.entry(edge.producer.clone()).or_insert(0);
            *in_degree.entry(edge.consumer.clone()).or_insert(0) += 1;
            successors
                .entry(edge.producer.clone())
                .or_default()
                .push(edge.consumer.clone());
        }

        let mut queue: VecDeque<DepNode> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(node, _)| node.clone())
            .collect();

        let mut sequence = Vec::with_capacity(in_degree.len());

        while let Some(node) = queue.pop_front() {
            if let Some(succs) = successors.get(&node) {
                for succ in succs.clone() {
                    let deg = in_degree
                        .get_mut(&succ)
                        .expect("successor registered during discovery");
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(succ);
                    }
                }
            }
            sequence.push(node);
        }

        // Whatever never reached zero in-degree is cyclic, or strictly
        // behind a cycle. Emit it anyway, in discovery order, so every
        // vertex gets a best-effort resolution.
        let mut cyclic = IndexSet::new();
        for (node, deg) in &in_degree {
            if *deg > 0 {
                cyclic.insert(node.clone());
                sequence.push(node.clone());
            }
        }

        if !cyclic.is_empty() {
            debug!(
                count = cyclic.len(),
                "dependency graph contains cycles; resolving best-effort"
            );
        }

        Schedule { sequence, cyclic }
    }
}
