// DCNet: Data-Center Topology Modeling and Routing
// Copyright (C) 2024  Computer Networks Group @ UPB
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # K-Shortest-Path Engine
//!
//! Yen's algorithm for enumerating loopless paths in cost order, plus the equal-cost-only
//! variant used to model multi-path load spreading.

use super::bidirectional::bidirectional_dijkstra;
use super::types::{Path, PathSet};
use crate::topology::{Link, LinkWeight, NodeId, Topology, TopologyError};

use petgraph::algo::FloatMeasure;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Upper bound on `k`. Requests beyond this are clamped; enumerating more candidate paths
/// than this on a pathological input would dominate the runtime without any practical use.
pub(crate) const MAX_REQUESTED_PATHS: usize = 1_024;

/// Tolerance when comparing path costs for equality. Exact for hop counts, forgiving of
/// summation order for weighted costs.
const COST_TOLERANCE: LinkWeight = 1e-6;

/// Candidate entry of the [`PathBuffer`], keyed by `(cost, seq)` with the ordering reversed
/// for the max-heap, exactly like the dijkstra queue entries.
#[derive(Debug, Clone)]
struct BufferEntry {
    cost: LinkWeight,
    seq: usize,
    path: Vec<NodeId>,
}

impl PartialEq for BufferEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BufferEntry {}

impl PartialOrd for BufferEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BufferEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Candidate buffer of not-yet-confirmed spur paths: a heap ordered by `(cost, insertion
/// counter)` with a node-sequence set suppressing duplicate candidates.
#[derive(Debug, Default)]
struct PathBuffer {
    sequences: HashSet<Vec<NodeId>>,
    heap: BinaryHeap<BufferEntry>,
    counter: usize,
}

impl PathBuffer {
    fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate unless the same node sequence is already buffered.
    fn push(&mut self, cost: LinkWeight, path: Vec<NodeId>) {
        if self.sequences.insert(path.clone()) {
            self.counter += 1;
            self.heap.push(BufferEntry { cost, seq: self.counter, path });
        }
    }

    /// Remove and return the cheapest candidate.
    fn pop(&mut self) -> Option<(LinkWeight, Vec<NodeId>)> {
        self.heap.pop().map(|entry| {
            self.sequences.remove(&entry.path);
            (entry.cost, entry.path)
        })
    }
}

/// # Simple-Path Iterator
///
/// Produces the loopless paths between two nodes in non-decreasing cost order (Yen's
/// algorithm). The first produced path is the shortest path; each following call deviates
/// from the most recently produced path: for every deviation point along it, the edges that
/// previously accepted paths take out of the shared root prefix and the interior root nodes
/// are masked, a restricted [`bidirectional_dijkstra`] finds the spur, and the spliced
/// candidate enters the [`PathBuffer`]. A failed spur search simply contributes no candidate.
///
/// The topology is never mutated; masking happens through ignore sets, so concurrent readers
/// of the same snapshot are safe.
#[derive(Debug)]
pub struct SimplePaths<'a, F> {
    topo: &'a Topology,
    source: NodeId,
    target: NodeId,
    weight: F,
    accepted: Vec<Vec<NodeId>>,
    candidates: PathBuffer,
    prev: Option<Vec<NodeId>>,
    shortest_cost: Option<LinkWeight>,
    equal_cost_only: bool,
    done: bool,
}

impl<'a, F> SimplePaths<'a, F>
where
    F: Fn(&Link) -> LinkWeight,
{
    /// Create the iterator. Both nodes must exist in the topology; a pair in different
    /// components yields an empty iteration.
    pub fn new(topo: &'a Topology, source: NodeId, target: NodeId, weight: F) -> Self {
        Self {
            topo,
            source,
            target,
            weight,
            accepted: Vec::new(),
            candidates: PathBuffer::new(),
            prev: None,
            shortest_cost: None,
            equal_cost_only: false,
            done: false,
        }
    }

    /// Restrict the iteration to paths costing exactly as much as the shortest path (the
    /// ECMP set).
    pub fn equal_cost_only(mut self) -> Self {
        self.equal_cost_only = true;
        self
    }

    /// Total cost of a node sequence under the weight function. Missing links count as
    /// infinite, which keeps a stale sequence from ever becoming the cheapest candidate.
    fn sequence_cost(&self, nodes: &[NodeId]) -> LinkWeight {
        nodes
            .windows(2)
            .map(|hop| {
                self.topo
                    .link_between(hop[0], hop[1])
                    .map(|link| (self.weight)(link))
                    .unwrap_or_else(LinkWeight::infinite)
            })
            .sum()
    }

    /// A candidate is admitted unless the iteration is restricted to equal-cost paths and
    /// the candidate costs more than the shortest path.
    fn admit(&self, cost: LinkWeight) -> bool {
        match (self.equal_cost_only, self.shortest_cost) {
            (true, Some(best)) => (cost - best).abs() <= COST_TOLERANCE,
            _ => true,
        }
    }
}

impl<'a, F> Iterator for SimplePaths<'a, F>
where
    F: Fn(&Link) -> LinkWeight,
{
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        if self.done {
            return None;
        }

        match self.prev.take() {
            None => {
                // first call: seed the buffer with the unrestricted shortest path
                let no_nodes = HashSet::new();
                let no_edges = HashSet::new();
                if let Ok((cost, path)) = bidirectional_dijkstra(
                    self.topo,
                    self.source,
                    self.target,
                    &no_nodes,
                    &no_edges,
                    &self.weight,
                ) {
                    self.candidates.push(cost, path);
                }
            }
            Some(prev) => {
                let mut ignore_nodes: HashSet<NodeId> = HashSet::new();
                let mut ignore_edges: HashSet<(NodeId, NodeId)> = HashSet::new();
                for i in 1..prev.len() {
                    let root = &prev[..i];
                    let spur_node = root[i - 1];
                    let root_cost = self.sequence_cost(root);
                    // mask the edge every accepted path with this root takes next
                    for path in &self.accepted {
                        if path.len() > i && path[..i] == *root {
                            ignore_edges.insert((path[i - 1], path[i]));
                        }
                    }
                    if let Ok((spur_cost, spur)) = bidirectional_dijkstra(
                        self.topo,
                        spur_node,
                        self.target,
                        &ignore_nodes,
                        &ignore_edges,
                        &self.weight,
                    ) {
                        let total = root_cost + spur_cost;
                        if self.admit(total) {
                            let mut candidate = root[..i - 1].to_vec();
                            candidate.extend(spur);
                            self.candidates.push(total, candidate);
                        }
                    }
                    ignore_nodes.insert(spur_node);
                }
            }
        }

        match self.candidates.pop() {
            Some((cost, nodes)) => {
                if self.shortest_cost.is_none() {
                    self.shortest_cost = Some(cost);
                }
                self.accepted.push(nodes.clone());
                self.prev = Some(nodes.clone());
                Some(Path { nodes, cost })
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Compute up to `k` loopless shortest paths between the pair, cheapest first. Fewer than `k`
/// paths exist for many pairs; the result then holds all of them, which is not an error. A
/// disconnected pair yields an empty set, and `source == target` yields the single trivial
/// path of cost 0. Fails only if one of the nodes is not part of the topology.
pub fn k_shortest_paths<F>(
    topo: &Topology,
    source: NodeId,
    target: NodeId,
    k: usize,
    weight: F,
) -> Result<PathSet, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    collect_paths(topo, source, target, k, weight, false)
}

/// Compute up to `k` paths whose cost equals the shortest path's cost (the ECMP set). Same
/// contract as [`k_shortest_paths`] otherwise; requesting more paths than there are
/// equal-cost alternatives returns exactly the smaller count.
pub fn ecmp_paths<F>(
    topo: &Topology,
    source: NodeId,
    target: NodeId,
    k: usize,
    weight: F,
) -> Result<PathSet, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    collect_paths(topo, source, target, k, weight, true)
}

fn collect_paths<F>(
    topo: &Topology,
    source: NodeId,
    target: NodeId,
    k: usize,
    weight: F,
    equal_cost_only: bool,
) -> Result<PathSet, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    if !topo.contains(source) {
        return Err(TopologyError::NodeNotFound(source));
    }
    if !topo.contains(target) {
        return Err(TopologyError::NodeNotFound(target));
    }

    let mut result = PathSet::new();
    if k == 0 {
        return Ok(result);
    }
    if source == target {
        result.push(Path { nodes: vec![source], cost: LinkWeight::zero() });
        return Ok(result);
    }

    let k = k.min(MAX_REQUESTED_PATHS);
    let mut paths = SimplePaths::new(topo, source, target, weight);
    if equal_cost_only {
        paths = paths.equal_cost_only();
    }
    for path in paths.take(k) {
        result.push(path);
    }
    Ok(result)
}
