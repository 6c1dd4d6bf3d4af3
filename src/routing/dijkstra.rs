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

//! # Shortest-Path Engine
//!
//! Single-source Dijkstra over non-negative link weights, with a deterministic priority queue.

use super::types::Path;
use crate::topology::{Link, LinkWeight, NodeId, Topology, TopologyError};

use petgraph::algo::FloatMeasure;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Priority-queue entry keyed by `(cost, seq)`. `BinaryHeap` is a max-heap; the ordering is
/// reversed so the cheapest entry pops first. The sequence number is a monotonically
/// increasing counter making pops among equal-cost entries deterministic (insertion order)
/// instead of implementation-defined.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HeapEntry {
    pub(crate) cost: LinkWeight,
    pub(crate) seq: usize,
    pub(crate) node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// # Distance Table
///
/// Shortest distances from a fixed source to every reachable node, plus the predecessor of
/// each node on its shortest path. Built fresh by every [`dijkstra`] invocation; a table must
/// not outlive a mutation of the topology it was computed on.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    source: NodeId,
    dist: HashMap<NodeId, LinkWeight>,
    pred: HashMap<NodeId, NodeId>,
}

impl DistanceTable {
    /// The source node the table was computed from.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The shortest distance to the node, or [`LinkWeight::infinite`] if unreachable.
    pub fn distance(&self, node: NodeId) -> LinkWeight {
        self.dist.get(&node).copied().unwrap_or_else(LinkWeight::infinite)
    }

    /// Returns true if the node is reachable from the source.
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.dist.contains_key(&node)
    }

    /// The predecessor of the node on its shortest path. `None` for the source itself and for
    /// unreachable nodes.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.pred.get(&node).copied()
    }

    /// Reconstruct the shortest path to the target by walking the predecessor chain. `None`
    /// if the target is unreachable.
    pub fn path_to(&self, target: NodeId) -> Option<Path> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut nodes = vec![target];
        let mut current = target;
        while let Some(pred) = self.predecessor(current) {
            nodes.push(pred);
            current = pred;
        }
        nodes.reverse();
        Some(Path { nodes, cost: self.distance(target) })
    }
}

/// Compute the shortest distance from `source` to every node of the topology, in
/// O((V+E) log V). The weight function maps each link to its non-negative cost; use
/// [`WeightModel::cost`](super::WeightModel::cost) for the two standard models. Fails if the
/// source is not part of the topology.
pub fn dijkstra<F>(
    topo: &Topology,
    source: NodeId,
    weight: F,
) -> Result<DistanceTable, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    if !topo.contains(source) {
        return Err(TopologyError::NodeNotFound(source));
    }

    let mut dist: HashMap<NodeId, LinkWeight> = HashMap::new();
    let mut pred: HashMap<NodeId, NodeId> = HashMap::new();
    let mut seen: HashMap<NodeId, LinkWeight> = HashMap::new();
    let mut fringe: BinaryHeap<HeapEntry> = BinaryHeap::new();
    let mut seq = 0;

    seen.insert(source, LinkWeight::zero());
    fringe.push(HeapEntry { cost: LinkWeight::zero(), seq, node: source });

    while let Some(HeapEntry { cost, node, .. }) = fringe.pop() {
        if dist.contains_key(&node) {
            continue; // already finalized with a smaller cost
        }
        dist.insert(node, cost);
        for (neighbor, link) in topo.links_of(node) {
            if dist.contains_key(&neighbor) {
                continue;
            }
            let next = cost + weight(link);
            if seen.get(&neighbor).map_or(true, |&best| next < best) {
                seen.insert(neighbor, next);
                pred.insert(neighbor, node);
                seq += 1;
                fringe.push(HeapEntry { cost: next, seq, node: neighbor });
            }
        }
    }

    Ok(DistanceTable { source, dist, pred })
}

/// Compute the shortest path between a single pair. `Ok(None)` if the target is unreachable.
/// Fails if either node is not part of the topology.
pub fn shortest_path<F>(
    topo: &Topology,
    source: NodeId,
    target: NodeId,
    weight: F,
) -> Result<Option<Path>, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    if !topo.contains(target) {
        return Err(TopologyError::NodeNotFound(target));
    }
    Ok(dijkstra(topo, source, weight)?.path_to(target))
}

/// Compute the distance table of every node in the topology.
pub fn all_pairs<F>(
    topo: &Topology,
    weight: F,
) -> Result<HashMap<NodeId, DistanceTable>, TopologyError>
where
    F: Fn(&Link) -> LinkWeight,
{
    topo.nodes().map(|n| Ok((n, dijkstra(topo, n, &weight)?))).collect()
}
