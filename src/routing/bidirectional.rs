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

//! Restricted bidirectional Dijkstra, used by the k-shortest-path engine to compute spur
//! paths with parts of the topology masked out.

use super::dijkstra::HeapEntry;
use super::types::NoPathError;
use crate::topology::{Link, LinkWeight, NodeId, Topology};

use petgraph::algo::FloatMeasure;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Compute the shortest path between `source` and `target` while treating the nodes in
/// `ignore_nodes` and the (undirected) node pairs in `ignore_edges` as absent. The search
/// runs simultaneously from both ends and stops when the frontiers meet, which on the typical
/// restricted query explores far fewer nodes than a full single-source run.
///
/// Returns the total cost and the node sequence. Fails with [`NoPathError`] if either
/// terminal is excluded, missing, or no path survives the restrictions; the k-shortest-path
/// loop treats that as "no further candidate here".
pub fn bidirectional_dijkstra<F>(
    topo: &Topology,
    source: NodeId,
    target: NodeId,
    ignore_nodes: &HashSet<NodeId>,
    ignore_edges: &HashSet<(NodeId, NodeId)>,
    weight: F,
) -> Result<(LinkWeight, Vec<NodeId>), NoPathError>
where
    F: Fn(&Link) -> LinkWeight,
{
    if !topo.contains(source) || !topo.contains(target) {
        return Err(NoPathError(source, target));
    }
    if ignore_nodes.contains(&source) || ignore_nodes.contains(&target) {
        return Err(NoPathError(source, target));
    }
    if source == target {
        return Ok((LinkWeight::zero(), vec![source]));
    }

    let ignored = |a: NodeId, b: NodeId| {
        ignore_edges.contains(&(a, b)) || ignore_edges.contains(&(b, a))
    };

    // index 0 searches forward from the source, index 1 backward from the target
    let mut dists: [HashMap<NodeId, LinkWeight>; 2] = [HashMap::new(), HashMap::new()];
    let mut seen: [HashMap<NodeId, LinkWeight>; 2] = [HashMap::new(), HashMap::new()];
    let mut paths: [HashMap<NodeId, Vec<NodeId>>; 2] = [HashMap::new(), HashMap::new()];
    let mut fringe: [BinaryHeap<HeapEntry>; 2] = [BinaryHeap::new(), BinaryHeap::new()];
    let mut seq = 0;

    seen[0].insert(source, LinkWeight::zero());
    seen[1].insert(target, LinkWeight::zero());
    paths[0].insert(source, vec![source]);
    paths[1].insert(target, vec![target]);
    fringe[0].push(HeapEntry { cost: LinkWeight::zero(), seq: 0, node: source });
    fringe[1].push(HeapEntry { cost: LinkWeight::zero(), seq: 1, node: target });
    seq += 2;

    let mut best: Option<(LinkWeight, Vec<NodeId>)> = None;
    let mut dir = 1;

    while !fringe[0].is_empty() && !fringe[1].is_empty() {
        dir = 1 - dir;
        let HeapEntry { cost, node, .. } = match fringe[dir].pop() {
            Some(entry) => entry,
            None => break,
        };
        if dists[dir].contains_key(&node) {
            continue;
        }
        dists[dir].insert(node, cost);
        if dists[1 - dir].contains_key(&node) {
            // the frontiers met; the best recorded meeting point is the answer
            return best.ok_or(NoPathError(source, target));
        }

        for (neighbor, link) in topo.links_of(node) {
            if ignore_nodes.contains(&neighbor) || ignored(node, neighbor) {
                continue;
            }
            if dists[dir].contains_key(&neighbor) {
                continue;
            }
            let next = cost + weight(link);
            if seen[dir].get(&neighbor).map_or(true, |&d| next < d) {
                seen[dir].insert(neighbor, next);
                seq += 1;
                fringe[dir].push(HeapEntry { cost: next, seq, node: neighbor });
                let mut path = paths[dir][&node].clone();
                path.push(neighbor);
                paths[dir].insert(neighbor, path);

                if let (Some(&d0), Some(&d1)) = (seen[0].get(&neighbor), seen[1].get(&neighbor))
                {
                    let total = d0 + d1;
                    if best.as_ref().map_or(true, |(b, _)| total < *b) {
                        let mut joined = paths[0][&neighbor].clone();
                        joined.extend(paths[1][&neighbor].iter().rev().skip(1));
                        best = Some((total, joined));
                    }
                }
            }
        }
    }

    Err(NoPathError(source, target))
}
