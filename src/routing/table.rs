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

//! # Routing Table Builder
//!
//! Per-pair path-set cache with lazy invalidation, and derivation of the flow-rule records
//! handed to the southbound collaborator.

use super::ksp::k_shortest_paths;
use super::types::{Path, PathSet, WeightModel};
use crate::topology::{NodeId, PortNo, Topology, TopologyError, TopologyEvent};

use log::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Priority assigned to derived flow rules.
const FLOW_PRIORITY: u16 = 100;
/// Idle timeout of derived flow rules, in seconds.
const FLOW_IDLE_TIMEOUT: u16 = 30;
/// Hard timeout of derived flow rules, in seconds.
const FLOW_HARD_TIMEOUT: u16 = 50;

/// Match criteria of a flow rule: the ingress port (absent on the rule for a path's first
/// switch, where traffic may enter on any port) and the destination endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowMatch {
    /// Ingress port the rule matches on, if any
    pub in_port: Option<PortNo>,
    /// Destination endpoint the rule matches on
    pub dst: NodeId,
}

/// One forwarding decision for one switch. Installing this as an actual forwarding rule is
/// the southbound collaborator's responsibility; the core only supplies the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRule {
    /// The switch this rule belongs to
    pub switch: NodeId,
    /// Match criteria
    pub criteria: FlowMatch,
    /// Egress port towards the next hop
    pub output_port: PortNo,
    /// Rule priority
    pub priority: u16,
    /// Remove the rule after this many seconds without a match
    pub idle_timeout: Option<u16>,
    /// Remove the rule after this many seconds unconditionally
    pub hard_timeout: Option<u16>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    paths: PathSet,
    stale: bool,
}

/// # Routing Table
///
/// Caches the k-shortest-path set of every queried (source, destination, weight model)
/// triple. A lookup computes the set on first access and afterwards serves it from the cache
/// until a topology change marks it stale; staleness is tracked per entry, so recomputation
/// of one pair never blocks lookups of unaffected pairs.
///
/// The table never observes the topology directly: the caller applies a change to the
/// [`Topology`] and reports it through [`on_topology_change`](Self::on_topology_change), the
/// sole mutation entry point after construction.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    k: usize,
    entries: HashMap<(NodeId, NodeId, WeightModel), CacheEntry>,
}

impl RoutingTable {
    /// Create an empty routing table computing up to `k` paths per pair.
    pub fn new(k: usize) -> Self {
        Self { k, entries: HashMap::new() }
    }

    /// The number of paths requested per pair.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Get the path set for the pair under the given weight model, computing it if it is not
    /// cached or was invalidated. A disconnected pair yields an empty set; only a source or
    /// destination missing from the topology is an error.
    pub fn lookup(
        &mut self,
        topo: &Topology,
        source: NodeId,
        target: NodeId,
        model: WeightModel,
    ) -> Result<&PathSet, TopologyError> {
        let k = self.k;
        let entry = match self.entries.entry((source, target, model)) {
            Entry::Occupied(entry) if !entry.get().stale => entry.into_mut(),
            entry => {
                debug!("compute {:?} paths {:?} -> {:?}", model, source, target);
                let paths = k_shortest_paths(topo, source, target, k, |l| model.cost(l))?;
                let fresh = CacheEntry { paths, stale: false };
                match entry {
                    Entry::Occupied(mut entry) => {
                        entry.insert(fresh);
                        entry.into_mut()
                    }
                    Entry::Vacant(entry) => entry.insert(fresh),
                }
            }
        };
        Ok(&entry.paths)
    }

    /// Warm the cache for every ordered pair of the given nodes, e.g. the endpoint list of a
    /// freshly generated fabric. Pairs that are already cached and fresh are skipped.
    pub fn populate(
        &mut self,
        topo: &Topology,
        nodes: &[NodeId],
        model: WeightModel,
    ) -> Result<(), TopologyError> {
        for &source in nodes {
            for &target in nodes {
                if source == target {
                    continue;
                }
                self.lookup(topo, source, target, model)?;
            }
        }
        Ok(())
    }

    /// Returns true if a fresh (non-stale) path set for the pair is cached.
    pub fn is_cached(&self, source: NodeId, target: NodeId, model: WeightModel) -> bool {
        self.entries
            .get(&(source, target, model))
            .map_or(false, |entry| !entry.stale)
    }

    /// Mark every cache entry affected by the topology change as stale. The entries stay in
    /// the table and are recomputed on their next lookup. An empty entry (disconnected pair)
    /// is invalidated by any added link, since the pair may have become connected.
    pub fn on_topology_change(&mut self, event: &TopologyEvent) {
        let mut marked = 0;
        for ((source, target, _), entry) in self.entries.iter_mut() {
            if entry.stale {
                continue;
            }
            let affected = match event {
                TopologyEvent::NodeRemoved(n) => {
                    *source == *n
                        || *target == *n
                        || entry.paths.iter().any(|p| event.invalidates(&p.nodes))
                }
                TopologyEvent::LinkAdded(_, _) if entry.paths.is_empty() => true,
                _ => entry.paths.iter().any(|p| event.invalidates(&p.nodes)),
            };
            if affected {
                entry.stale = true;
                marked += 1;
            }
        }
        debug!("topology change {:?}: {} cache entries marked stale", event, marked);
    }

    /// The number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Derive the forwarding decisions that realize the given path: one [`FlowRule`] per
/// switch-role hop, matching on the ingress port and the destination endpoint, forwarding out
/// of the port facing the next hop. Endpoint nodes produce no rule. Fails if two consecutive
/// path nodes are not adjacent in the topology (a stale path).
pub fn flow_rules(topo: &Topology, path: &Path) -> Result<Vec<FlowRule>, TopologyError> {
    let nodes = &path.nodes;
    let mut rules = Vec::new();
    let dst = match nodes.last() {
        Some(&dst) => dst,
        None => return Ok(rules),
    };

    for i in 0..nodes.len().saturating_sub(1) {
        let switch = nodes[i];
        let role = topo.node(switch).ok_or(TopologyError::NodeNotFound(switch))?.role();
        if !role.is_switch() {
            continue;
        }
        let in_port = if i > 0 { Some(topo.egress_port(switch, nodes[i - 1])?) } else { None };
        let output_port = topo.egress_port(switch, nodes[i + 1])?;
        rules.push(FlowRule {
            switch,
            criteria: FlowMatch { in_port, dst },
            output_port,
            priority: FLOW_PRIORITY,
            idle_timeout: Some(FLOW_IDLE_TIMEOUT),
            hard_timeout: Some(FLOW_HARD_TIMEOUT),
        });
    }

    Ok(rules)
}
