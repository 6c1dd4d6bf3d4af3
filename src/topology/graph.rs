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

//! # Topology
//!
//! The [`Topology`] struct stores the nodes and links of one fabric instance and provides all
//! structural operations. The routing engines only read from it.

use crate::topology::types::{
    FabricGraph, Link, LinkId, LinkWeight, Node, NodeId, NodeRole, PortNo, TopologyError,
};

use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use std::collections::HashMap;

/// # Topology
///
/// The set of all nodes and links of one fabric. Nodes and links live in an index-based arena;
/// adjacency is part of the arena itself, so a link is by construction referenced by both of
/// its endpoints or by neither.
///
/// All mutation happens through this struct. Mutating the topology while a path computation
/// against it is in flight is a caller error: the routing engines assume a stable snapshot for
/// the duration of one query. Callers that interleave rediscovery with lookups must serialize
/// mutations against reads, e.g. by cloning the topology per mutation epoch.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: FabricGraph,
    names: HashMap<String, NodeId>,
}

impl Topology {
    /// Generate an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node to the topology. The returned id is the node's identity for its entire
    /// lifetime. Fails if the name is already taken.
    pub fn add_node<S: Into<String>>(
        &mut self,
        name: S,
        role: NodeRole,
    ) -> Result<NodeId, TopologyError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(TopologyError::DuplicateNode(name));
        }
        let id = self.graph.add_node(Node::new(name.clone(), role));
        self.names.insert(name, id);
        Ok(id)
    }

    /// Add a new link with weight 1.0 (hop count) and no attributes.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> Result<LinkId, TopologyError> {
        self.add_link_attrs(a, b, 1.0, None, None)
    }

    /// Add a new link with the given static weight and no attributes.
    pub fn add_link_weighted(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: LinkWeight,
    ) -> Result<LinkId, TopologyError> {
        self.add_link_attrs(a, b, weight, None, None)
    }

    /// Add a new link with the given weight, bandwidth and delay. Both endpoints must exist,
    /// and self-loops are rejected. Each endpoint is assigned its next free port number; the
    /// ports are stored on the link in argument order.
    pub fn add_link_attrs(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: LinkWeight,
        bandwidth: Option<LinkWeight>,
        delay: Option<LinkWeight>,
    ) -> Result<LinkId, TopologyError> {
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        // check both endpoints up front, so no port is allocated on a failed add
        if !self.contains(b) {
            return Err(TopologyError::NodeNotFound(b));
        }
        let port_a = match self.graph.node_weight_mut(a) {
            Some(node) => node.allocate_port(),
            None => return Err(TopologyError::NodeNotFound(a)),
        };
        let port_b = match self.graph.node_weight_mut(b) {
            Some(node) => node.allocate_port(),
            None => return Err(TopologyError::NodeNotFound(b)),
        };
        Ok(self.graph.add_edge(a, b, Link { weight, bandwidth, delay, ports: (port_a, port_b) }))
    }

    /// Remove a link. Removing it again (or passing an id that never existed) is a no-op
    /// returning `None`.
    pub fn remove_link(&mut self, link: LinkId) -> Option<Link> {
        self.graph.remove_edge(link)
    }

    /// Remove a node together with all of its incident links. Idempotent, like
    /// [`remove_link`](Self::remove_link). The name becomes available again.
    pub fn remove_node(&mut self, node: NodeId) -> Option<Node> {
        let removed = self.graph.remove_node(node);
        if let Some(ref node) = removed {
            self.names.remove(node.name());
        }
        removed
    }

    /// Checks if the node is present in the topology.
    pub fn contains(&self, node: NodeId) -> bool {
        self.graph.node_weight(node).is_some()
    }

    /// Get a reference to the node data.
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.graph.node_weight(node)
    }

    /// Resolve a node name to its id.
    pub fn node_id(&self, name: &str) -> Result<NodeId, TopologyError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| TopologyError::NodeNameNotFound(name.to_string()))
    }

    /// Get the name of a node.
    pub fn node_name(&self, node: NodeId) -> Result<&str, TopologyError> {
        self.node(node).map(Node::name).ok_or(TopologyError::NodeNotFound(node))
    }

    /// Get a reference to the link data.
    pub fn link(&self, link: LinkId) -> Option<&Link> {
        self.graph.edge_weight(link)
    }

    /// Get the endpoints of a link, in the order they were passed at creation.
    pub fn endpoints(&self, link: LinkId) -> Option<(NodeId, NodeId)> {
        self.graph.edge_endpoints(link)
    }

    /// Find the link between two nodes, in either orientation.
    pub fn find_link(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        self.graph.find_edge(a, b)
    }

    /// Get the link data between two adjacent nodes.
    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<&Link> {
        self.find_link(a, b).and_then(|link| self.graph.edge_weight(link))
    }

    /// Checks if `b` is adjacent to `a`. Runs in O(degree(a)).
    pub fn is_neighbor(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.neighbors(a).any(|n| n == b)
    }

    /// Iterate over all neighbors of a node. The iterator is finite and can be restarted by
    /// calling this function again.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(node)
    }

    /// Iterate over all successors of a node. Links are undirected, so this coincides with
    /// [`neighbors`](Self::neighbors); it exists so that callers written against a directed
    /// model keep working.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node)
    }

    /// Iterate over all predecessors of a node. See [`successors`](Self::successors).
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(node)
    }

    /// Iterate over the adjacency of a node: every incident link as a `(neighbor, link)` pair.
    pub fn links_of(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Link)> + '_ {
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other, e.weight())
        })
    }

    /// The port on `from` that faces the adjacent node `to`. This is the adjacency metadata
    /// from which forwarding decisions derive their egress ports.
    pub fn egress_port(&self, from: NodeId, to: NodeId) -> Result<PortNo, TopologyError> {
        let link = self.find_link(from, to).ok_or(TopologyError::NotConnected(from, to))?;
        let (source, _) =
            self.endpoints(link).ok_or(TopologyError::NotConnected(from, to))?;
        let ports = match self.graph.edge_weight(link) {
            Some(link) => link.ports,
            None => return Err(TopologyError::NotConnected(from, to)),
        };
        Ok(if source == from { ports.0 } else { ports.1 })
    }

    /// The number of links incident to a node.
    pub fn degree(&self, node: NodeId) -> usize {
        self.graph.edges(node).count()
    }

    /// Iterate over all node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    /// Iterate over all node ids with the given role.
    pub fn nodes_by_role(&self, role: NodeRole) -> impl Iterator<Item = NodeId> + '_ {
        self.graph
            .node_indices()
            .filter(move |n| self.graph.node_weight(*n).map(|x| x.role()) == Some(role))
    }

    /// Iterate over all links as `(a, b, link)` triples.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId, &Link)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target(), e.weight()))
    }

    /// The number of nodes in the topology.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// The number of links in the topology.
    pub fn num_links(&self) -> usize {
        self.graph.edge_count()
    }
}
