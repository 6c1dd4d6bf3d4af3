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

//! Module containing all type definitions of the graph model

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use thiserror::Error;

type IndexType = u32;
/// Node identification (and index into the graph)
pub type NodeId = NodeIndex<IndexType>;
/// Link identification (and index into the graph)
pub type LinkId = EdgeIndex<IndexType>;
/// Static link cost (hop count or bandwidth-derived)
pub type LinkWeight = f32;
/// Port number on a node
pub type PortNo = u32;
/// Fabric graph, an arena of nodes and links with index-based adjacency
pub type FabricGraph = StableGraph<Node, Link, Undirected, IndexType>;

/// Structural role of a node in the fabric
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum NodeRole {
    /// Core layer switch of a fat-tree
    Core,
    /// Aggregation layer switch of a fat-tree
    Aggregation,
    /// Edge (top-of-rack) layer switch of a fat-tree
    Edge,
    /// Host attached to an edge switch
    Host,
    /// Commodity switch without a fixed layer (Jellyfish, DCell, BCube)
    Switch,
    /// Server attached to a commodity switch
    Server,
}

impl NodeRole {
    /// Returns true if the node is a traffic endpoint (a valid source or destination for
    /// routing queries).
    pub fn is_endpoint(&self) -> bool {
        matches!(self, Self::Host | Self::Server)
    }

    /// Returns true if the node forwards traffic.
    pub fn is_switch(&self) -> bool {
        !self.is_endpoint()
    }
}

/// A node of the fabric. The identity of a node is its [`NodeId`]; the name is unique within
/// one topology and can be resolved back to the id.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    role: NodeRole,
    next_port: PortNo,
}

impl Node {
    pub(crate) fn new(name: String, role: NodeRole) -> Self {
        Self { name, role, next_port: 0 }
    }

    /// The unique name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structural role of the node.
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// Hand out the next free port number. Ports are monotonically increasing and never
    /// reused, so a port stays unambiguous even after the link it belonged to is removed.
    pub(crate) fn allocate_port(&mut self) -> PortNo {
        let port = self.next_port;
        self.next_port += 1;
        port
    }
}

/// An undirected link between two nodes. The weight is the static cost used by the weighted
/// routing model; bandwidth and delay are carried through for the emulation collaborator and
/// never interpreted by the algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Static link cost (1.0 unless set otherwise)
    pub weight: LinkWeight,
    /// Link bandwidth in Mbit/s, if known
    pub bandwidth: Option<LinkWeight>,
    /// Propagation delay in ms, if known
    pub delay: Option<LinkWeight>,
    /// Port numbers at both endpoints, in the order the endpoints were passed at creation
    pub ports: (PortNo, PortNo),
}

/// Topology Errors
#[derive(Error, Debug, PartialEq)]
pub enum TopologyError {
    /// The node name is already taken
    #[error("Node name is already in use: {0}")]
    DuplicateNode(String),
    /// The node is not present in the topology
    #[error("Node was not found in the topology: {0:?}")]
    NodeNotFound(NodeId),
    /// The node name is not present in the topology
    #[error("Node name was not found in the topology: {0}")]
    NodeNameNotFound(String),
    /// A link may not connect a node to itself
    #[error("Self-loop links are not allowed: {0:?}")]
    SelfLoop(NodeId),
    /// Two nodes are not adjacent
    #[error("Nodes are not connected: {0:?} -> {1:?}")]
    NotConnected(NodeId, NodeId),
}
