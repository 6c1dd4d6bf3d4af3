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

//! # Graph Model
//!
//! This module contains the graph representation of one network fabric: named, role-tagged
//! nodes and undirected, weighted links stored in an index-based arena. All structure shared
//! by the topology generators and the routing engines lives here.
//!
//! ## Example usage
//!
//! ```rust
//! use dcnet::topology::{NodeRole, Topology};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut t = Topology::new();
//!
//!     let s1 = t.add_node("s1", NodeRole::Switch)?;
//!     let s2 = t.add_node("s2", NodeRole::Switch)?;
//!     let h1 = t.add_node("h1", NodeRole::Host)?;
//!     let h2 = t.add_node("h2", NodeRole::Host)?;
//!
//!     t.add_link(h1, s1)?;
//!     t.add_link(s1, s2)?;
//!     t.add_link(s2, h2)?;
//!
//!     assert!(t.is_neighbor(s1, s2));
//!     assert!(!t.is_neighbor(h1, h2));
//!     // the first port allocated on s1 faces h1
//!     assert_eq!(t.egress_port(s1, h1)?, 0);
//!     assert_eq!(t.egress_port(s1, s2)?, 1);
//!
//!     Ok(())
//! }
//! ```

pub(crate) mod event;
pub(crate) mod graph;
pub(crate) mod types;

pub use event::TopologyEvent;
pub use graph::Topology;
pub use types::{
    FabricGraph, Link, LinkId, LinkWeight, Node, NodeId, NodeRole, PortNo, TopologyError,
};
