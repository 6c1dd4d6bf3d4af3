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

#![deny(missing_docs)]

//! # DCNet: Data-Center Topology Modeling and Routing
//!
//! This library models data-center network fabrics as graphs and computes routing information
//! over them. It is the computational core shared by topology experiments and routing
//! controllers: the emulation layer that instantiates links, the southbound layer that installs
//! forwarding rules, and any visualization are external collaborators which consume the plain
//! data this crate produces.
//!
//! ## Structure
//!
//! The library is structured in the following way:
//!
//! - **[`Topology`](topology::Topology)**: The graph model. Nodes carry a name and a structural
//!   role (core, aggregation, edge, host, switch, server), links carry a static weight, optional
//!   bandwidth and delay attributes, and the port numbers of both endpoints. The arena-based
//!   storage guarantees that a link is either present in both endpoints' adjacency or in
//!   neither.
//!
//! - **[`Generators`](generators)**: Builders for the common data-center shapes: the three-layer
//!   [fat-tree](generators::FatTree), the randomized [Jellyfish](generators::Jellyfish)
//!   interconnect, and the server-centric recursive [DCell](generators::DCell) and
//!   [BCube](generators::BCube) topologies. Every builder validates its parameters before the
//!   first node is created and returns the fabric together with its server-role endpoints.
//!
//! - **[`Routing`](routing)**: Single-source Dijkstra with a deterministic tie-break
//!   ([`dijkstra`](routing::dijkstra)), a restricted bidirectional search used for path
//!   deviations ([`bidirectional_dijkstra`](routing::bidirectional_dijkstra)), Yen's k-shortest
//!   paths and its equal-cost variant ([`k_shortest_paths`](routing::k_shortest_paths),
//!   [`ecmp_paths`](routing::ecmp_paths)), and the lazily invalidated per-pair
//!   [`RoutingTable`](routing::RoutingTable) which derives flow-rule records for a southbound
//!   collaborator.
//!
//! All computation is single-threaded and free of I/O. Mutating a [`Topology`](topology::Topology)
//! while a query against it is in flight is a caller error; callers which interleave discovery
//! and lookups must serialize mutations against reads (the topology is `Clone`, so a
//! copy-on-write snapshot per mutation epoch is the simplest discipline).
//!
//! ## Usage
//!
//! ```
//! use dcnet::generators::{FatTree, TopologyBuilder};
//! use dcnet::routing::{RoutingTable, WeightModel};
//!
//! fn main() -> Result<(), dcnet::Error> {
//!     // build a k=4 fat-tree with 16 hosts
//!     let fabric = FatTree::new(4).build()?;
//!
//!     // hosts in different pods are 6 hops apart
//!     let (a, b) = (fabric.servers[0], fabric.servers[15]);
//!     let mut table = RoutingTable::new(8);
//!     let paths = table.lookup(&fabric.topo, a, b, WeightModel::Hops)?;
//!     assert_eq!(paths.best().map(|p| p.hops()), Some(6));
//!
//!     Ok(())
//! }
//! ```

mod error;
mod test;

pub mod generators;
pub mod routing;
pub mod topology;

pub use error::Error;
