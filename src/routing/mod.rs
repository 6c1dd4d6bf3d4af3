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

//! # Routing Engines
//!
//! Shortest-path computation over a [`Topology`](crate::topology::Topology): single-source
//! Dijkstra with deterministic tie-breaking, a restricted bidirectional search, Yen's
//! k-shortest paths with an equal-cost variant, and the per-pair [`RoutingTable`] cache that
//! turns path sets into flow-rule records for the southbound collaborator.
//!
//! Absence of a path is not an error at this level: unreachable nodes have infinite distance
//! and a disconnected pair yields an empty [`PathSet`]. Only the restricted
//! [`bidirectional_dijkstra`] reports [`NoPathError`], which the k-shortest-path loop folds
//! into "no further candidate".

pub(crate) mod bidirectional;
pub(crate) mod dijkstra;
pub(crate) mod ksp;
pub(crate) mod table;
pub(crate) mod types;

pub use bidirectional::bidirectional_dijkstra;
pub use dijkstra::{all_pairs, dijkstra, shortest_path, DistanceTable};
pub use ksp::{ecmp_paths, k_shortest_paths, SimplePaths};
pub use table::{flow_rules, FlowMatch, FlowRule, RoutingTable};
pub use types::{NoPathError, Path, PathSet, WeightModel};
