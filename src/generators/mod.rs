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

//! # Topology Generators
//!
//! Builders for the common data-center fabrics. Every generator validates its structural
//! parameters before touching the graph, and either returns a completely built [`Fabric`] or
//! an error with nothing built at all.

use crate::topology::{NodeId, Topology, TopologyError};
use thiserror::Error;

mod bcube;
mod dcell;
mod fat_tree;
mod jellyfish;

pub use bcube::BCube;
pub use dcell::DCell;
pub use fat_tree::FatTree;
pub use jellyfish::Jellyfish;

/// Upper bound on the number of nodes a generator will build. Parameter combinations beyond
/// this are rejected up front instead of exhausting memory.
pub(crate) const MAX_FABRIC_NODES: usize = 100_000;

/// A fully built fabric: the topology plus its endpoint nodes in construction order. The
/// endpoints (host- or server-role nodes) are the valid sources and destinations for routing
/// queries.
#[derive(Debug, Clone)]
pub struct Fabric {
    /// The generated topology
    pub topo: Topology,
    /// All endpoint nodes, in deterministic construction order
    pub servers: Vec<NodeId>,
}

/// Trait implemented by all topology generators.
pub trait TopologyBuilder {
    /// Validate the parameters and build the fabric. Fails with
    /// [`BuildError::InvalidParameter`] on malformed inputs and with
    /// [`BuildError::Constraint`] if the structural constraints cannot be satisfied; in both
    /// cases no partially built topology is returned.
    fn build(&self) -> Result<Fabric, BuildError>;
}

/// Generator Errors
#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    /// The parameters are malformed (e.g. an odd port count for a fat-tree)
    #[error("Invalid generator parameter: {0}")]
    InvalidParameter(String),
    /// The parameters are well-formed, but the structural constraints cannot be satisfied
    /// (e.g. fewer ports per switch than attached servers)
    #[error("Topology constraint cannot be satisfied: {0}")]
    Constraint(String),
    /// Error propagated from the graph model while wiring
    #[error("Topology Error: {0}")]
    Topology(#[from] TopologyError),
}

/// Reject parameter combinations that would build an excessively large fabric.
pub(crate) fn check_fabric_size(num_nodes: Option<usize>) -> Result<(), BuildError> {
    match num_nodes {
        Some(n) if n <= MAX_FABRIC_NODES => Ok(()),
        _ => Err(BuildError::Constraint(format!(
            "fabric would exceed the maximum of {} nodes",
            MAX_FABRIC_NODES
        ))),
    }
}
