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

//! # DCell
//!
//! Recursively defined server-centric topology.

use super::{check_fabric_size, BuildError, Fabric, TopologyBuilder};
use crate::topology::{NodeId, NodeRole, Topology};

/// # DCell
///
/// A `DCell(0)` is `n` servers attached to one commodity switch. A `DCell(l)` consists of
/// `t + 1` copies of `DCell(l-1)` (where `t` is the number of servers in a `DCell(l-1)`),
/// fully meshed at the server level: for every cell pair `i < j`, server `j-1` of cell `i`
/// connects directly to server `i` of cell `j`. Servers therefore participate in forwarding
/// between cells; switches only exist at the lowest level.
///
/// The construction is purely structural and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DCell {
    /// Number of servers in a level-0 cell
    pub n: usize,
    /// Recursion level (0 builds a single cell)
    pub level: usize,
}

impl DCell {
    /// Create a DCell generator with `n` servers per level-0 cell.
    pub fn new(n: usize, level: usize) -> Self {
        Self { n, level }
    }

    /// Number of servers in a cell of the given level, or `None` on overflow.
    fn servers_in(n: usize, level: usize) -> Option<usize> {
        let mut t = n;
        for _ in 0..level {
            t = t.checked_mul(t.checked_add(1)?)?;
        }
        Some(t)
    }

    /// Number of level-0 switches in a cell of the given level, or `None` on overflow.
    fn switches_in(n: usize, level: usize) -> Option<usize> {
        Self::servers_in(n, level)?.checked_div(n)
    }

    fn build_cell(
        &self,
        topo: &mut Topology,
        prefix: &str,
        level: usize,
    ) -> Result<Vec<NodeId>, BuildError> {
        if level == 0 {
            let switch = topo.add_node(format!("{}switch", prefix), NodeRole::Switch)?;
            let mut cell = Vec::with_capacity(self.n);
            for s in 0..self.n {
                let server = topo.add_node(format!("{}server-{}", prefix, s), NodeRole::Server)?;
                topo.add_link(server, switch)?;
                cell.push(server);
            }
            return Ok(cell);
        }

        let sub_servers = match Self::servers_in(self.n, level - 1) {
            Some(t) => t,
            None => {
                return Err(BuildError::Constraint(String::from(
                    "DCell size overflows at this level",
                )))
            }
        };
        let num_cells = sub_servers + 1;
        let cells = (0..num_cells)
            .map(|c| self.build_cell(topo, &format!("{}{}.", prefix, c), level - 1))
            .collect::<Result<Vec<Vec<NodeId>>, _>>()?;

        // full inter-cell server mesh: server j-1 of cell i <-> server i of cell j
        for i in 0..num_cells {
            for j in (i + 1)..num_cells {
                topo.add_link(cells[i][j - 1], cells[j][i])?;
            }
        }

        Ok(cells.into_iter().flatten().collect())
    }
}

impl TopologyBuilder for DCell {
    fn build(&self) -> Result<Fabric, BuildError> {
        if self.n < 2 {
            return Err(BuildError::InvalidParameter(format!(
                "DCell requires at least 2 servers per cell, got n={}",
                self.n
            )));
        }
        let num_nodes = Self::servers_in(self.n, self.level)
            .and_then(|servers| Some((servers, Self::switches_in(self.n, self.level)?)))
            .and_then(|(servers, switches)| servers.checked_add(switches));
        check_fabric_size(num_nodes)?;

        let mut topo = Topology::new();
        let servers = self.build_cell(&mut topo, "", self.level)?;
        Ok(Fabric { topo, servers })
    }
}
