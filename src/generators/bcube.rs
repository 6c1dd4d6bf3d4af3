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

//! # BCube
//!
//! Recursively defined server-centric topology with one switch level per recursion step.

use super::{check_fabric_size, BuildError, Fabric, TopologyBuilder};
use crate::topology::{NodeId, NodeRole, Topology};

use std::convert::TryFrom;

/// # BCube
///
/// A `BCube(n, k)` has `n^(k+1)` servers, addressed as `k+1` digits in base `n`, and `k+1`
/// levels of `n^k` switches. The level-`l` switch with index `s` connects exactly the `n`
/// servers whose address with digit `l` removed equals `s`; in other words, port slot `l` of
/// every server leads to its level-`l` switch. Every server has `k+1` links, every switch has
/// `n`.
///
/// The construction is purely structural and deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BCube {
    /// Number of ports per switch (and digits base)
    pub n: usize,
    /// Recursion level (0 builds `n` servers on a single switch)
    pub k: usize,
}

impl BCube {
    /// Create a BCube generator with `n`-port switches and recursion level `k`.
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, k }
    }
}

impl TopologyBuilder for BCube {
    fn build(&self) -> Result<Fabric, BuildError> {
        let (n, k) = (self.n, self.k);
        if n < 2 {
            return Err(BuildError::InvalidParameter(format!(
                "BCube requires at least 2 ports per switch, got n={}",
                n
            )));
        }
        let num_nodes = (|| {
            let switches_per_level = n.checked_pow(u32::try_from(k).ok()?)?;
            let num_servers = switches_per_level.checked_mul(n)?;
            num_servers.checked_add(switches_per_level.checked_mul(k.checked_add(1)?)?)
        })();
        check_fabric_size(num_nodes)?;

        let switches_per_level = n.pow(k as u32);
        let num_servers = switches_per_level * n;

        let mut topo = Topology::new();
        let servers = (0..num_servers)
            .map(|s| topo.add_node(format!("server-{}", s), NodeRole::Server))
            .collect::<Result<Vec<NodeId>, _>>()?;

        for level in 0..=k {
            let stride = n.pow(level as u32);
            for s in 0..switches_per_level {
                let switch =
                    topo.add_node(format!("switch-{}-{}", level, s), NodeRole::Switch)?;
                // the n servers whose address with digit `level` removed equals s
                let low = s % stride;
                let high = s / stride;
                for digit in 0..n {
                    let server = high * stride * n + digit * stride + low;
                    topo.add_link(servers[server], switch)?;
                }
            }
        }

        Ok(Fabric { topo, servers })
    }
}
