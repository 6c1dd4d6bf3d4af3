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

//! # Fat-Tree
//!
//! The canonical three-layer fat-tree built from `k`-port switches.

use super::{check_fabric_size, BuildError, Fabric, TopologyBuilder};
use crate::topology::{NodeId, NodeRole, Topology};

use itertools::iproduct;
use log::*;

/// Bandwidth attribute attached to every link, in Mbit/s.
const LINK_BANDWIDTH: f32 = 15.0;
/// Delay attribute attached to every link, in ms.
const LINK_DELAY: f32 = 5.0;

/// # Fat-Tree
///
/// A fat-tree of `k`-port switches has `(k/2)^2` core switches and `k` pods, each pod holding
/// `k/2` aggregation switches, `k/2` edge switches and `(k/2)^2` hosts (`k/2` per edge
/// switch). Within a pod, edge and aggregation switches form a complete bipartite graph. The
/// aggregation switch with index `i` of every pod connects to the core slice
/// `[i * k/2, (i+1) * k/2)`; the slices are disjoint, so every core switch is reachable from
/// every pod through exactly one aggregation switch.
///
/// `k` must be even; any two hosts are at most 6 hops apart (2 sharing an edge switch, 4
/// sharing a pod).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTree {
    /// Number of ports per switch. Must be even and non-zero.
    pub k: usize,
}

impl FatTree {
    /// Create a fat-tree generator for `k`-port switches.
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl TopologyBuilder for FatTree {
    fn build(&self) -> Result<Fabric, BuildError> {
        let k = self.k;
        if k == 0 || k % 2 != 0 {
            return Err(BuildError::InvalidParameter(format!(
                "fat-tree requires an even, non-zero port count, got k={}",
                k
            )));
        }
        let half = k / 2;
        // (k/2)^2 cores + k pods of (k/2 agg + k/2 edge + (k/2)^2 hosts)
        let num_nodes = (|| {
            let cores = half.checked_mul(half)?;
            let per_pod = cores.checked_add(2 * half)?;
            cores.checked_add(k.checked_mul(per_pod)?)
        })();
        check_fabric_size(num_nodes)?;

        let mut topo = Topology::new();
        let mut servers = Vec::with_capacity(k * half * half);

        debug!("create core layer: {} switches", half * half);
        let cores = (0..half * half)
            .map(|c| topo.add_node(format!("core-{}", c), NodeRole::Core))
            .collect::<Result<Vec<NodeId>, _>>()?;

        for pod in 0..k {
            debug!("create pod {}", pod);
            let aggs = (0..half)
                .map(|a| topo.add_node(format!("agg-{}-{}", pod, a), NodeRole::Aggregation))
                .collect::<Result<Vec<NodeId>, _>>()?;
            let edges = (0..half)
                .map(|e| topo.add_node(format!("edge-{}-{}", pod, e), NodeRole::Edge))
                .collect::<Result<Vec<NodeId>, _>>()?;

            // k/2 hosts per edge switch
            for (e, &edge) in edges.iter().enumerate() {
                for h in 0..half {
                    let host =
                        topo.add_node(format!("host-{}-{}-{}", pod, e, h), NodeRole::Host)?;
                    topo.add_link_attrs(edge, host, 1.0, Some(LINK_BANDWIDTH), Some(LINK_DELAY))?;
                    servers.push(host);
                }
            }

            // complete bipartite edge <-> agg within the pod
            for (&edge, &agg) in iproduct!(&edges, &aggs) {
                topo.add_link_attrs(edge, agg, 1.0, Some(LINK_BANDWIDTH), Some(LINK_DELAY))?;
            }

            // agg i covers the disjoint core slice [i * k/2, (i+1) * k/2)
            for (a, &agg) in aggs.iter().enumerate() {
                for j in 0..half {
                    topo.add_link_attrs(
                        agg,
                        cores[a * half + j],
                        1.0,
                        Some(LINK_BANDWIDTH),
                        Some(LINK_DELAY),
                    )?;
                }
            }
        }

        Ok(Fabric { topo, servers })
    }
}
