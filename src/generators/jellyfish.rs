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

//! # Jellyfish
//!
//! Random switch interconnect without a fixed hierarchy.

use super::{check_fabric_size, BuildError, Fabric, TopologyBuilder};
use crate::topology::{NodeId, NodeRole, Topology};

use itertools::Itertools;
use log::*;
use rand::prelude::*;

/// # Jellyfish
///
/// `num_servers` servers are spread evenly over `num_switches` switches (the remainder goes to
/// the first switches). The remaining ports are then wired up randomly: as long as there is a
/// pair of non-adjacent switches that both have a spare port, one such pair is picked
/// uniformly at random and connected.
///
/// The construction may terminate with ports left unused, when every remaining pair of
/// switches with spare ports is already adjacent. This is a normal outcome of the random
/// process, not an error; the generator logs it and returns the fabric as built.
///
/// The generator is deterministic for a fixed `seed`. Use
/// [`build_with`](Jellyfish::build_with) to supply an external random source instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jellyfish {
    /// Number of switches
    pub num_switches: usize,
    /// Number of ports per switch
    pub num_ports: usize,
    /// Number of servers, spread evenly over the switches
    pub num_servers: usize,
    /// Seed for the random interconnect
    pub seed: u64,
}

impl Jellyfish {
    /// Create a jellyfish generator with the given sizes and seed.
    pub fn new(num_switches: usize, num_ports: usize, num_servers: usize, seed: u64) -> Self {
        Self { num_switches, num_ports, num_servers, seed }
    }

    /// Build the fabric using the provided random source.
    pub fn build_with<R: Rng>(&self, rng: &mut R) -> Result<Fabric, BuildError> {
        if self.num_switches == 0 || self.num_ports == 0 {
            return Err(BuildError::InvalidParameter(format!(
                "jellyfish requires at least one switch and one port, got {} switches of {} ports",
                self.num_switches, self.num_ports
            )));
        }
        check_fabric_size(self.num_switches.checked_add(self.num_servers))?;

        // servers per switch, remainder to the first switches
        let base = self.num_servers / self.num_switches;
        let remainder = self.num_servers % self.num_switches;
        let max_per_switch = base + if remainder > 0 { 1 } else { 0 };
        if self.num_servers > 0 && max_per_switch >= self.num_ports {
            return Err(BuildError::Constraint(format!(
                "{} servers on {} switches leave no spare port on a {}-port switch",
                self.num_servers, self.num_switches, self.num_ports
            )));
        }

        let mut topo = Topology::new();
        let switches = (0..self.num_switches)
            .map(|s| topo.add_node(format!("switch-{}", s), NodeRole::Switch))
            .collect::<Result<Vec<NodeId>, _>>()?;

        let mut servers = Vec::with_capacity(self.num_servers);
        let mut next_server = 0;
        for (s, &switch) in switches.iter().enumerate() {
            let count = base + if s < remainder { 1 } else { 0 };
            for _ in 0..count {
                let server =
                    topo.add_node(format!("server-{}", next_server), NodeRole::Server)?;
                topo.add_link(server, switch)?;
                servers.push(server);
                next_server += 1;
            }
        }

        // random interconnect: keep linking non-adjacent switch pairs with spare ports until
        // no such pair remains
        loop {
            let spare: Vec<NodeId> = switches
                .iter()
                .copied()
                .filter(|&s| topo.degree(s) < self.num_ports)
                .collect();
            let candidates: Vec<(NodeId, NodeId)> = spare
                .iter()
                .copied()
                .tuple_combinations()
                .filter(|&(a, b)| !topo.is_neighbor(a, b))
                .collect();
            match candidates.choose(rng) {
                Some(&(a, b)) => {
                    topo.add_link(a, b)?;
                }
                None => break,
            }
        }

        let unused: usize =
            switches.iter().map(|&s| self.num_ports - topo.degree(s).min(self.num_ports)).sum();
        if unused > 0 {
            debug!("jellyfish interconnect stopped with {} ports unused", unused);
        }

        Ok(Fabric { topo, servers })
    }
}

impl TopologyBuilder for Jellyfish {
    fn build(&self) -> Result<Fabric, BuildError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.build_with(&mut rng)
    }
}
