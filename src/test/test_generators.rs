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

//! Test the structural shape of the generated fabrics.

use crate::generators::{BCube, BuildError, DCell, FatTree, Jellyfish, TopologyBuilder};
use crate::topology::NodeRole;
use std::collections::HashSet;

#[test]
fn test_fat_tree_shape() {
    let fabric = FatTree::new(4).build().unwrap();
    let topo = &fabric.topo;

    // 4 cores + 4 pods x (2 agg + 2 edge + 4 hosts)
    assert_eq!(topo.num_nodes(), 36);
    assert_eq!(fabric.servers.len(), 16);
    assert_eq!(topo.nodes_by_role(NodeRole::Core).count(), 4);
    assert_eq!(topo.nodes_by_role(NodeRole::Aggregation).count(), 8);
    assert_eq!(topo.nodes_by_role(NodeRole::Edge).count(), 8);
    assert_eq!(topo.nodes_by_role(NodeRole::Host).count(), 16);

    // 16 host links + 4 pods x (4 edge-agg + 4 agg-core)
    assert_eq!(topo.num_links(), 48);

    // every switch uses exactly k ports
    for role in &[NodeRole::Core, NodeRole::Aggregation, NodeRole::Edge] {
        for switch in topo.nodes_by_role(*role) {
            assert_eq!(topo.degree(switch), 4);
        }
    }

    // every host hangs off exactly one edge switch
    for &host in &fabric.servers {
        assert_eq!(topo.degree(host), 1);
        let edge = topo.neighbors(host).next().unwrap();
        assert_eq!(topo.node(edge).map(|n| n.role()), Some(NodeRole::Edge));
    }
}

#[test]
fn test_fat_tree_core_coverage() {
    // every core switch is reachable from every pod through exactly one aggregation switch
    let fabric = FatTree::new(4).build().unwrap();
    let topo = &fabric.topo;

    for core in topo.nodes_by_role(NodeRole::Core) {
        let mut pods = HashSet::new();
        for agg in topo.neighbors(core) {
            let name = topo.node_name(agg).unwrap();
            let pod: usize = name.split('-').nth(1).unwrap().parse().unwrap();
            assert!(pods.insert(pod), "core {:?} reaches pod {} twice", core, pod);
        }
        assert_eq!(pods.len(), 4);
    }
}

#[test]
fn test_fat_tree_invalid_k() {
    assert!(matches!(FatTree::new(0).build(), Err(BuildError::InvalidParameter(_))));
    assert!(matches!(FatTree::new(3).build(), Err(BuildError::InvalidParameter(_))));
}

#[test]
fn test_jellyfish_shape() {
    let fabric = Jellyfish::new(8, 4, 16, 42).build().unwrap();
    let topo = &fabric.topo;

    assert_eq!(fabric.servers.len(), 16);
    assert_eq!(topo.nodes_by_role(NodeRole::Switch).count(), 8);

    // generation terminated and no switch exceeds its port count
    for switch in topo.nodes_by_role(NodeRole::Switch) {
        assert!(topo.degree(switch) <= 4);
        // 16 servers over 8 switches: exactly 2 per switch
        let servers = topo
            .neighbors(switch)
            .filter(|&n| topo.node(n).map(|x| x.role()) == Some(NodeRole::Server))
            .count();
        assert_eq!(servers, 2);
    }
    for &server in &fabric.servers {
        assert_eq!(topo.degree(server), 1);
    }
}

#[test]
fn test_jellyfish_deterministic() {
    let link_names = |seed: u64| -> HashSet<(String, String)> {
        let fabric = Jellyfish::new(8, 4, 16, seed).build().unwrap();
        fabric
            .topo
            .links()
            .map(|(a, b, _)| {
                let a = fabric.topo.node_name(a).unwrap().to_string();
                let b = fabric.topo.node_name(b).unwrap().to_string();
                if a < b {
                    (a, b)
                } else {
                    (b, a)
                }
            })
            .collect()
    };

    assert_eq!(link_names(7), link_names(7));
}

#[test]
fn test_jellyfish_invalid() {
    // no ports at all
    assert!(matches!(
        Jellyfish::new(8, 0, 0, 0).build(),
        Err(BuildError::InvalidParameter(_))
    ));
    // two servers per switch on single-port switches leave no spare port
    assert!(matches!(
        Jellyfish::new(2, 1, 4, 0).build(),
        Err(BuildError::Constraint(_))
    ));
}

#[test]
fn test_dcell_shape() {
    // level 0: n servers on one switch
    let fabric = DCell::new(4, 0).build().unwrap();
    assert_eq!(fabric.servers.len(), 4);
    assert_eq!(fabric.topo.num_nodes(), 5);
    assert_eq!(fabric.topo.num_links(), 4);

    // level 1: 5 cells of 4 servers, fully meshed at the server level
    let fabric = DCell::new(4, 1).build().unwrap();
    let topo = &fabric.topo;
    assert_eq!(fabric.servers.len(), 20);
    assert_eq!(topo.nodes_by_role(NodeRole::Switch).count(), 5);
    // 20 server-switch links + C(5, 2) = 10 inter-cell links
    assert_eq!(topo.num_links(), 30);

    // every server has its switch link, and at most one inter-cell link
    for &server in &fabric.servers {
        let degree = topo.degree(server);
        assert!(degree == 1 || degree == 2);
    }
    // exactly 2 * 10 link endpoints on servers beyond the switch links
    let inter_cell: usize =
        fabric.servers.iter().map(|&s| topo.degree(s)).sum::<usize>() - 20;
    assert_eq!(inter_cell, 20);
}

#[test]
fn test_bcube_shape() {
    let fabric = BCube::new(4, 1).build().unwrap();
    let topo = &fabric.topo;

    assert_eq!(fabric.servers.len(), 16);
    assert_eq!(topo.nodes_by_role(NodeRole::Switch).count(), 8);
    assert_eq!(topo.num_links(), 32);

    // every server connects to one switch per level, every switch to n servers
    for &server in &fabric.servers {
        assert_eq!(topo.degree(server), 2);
    }
    for switch in topo.nodes_by_role(NodeRole::Switch) {
        assert_eq!(topo.degree(switch), 4);
    }
}

#[test]
fn test_bcube_level_zero() {
    let fabric = BCube::new(2, 0).build().unwrap();
    assert_eq!(fabric.servers.len(), 2);
    assert_eq!(fabric.topo.nodes_by_role(NodeRole::Switch).count(), 1);
    assert_eq!(fabric.topo.num_links(), 2);
}

#[test]
fn test_size_guard() {
    // a level-3 DCell of 10-server cells is far beyond the node bound
    assert!(matches!(DCell::new(10, 3).build(), Err(BuildError::Constraint(_))));
    assert!(matches!(BCube::new(10, 5).build(), Err(BuildError::Constraint(_))));
}
