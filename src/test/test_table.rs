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

//! Test the routing-table cache and the flow-rule derivation.

use crate::routing::{flow_rules, RoutingTable, WeightModel};
use crate::topology::{NodeId, NodeRole, Topology, TopologyEvent};

/// # Test topology
///
/// A square of switches with two hosts, plus a disconnected two-switch limb:
///
/// ```text
/// h1 -- s1 ---- s2
///        |       |        h5 -- s5 -- s6 -- h6
/// h3 -- s3 ---- s4  (!)
/// ```
///
/// (!) `s3` connects to `s4`, `s4` to `s2`; `h3` hangs off `s3`.
fn get_test_topo() -> (Topology, Vec<NodeId>) {
    let mut topo = Topology::new();

    let s1 = topo.add_node("s1", NodeRole::Switch).unwrap();
    let s2 = topo.add_node("s2", NodeRole::Switch).unwrap();
    let s3 = topo.add_node("s3", NodeRole::Switch).unwrap();
    let s4 = topo.add_node("s4", NodeRole::Switch).unwrap();
    let s5 = topo.add_node("s5", NodeRole::Switch).unwrap();
    let s6 = topo.add_node("s6", NodeRole::Switch).unwrap();
    let h1 = topo.add_node("h1", NodeRole::Host).unwrap();
    let h3 = topo.add_node("h3", NodeRole::Host).unwrap();
    let h5 = topo.add_node("h5", NodeRole::Host).unwrap();
    let h6 = topo.add_node("h6", NodeRole::Host).unwrap();

    topo.add_link(s1, s2).unwrap();
    topo.add_link(s1, s3).unwrap();
    topo.add_link(s2, s4).unwrap();
    topo.add_link(s3, s4).unwrap();
    topo.add_link(s5, s6).unwrap();
    topo.add_link(h1, s1).unwrap();
    topo.add_link(h3, s3).unwrap();
    topo.add_link(h5, s5).unwrap();
    topo.add_link(h6, s6).unwrap();

    (topo, vec![s1, s2, s3, s4, s5, s6, h1, h3, h5, h6])
}

#[test]
fn test_lookup_caches() {
    let (topo, n) = get_test_topo();
    let (h1, h3) = (n[6], n[7]);
    let mut table = RoutingTable::new(4);

    assert!(!table.is_cached(h1, h3, WeightModel::Hops));
    let paths = table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    assert_eq!(paths.best().unwrap().hops(), 3);
    assert!(table.is_cached(h1, h3, WeightModel::Hops));

    // the weight models are cached independently
    assert!(!table.is_cached(h1, h3, WeightModel::Weighted));
    table.lookup(&topo, h1, h3, WeightModel::Weighted).unwrap();
    assert!(table.is_cached(h1, h3, WeightModel::Weighted));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_link_removal_invalidates() {
    let (mut topo, n) = get_test_topo();
    let (s1, s3, h1, h3, h5, h6) = (n[0], n[2], n[6], n[7], n[8], n[9]);
    let mut table = RoutingTable::new(4);

    // prime the cache with both pairs
    let paths = table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    assert!(paths.iter().any(|p| p.links().any(|(a, b)| (a, b) == (s1, s3))));
    table.lookup(&topo, h5, h6, WeightModel::Hops).unwrap();

    // remove the s1-s3 link and report the change
    let link = topo.find_link(s1, s3).unwrap();
    topo.remove_link(link).unwrap();
    table.on_topology_change(&TopologyEvent::LinkRemoved(s1, s3));

    // the pair routed over the link is stale, the disconnected limb is untouched
    assert!(!table.is_cached(h1, h3, WeightModel::Hops));
    assert!(table.is_cached(h5, h6, WeightModel::Hops));

    // the recomputed set no longer traverses the removed link
    let paths = table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    assert!(!paths.is_empty());
    for path in paths.iter() {
        assert!(!path
            .links()
            .any(|(a, b)| (a, b) == (s1, s3) || (a, b) == (s3, s1)));
    }
    assert_eq!(paths.best().unwrap().hops(), 5);
    assert!(table.is_cached(h1, h3, WeightModel::Hops));
}

#[test]
fn test_link_added_invalidates() {
    let (mut topo, n) = get_test_topo();
    let (s1, s4, h1, h3, h5, h6) = (n[0], n[3], n[6], n[7], n[8], n[9]);
    let mut table = RoutingTable::new(4);

    table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    table.lookup(&topo, h5, h6, WeightModel::Hops).unwrap();

    // a shortcut between s1 and s4 may improve the square pair, but not the limb
    topo.add_link(s1, s4).unwrap();
    table.on_topology_change(&TopologyEvent::LinkAdded(s1, s4));

    assert!(!table.is_cached(h1, h3, WeightModel::Hops));
    assert!(table.is_cached(h5, h6, WeightModel::Hops));
}

#[test]
fn test_disconnected_pair_invalidated_by_link_add() {
    let (mut topo, n) = get_test_topo();
    let (s2, s5, h1, h5) = (n[1], n[4], n[6], n[8]);
    let mut table = RoutingTable::new(4);

    // the pair spans the two components: the cached set is empty
    let paths = table.lookup(&topo, h1, h5, WeightModel::Hops).unwrap();
    assert!(paths.is_empty());
    assert!(table.is_cached(h1, h5, WeightModel::Hops));

    // joining the components must invalidate the empty entry
    topo.add_link(s2, s5).unwrap();
    table.on_topology_change(&TopologyEvent::LinkAdded(s2, s5));
    assert!(!table.is_cached(h1, h5, WeightModel::Hops));

    let paths = table.lookup(&topo, h1, h5, WeightModel::Hops).unwrap();
    assert_eq!(paths.best().unwrap().hops(), 4);
}

#[test]
fn test_node_removal_invalidates() {
    let (mut topo, n) = get_test_topo();
    let (s2, h1, h3, h5, h6) = (n[1], n[6], n[7], n[8], n[9]);
    let mut table = RoutingTable::new(4);

    table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    table.lookup(&topo, h5, h6, WeightModel::Hops).unwrap();

    topo.remove_node(s2).unwrap();
    table.on_topology_change(&TopologyEvent::NodeRemoved(s2));

    // h1-h3 cached the detour over s2 among its k paths
    assert!(!table.is_cached(h1, h3, WeightModel::Hops));
    assert!(table.is_cached(h5, h6, WeightModel::Hops));

    let paths = table.lookup(&topo, h1, h3, WeightModel::Hops).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths.iter().all(|p| !p.nodes.contains(&s2)));
}

#[test]
fn test_populate() {
    let (topo, n) = get_test_topo();
    let endpoints = [n[6], n[7], n[8], n[9]];
    let mut table = RoutingTable::new(4);

    table.populate(&topo, &endpoints, WeightModel::Hops).unwrap();
    // all 4 * 3 ordered pairs are cached, cross-component pairs as empty sets
    assert_eq!(table.len(), 12);
    for &a in &endpoints {
        for &b in &endpoints {
            if a != b {
                assert!(table.is_cached(a, b, WeightModel::Hops));
            }
        }
    }
}

#[test]
fn test_flow_rules() {
    let (topo, n) = get_test_topo();
    let (h1, h3) = (n[6], n[7]);
    let mut table = RoutingTable::new(4);

    let path = table
        .lookup(&topo, h1, h3, WeightModel::Hops)
        .unwrap()
        .best()
        .unwrap()
        .clone();
    assert_eq!(path.nodes.len(), 4); // h1 - s1 - s3 - h3

    let rules = flow_rules(&topo, &path).unwrap();
    // one rule per switch hop, none for the hosts
    assert_eq!(rules.len(), 2);

    let (s1, s3) = (n[0], n[2]);
    assert_eq!(rules[0].switch, s1);
    assert_eq!(rules[0].criteria.in_port, Some(topo.egress_port(s1, h1).unwrap()));
    assert_eq!(rules[0].criteria.dst, h3);
    assert_eq!(rules[0].output_port, topo.egress_port(s1, s3).unwrap());
    assert_eq!(rules[0].priority, 100);
    assert_eq!(rules[0].idle_timeout, Some(30));
    assert_eq!(rules[0].hard_timeout, Some(50));

    assert_eq!(rules[1].switch, s3);
    assert_eq!(rules[1].criteria.in_port, Some(topo.egress_port(s3, s1).unwrap()));
    assert_eq!(rules[1].output_port, topo.egress_port(s3, h3).unwrap());
}

#[test]
fn test_flow_rules_trivial_path() {
    let (topo, n) = get_test_topo();
    let h1 = n[6];
    let mut table = RoutingTable::new(4);

    let path = table
        .lookup(&topo, h1, h1, WeightModel::Hops)
        .unwrap()
        .best()
        .unwrap()
        .clone();
    assert_eq!(path.hops(), 0);
    assert!(flow_rules(&topo, &path).unwrap().is_empty());
}
