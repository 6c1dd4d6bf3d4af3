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

//! Module for defining topology-change events

use crate::topology::types::NodeId;

/// A topology change reported by the discovery collaborator after construction. The event only
/// carries the affected identifiers; applying the change to the [`Topology`](super::Topology)
/// and notifying the caches are two separate steps driven by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyEvent {
    /// A node appeared
    NodeAdded(NodeId),
    /// A node disappeared, together with all of its links
    NodeRemoved(NodeId),
    /// A link appeared between the two nodes
    LinkAdded(NodeId, NodeId),
    /// The link between the two nodes disappeared
    LinkRemoved(NodeId, NodeId),
}

impl TopologyEvent {
    /// Returns true if the event affects the given path (a sequence of node ids). A removed
    /// node or link invalidates paths traversing it; an added link invalidates paths visiting
    /// either endpoint, since a better or additional path may now exist; an added node affects
    /// no existing path.
    pub fn invalidates(&self, path: &[NodeId]) -> bool {
        match *self {
            TopologyEvent::NodeAdded(_) => false,
            TopologyEvent::NodeRemoved(n) => path.contains(&n),
            TopologyEvent::LinkAdded(a, b) => path.contains(&a) || path.contains(&b),
            TopologyEvent::LinkRemoved(a, b) => {
                path.windows(2).any(|hop| {
                    (hop[0] == a && hop[1] == b) || (hop[0] == b && hop[1] == a)
                })
            }
        }
    }
}
