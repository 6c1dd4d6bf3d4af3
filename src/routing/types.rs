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

//! Module containing all type definitions of the routing engines

use crate::topology::{Link, LinkWeight, NodeId};
use thiserror::Error;

/// A single path: the visited nodes in order, annotated with the total cost under the weight
/// function it was computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// The visited nodes, from source to destination
    pub nodes: Vec<NodeId>,
    /// Total cost of the path
    pub cost: LinkWeight,
}

impl Path {
    /// The number of hops (links) on the path. A trivial one-node path has 0 hops.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// The source node, if the path is non-empty.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// The destination node, if the path is non-empty.
    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Iterate over the traversed links as `(a, b)` node pairs.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|hop| (hop[0], hop[1]))
    }
}

/// An ordered set of candidate paths for one (source, destination) pair. Paths are kept in
/// non-decreasing cost order, ties in discovery order, and no two paths visit the same node
/// sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    /// Create an empty path set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path, preserving the set invariant: a path with a node sequence that is
    /// already present is silently dropped.
    pub fn push(&mut self, path: Path) {
        if !self.paths.iter().any(|p| p.nodes == path.nodes) {
            self.paths.push(path);
        }
    }

    /// The cheapest path, if any.
    pub fn best(&self) -> Option<&Path> {
        self.paths.first()
    }

    /// All paths, cheapest first.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Iterate over the paths, cheapest first.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    /// The number of paths in the set.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if the set holds no path (the pair is disconnected).
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Weight model for path computation. This is the cache key distinguishing hop-count from
/// weighted path sets, and the uniform weight-function abstraction handed to the engines.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum WeightModel {
    /// Every link costs 1, regardless of its weight
    Hops,
    /// Links cost their static weight
    Weighted,
}

impl WeightModel {
    /// The cost of a single link under this model.
    pub fn cost(&self, link: &Link) -> LinkWeight {
        match self {
            Self::Hops => 1.0,
            Self::Weighted => link.weight,
        }
    }
}

/// No path exists between the two nodes under the given restrictions. Raised only by the
/// restricted bidirectional search; top-level queries represent unreachability as an empty
/// [`PathSet`] or an infinite distance instead.
#[derive(Error, Debug, PartialEq)]
#[error("No path between {0:?} and {1:?}")]
pub struct NoPathError(pub NodeId, pub NodeId);
