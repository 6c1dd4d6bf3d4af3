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

//! Module containing all error types

use crate::generators::BuildError;
use crate::routing::NoPathError;
use crate::topology::TopologyError;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error propagated from the graph model
    #[error("Topology Error: {0}")]
    Topology(#[from] TopologyError),
    /// A topology generator rejected its parameters or could not satisfy its structural
    /// constraints. No partially built topology is ever returned.
    #[error("Build Error: {0}")]
    Build(#[from] BuildError),
    /// The restricted path search found no path. Top-level path queries never surface this;
    /// absence of a path is reported as an empty path set or an infinite distance.
    #[error("Routing Error: {0}")]
    NoPath(#[from] NoPathError),
}
