// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use thiserror::Error;

/// Errors raised when a tree cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    /// The domain square has no area or non-finite coordinates.
    #[error("invalid domain geometry: half dimension {half_dim} must be positive and finite")]
    InvalidGeometry {
        /// The rejected half dimension.
        half_dim: f64,
    },

    /// A leaf threshold of zero would split forever.
    #[error("leaf threshold must be at least 1")]
    InvalidThreshold,

    /// The maximum depth is above [`QuadTreeConfig::DEPTH_LIMIT`](crate::QuadTreeConfig::DEPTH_LIMIT).
    #[error("max depth {max_depth} exceeds the limit of {limit}")]
    InvalidMaxDepth {
        /// The rejected depth.
        max_depth: u32,
        /// The accepted maximum.
        limit: u32,
    },
}

/// Result alias for fallible quadtree operations.
pub type Result<T> = core::result::Result<T, QuadTreeError>;
