// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for tree construction.

use crate::error::{QuadTreeError, Result};

/// Parameters controlling how nodes split and when work is forked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuadTreeConfig {
    /// A leaf holding more than this many elements splits into quadrants.
    pub threshold: usize,
    /// Leaves at this depth never split, so coincident points cannot recurse
    /// without bound. The root is depth 0. At most [`Self::DEPTH_LIMIT`].
    pub max_depth: u32,
    /// Batches smaller than this are processed on the calling thread.
    pub parallel_cutoff: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            threshold: 3,
            max_depth: 32,
            parallel_cutoff: 1024,
        }
    }
}

impl QuadTreeConfig {
    /// Largest accepted [`max_depth`](Self::max_depth).
    ///
    /// Build and insert recurse once per level, so depth is bounded.
    pub const DEPTH_LIMIT: u32 = 256;

    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf split threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the maximum subdivision depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum batch size that is split across threads.
    #[must_use]
    pub fn with_parallel_cutoff(mut self, parallel_cutoff: usize) -> Self {
        self.parallel_cutoff = parallel_cutoff;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(QuadTreeError::InvalidThreshold);
        }
        if self.max_depth > Self::DEPTH_LIMIT {
            return Err(QuadTreeError::InvalidMaxDepth {
                max_depth: self.max_depth,
                limit: Self::DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}
