//! Search configuration.

use crate::catalog::loader::read_json;
use crate::catalog::LoadError;
use crate::search::CacheMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a driver run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "cache_mode": "continuation", "max_depth": 64 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How resolved search states are cached
    pub cache_mode: CacheMode,

    /// Maximum number of poses on a path; `None` searches without bound.
    ///
    /// This is the only guard on recursion depth. Zero-duration transition
    /// cycles never terminate without one, and an unbounded search recurses
    /// about `target / shortest cycle` frames deep, each holding its own copy
    /// of the path, so memory grows with the square of that depth. Set a bound
    /// when a catalog has short cycles and the target is large.
    pub max_depth: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        read_json(path)
    }

    /// Enable memoization with continuation caching.
    pub fn memoized(self) -> Self {
        self.with_cache_mode(CacheMode::Continuation)
    }

    pub fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
