//! Memoization of resolved search states.
//!
//! A search state is keyed by the pose just reached and the budget that
//! remains before the target. The table is unbounded, first writer wins, and
//! nothing is ever evicted during a run.
//!
//! The stored value is the best session found from that state, which carries
//! the full prefix of whichever path resolved it first. [`CacheMode`] decides
//! what a later hit returns:
//!
//! - [`CacheMode::Verbatim`] hands back the stored session unchanged, prefix
//!   and all, even when the state is reached along a different path.
//! - [`CacheMode::Continuation`] keeps only the part after the keyed pose and
//!   splices it onto the caller's own path, so a hit is indistinguishable from
//!   recomputing the state.

use crate::core::{Pose, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How resolved search states are cached.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// No caching; every state is explored
    #[default]
    Disabled,

    /// Cache continuations and splice them onto the caller's path
    Continuation,

    /// Cache whole sessions and return them unchanged
    Verbatim,
}

impl CacheMode {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Memoization key: the pose just appended and the budget left after it.
///
/// `depth_left` is the number of poses the path may still gain under a depth
/// bound, or `None` when the search is unbounded. Two states share a result
/// only when all three agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchKey {
    pub pose: Pose,
    pub remaining: u64,
    pub depth_left: Option<usize>,
}

impl SearchKey {
    pub fn new(pose: Pose, remaining: u64, depth_left: Option<usize>) -> Self {
        Self {
            pose,
            remaining,
            depth_left,
        }
    }
}

#[derive(Clone, Debug)]
struct MemoRecord {
    session: Session,
    /// Index of the keyed pose within `session`.
    anchor: usize,
}

/// Cache of resolved search states for one driver run.
#[derive(Debug, Default)]
pub struct MemoTable {
    mode: CacheMode,
    records: HashMap<SearchKey, MemoRecord>,
    hits: u64,
    misses: u64,
}

impl MemoTable {
    pub fn new(mode: CacheMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Look up a state reached by `path`, whose last element is the keyed pose.
    pub fn lookup(&mut self, key: &SearchKey, path: &Session) -> Option<Session> {
        if !self.mode.is_enabled() {
            return None;
        }

        let Some(record) = self.records.get(key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;

        let session = match self.mode {
            CacheMode::Continuation if !record.session.is_empty() => {
                path.spliced(&record.session.elements()[record.anchor + 1..])
            }
            _ => record.session.clone(),
        };
        Some(session)
    }

    /// Record the best session found from a state reached by `path`.
    ///
    /// The first record for a key is kept; later stores are ignored.
    pub fn store(&mut self, key: SearchKey, path: &Session, best: &Session) {
        if !self.mode.is_enabled() || path.is_empty() {
            return;
        }

        self.records.entry(key).or_insert_with(|| MemoRecord {
            session: best.clone(),
            anchor: path.len() - 1,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
