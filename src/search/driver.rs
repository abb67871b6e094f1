//! Top-level search over every starting pose.

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::core::{score, Session};
use crate::search::engine::{SearchStats, SessionSearch};
use crate::search::memo::MemoTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a driver run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Best session found; empty when nothing beat the empty session
    pub session: Session,
    /// Requested duration in seconds
    pub target: u32,
    /// Whether the depth bound cut off any branch. An empty session with
    /// `exhausted == false` means no continuation exists at all.
    pub exhausted: bool,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Duration actually achieved.
    pub fn achieved(&self) -> u64 {
        self.session.length()
    }

    pub fn distance(&self) -> u64 {
        self.session.distance(self.target)
    }

    pub fn is_exact(&self) -> bool {
        self.achieved() == u64::from(self.target)
    }
}

/// Find the session closest to `target` seconds over every starting pose.
///
/// Poses are tried in catalog order and the first exact match ends the run.
/// One memo table serves every starting pose of the run.
///
/// # Example
///
/// ```rust
/// use session_designer::catalog::CatalogBuilder;
/// use session_designer::config::SearchConfig;
/// use session_designer::search::find_best_session;
///
/// let catalog = CatalogBuilder::new()
///     .pose("A", 30)
///     .pose("B", 30)
///     .transition("A", "B", 10)
///     .build()
///     .unwrap();
///
/// let report = find_best_session(&catalog, 70, &SearchConfig::default());
/// assert!(report.is_exact());
/// assert_eq!(report.session.len(), 3);
/// ```
pub fn find_best_session(catalog: &Catalog, target: u32, config: &SearchConfig) -> SearchReport {
    let mut memo = MemoTable::new(config.cache_mode);
    let mut search = SessionSearch::new(catalog, target, &mut memo).with_max_depth(config.max_depth);

    let mut best = Session::new();
    let mut best_length = 0;

    for pose in catalog.poses() {
        let session = search.best_continuation(pose);
        let length = session.length();
        debug!(
            start = pose.name(),
            length,
            distance = score::distance(length, target),
            "Evaluated starting pose"
        );

        if length == u64::from(target) {
            best = session;
            break;
        }
        if score::is_closer(length, best_length, target) {
            best = session;
            best_length = length;
        }
    }

    let report = SearchReport {
        session: best,
        target,
        exhausted: search.is_exhausted(),
        stats: search.stats(),
    };

    if report.exhausted {
        warn!(
            cutoffs = report.stats.depth_cutoffs,
            max_depth = ?config.max_depth,
            "Depth bound cut the search short; a closer session may exist"
        );
    }
    if config.cache_mode.is_enabled() {
        debug!(
            hits = report.stats.memo_hits,
            misses = report.stats.memo_misses,
            "Memo table usage"
        );
    }
    info!(
        achieved = report.achieved(),
        target,
        elements = report.session.len(),
        nodes = report.stats.nodes_visited,
        "Search finished"
    );

    report
}
