//! Depth-first search for the session closest to a target duration.

use crate::catalog::Catalog;
use crate::core::{score, Pose, Session};
use crate::search::memo::{MemoTable, SearchKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Poses appended to a path
    pub nodes_visited: u64,
    /// Branches not extended because the depth bound was reached
    pub depth_cutoffs: u64,
    /// States answered from the memo table
    pub memo_hits: u64,
    /// States looked up and not found in the memo table
    pub memo_misses: u64,
}

/// What the step before an overshooting pose looked like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback {
    /// The overshooting pose opened the path; nothing shorter exists.
    Start,
    /// The path was `length` seconds long before the last transition and pose.
    Previous { length: u64 },
}

impl Fallback {
    fn of(path: &Session, length: u64) -> Self {
        match path.elements() {
            [.., transition, pose] if path.len() >= 3 => Self::Previous {
                length: length
                    - u64::from(pose.duration_seconds())
                    - u64::from(transition.duration_seconds()),
            },
            _ => Self::Start,
        }
    }
}

/// Best session found below one search state.
#[derive(Debug)]
struct Branch {
    session: Session,
    /// False when the depth bound stopped exploration somewhere below.
    complete: bool,
}

impl Branch {
    fn settled(session: Session) -> Self {
        Self {
            session,
            complete: true,
        }
    }
}

/// Search over one catalog for one target duration.
///
/// The memo table is borrowed so that it can outlive a single starting pose
/// and be shared by every search of a driver run. Best-so-far values are
/// local to each recursive call; the search holds no result state of its own.
///
/// # Example
///
/// ```rust
/// use session_designer::catalog::CatalogBuilder;
/// use session_designer::search::{CacheMode, MemoTable, SessionSearch};
///
/// let catalog = CatalogBuilder::new()
///     .pose("A", 30)
///     .pose("B", 30)
///     .transition("A", "B", 10)
///     .build()
///     .unwrap();
/// let start = catalog.pose("A").unwrap().clone();
///
/// let mut memo = MemoTable::new(CacheMode::Disabled);
/// let mut search = SessionSearch::new(&catalog, 70, &mut memo);
/// let session = search.best_continuation(&start);
///
/// assert_eq!(session.length(), 70);
/// assert_eq!(session.len(), 3);
/// ```
pub struct SessionSearch<'a> {
    catalog: &'a Catalog,
    target: u32,
    memo: &'a mut MemoTable,
    max_depth: Option<usize>,
    stats: SearchStats,
}

impl<'a> SessionSearch<'a> {
    pub fn new(catalog: &'a Catalog, target: u32, memo: &'a mut MemoTable) -> Self {
        Self {
            catalog,
            target,
            memo,
            max_depth: None,
            stats: SearchStats::default(),
        }
    }

    /// Stop extending paths that already hold `max_depth` poses.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Counters accumulated over every call on this search so far.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            memo_hits: self.memo.hits(),
            memo_misses: self.memo.misses(),
            ..self.stats
        }
    }

    /// True once the depth bound has cut off at least one branch.
    pub fn is_exhausted(&self) -> bool {
        self.stats.depth_cutoffs > 0
    }

    /// Best session starting at `start`.
    ///
    /// Returns an empty session when no path from `start` gets strictly
    /// closer to the target than the empty session does.
    pub fn best_continuation(&mut self, start: &Pose) -> Session {
        self.extend(start, &Session::new(), 0, 1).session
    }

    /// Append `pose` to `path` (which is `elapsed` seconds long and will hold
    /// `depth` poses) and resolve the resulting state.
    ///
    /// Lengths are summed in `u64` so that no sum of `u32` durations along a
    /// path can wrap before it is compared with the target.
    fn extend(&mut self, pose: &Pose, path: &Session, elapsed: u64, depth: usize) -> Branch {
        self.stats.nodes_visited += 1;
        let path = path.extended(pose.clone());
        let length = elapsed + u64::from(pose.duration_seconds());

        match length.cmp(&u64::from(self.target)) {
            Ordering::Equal => Branch::settled(path),
            Ordering::Greater => Branch::settled(self.settle_overshoot(path, length)),
            Ordering::Less => self.descend(pose, path, length, depth),
        }
    }

    /// Keep the overshooting path unless dropping its last step lands
    /// strictly closer to the target.
    fn settle_overshoot(&self, path: Session, length: u64) -> Session {
        match Fallback::of(&path, length) {
            Fallback::Start => path,
            Fallback::Previous { length: previous } => {
                let here = length - u64::from(self.target);
                if here > score::distance(previous, self.target) {
                    path.truncated(2)
                } else {
                    path
                }
            }
        }
    }

    /// Explore every transition out of `pose` from an undershooting path.
    ///
    /// Under a depth bound the memo key also carries the number of poses the
    /// path may still gain, so a hit never reuses a result resolved with more
    /// headroom than this path has.
    fn descend(&mut self, pose: &Pose, path: Session, length: u64, depth: usize) -> Branch {
        if self.max_depth.is_some_and(|limit| depth >= limit) {
            self.stats.depth_cutoffs += 1;
            trace!(pose = pose.name(), depth, "Depth bound reached");
            return Branch {
                session: Session::new(),
                complete: false,
            };
        }

        let key = SearchKey::new(
            pose.clone(),
            u64::from(self.target) - length,
            self.max_depth.map(|limit| limit - depth),
        );
        if let Some(cached) = self.memo.lookup(&key, &path) {
            return Branch::settled(cached);
        }

        let catalog = self.catalog;
        let mut best = Session::new();
        let mut best_length = 0;
        let mut complete = true;

        for transition in catalog.outgoing(pose) {
            let branch = self.extend(
                &transition.to,
                &path.extended(transition.clone()),
                length + u64::from(transition.duration_seconds),
                depth + 1,
            );
            complete &= branch.complete;

            let candidate = branch.session.length();
            if candidate == u64::from(self.target) {
                best = branch.session;
                break;
            }
            if score::is_closer(candidate, best_length, self.target) {
                best = branch.session;
                best_length = candidate;
            }
        }

        if complete {
            self.memo.store(key, &path, &best);
        }
        Branch {
            session: best,
            complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::search::memo::CacheMode;

    fn search_from(catalog: &Catalog, start: &str, target: u32, mode: CacheMode) -> Session {
        let mut memo = MemoTable::new(mode);
        let mut search = SessionSearch::new(catalog, target, &mut memo);
        search.best_continuation(catalog.pose(start).unwrap())
    }

    fn names(session: &Session) -> Vec<String> {
        session.elements().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exact_match_returns_path() {
        let catalog = CatalogBuilder::new()
            .pose("A", 30)
            .pose("B", 30)
            .transition("A", "B", 10)
            .build()
            .unwrap();

        let session = search_from(&catalog, "A", 70, CacheMode::Disabled);
        assert_eq!(names(&session), vec!["A (30s)", "A -> B (10s)", "B (30s)"]);
        assert_eq!(session.length(), 70);
    }

    #[test]
    fn single_pose_is_exact_match() {
        let catalog = CatalogBuilder::new().pose("A", 30).build().unwrap();
        let session = search_from(&catalog, "A", 30, CacheMode::Disabled);
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn first_pose_overshoot_returns_single_pose() {
        let catalog = CatalogBuilder::new().pose("A", 50).build().unwrap();
        let session = search_from(&catalog, "A", 30, CacheMode::Disabled);
        assert_eq!(names(&session), vec!["A (50s)"]);
        assert_eq!(session.distance(30), 20);
    }

    #[test]
    fn overshoot_truncates_when_previous_is_closer() {
        // A alone: 40 (10 short). A + t + B: 100 (50 over).
        let catalog = CatalogBuilder::new()
            .pose("A", 40)
            .pose("B", 55)
            .transition("A", "B", 5)
            .build()
            .unwrap();

        let session = search_from(&catalog, "A", 50, CacheMode::Disabled);
        assert_eq!(names(&session), vec!["A (40s)"]);
    }

    #[test]
    fn overshoot_keeps_path_when_closer_or_equal() {
        // A alone: 40 (10 short). A + t + B: 60 (10 over); tie keeps the overshoot.
        let catalog = CatalogBuilder::new()
            .pose("A", 40)
            .pose("B", 15)
            .transition("A", "B", 5)
            .build()
            .unwrap();

        let session = search_from(&catalog, "A", 50, CacheMode::Disabled);
        assert_eq!(session.length(), 60);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn dead_end_undershoot_returns_empty() {
        let catalog = CatalogBuilder::new().pose("A", 20).build().unwrap();
        let session = search_from(&catalog, "A", 30, CacheMode::Disabled);
        assert!(session.is_empty());
    }

    #[test]
    fn strictly_closer_candidate_wins() {
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .pose("B", 10)
            .pose("C", 15)
            .transition("A", "B", 0)
            .transition("A", "C", 0)
            .build()
            .unwrap();

        // A+B = 20 (6 short, dead end -> empty), A+C = 25 (1 short, dead end -> empty)
        // both dead ends undershoot, so nothing beats the empty baseline.
        assert!(search_from(&catalog, "A", 26, CacheMode::Disabled).is_empty());

        // A+B = 20 (2 over, A alone 10 is 10 short -> keep), A+C = 25 (7 over -> keep)
        let session = search_from(&catalog, "A", 18, CacheMode::Disabled);
        assert_eq!(session.length(), 20);
    }

    #[test]
    fn ties_keep_first_candidate() {
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .pose("B", 12)
            .pose("C", 12)
            .transition("A", "B", 0)
            .transition("A", "C", 0)
            .build()
            .unwrap();

        // A+B and A+C both overshoot by 2; the first one explored is kept.
        let session = search_from(&catalog, "A", 20, CacheMode::Disabled);
        assert_eq!(session.last_pose().map(Pose::name), Some("B"));
    }

    #[test]
    fn parallel_edges_are_all_explored() {
        let catalog = CatalogBuilder::new()
            .pose("A", 30)
            .pose("B", 30)
            .transition("A", "B", 5)
            .transition("A", "B", 10)
            .build()
            .unwrap();

        let session = search_from(&catalog, "A", 70, CacheMode::Disabled);
        assert_eq!(session.length(), 70);
        assert_eq!(names(&session)[1], "A -> B (10s)");
    }

    #[test]
    fn cycles_terminate_through_overshoot() {
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .transition("A", "A", 0)
            .build()
            .unwrap();

        let session = search_from(&catalog, "A", 35, CacheMode::Disabled);
        // 30 is 5 short, 40 is 5 over: the overshoot is kept on a tie.
        assert_eq!(session.length(), 40);
        assert!(session.is_well_formed());
    }

    #[test]
    fn depth_bound_cuts_off_and_reports() {
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .transition("A", "A", 0)
            .build()
            .unwrap();
        let start = catalog.pose("A").unwrap().clone();

        let mut memo = MemoTable::new(CacheMode::Disabled);
        let mut search = SessionSearch::new(&catalog, 100, &mut memo).with_max_depth(Some(3));
        let session = search.best_continuation(&start);

        assert!(session.is_empty());
        assert!(search.is_exhausted());
        assert_eq!(search.stats().depth_cutoffs, 1);
        assert_eq!(search.stats().nodes_visited, 3);
    }

    #[test]
    fn depth_bound_does_not_affect_short_searches() {
        let catalog = CatalogBuilder::new()
            .pose("A", 30)
            .pose("B", 30)
            .transition("A", "B", 10)
            .build()
            .unwrap();
        let start = catalog.pose("A").unwrap().clone();

        let mut memo = MemoTable::new(CacheMode::Disabled);
        let mut search = SessionSearch::new(&catalog, 70, &mut memo).with_max_depth(Some(2));
        assert_eq!(search.best_continuation(&start).length(), 70);
        assert!(!search.is_exhausted());
    }

    #[test]
    fn cached_states_respect_depth_bound() {
        // From A, Q is reached with two poses; from B it takes three.
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .pose("B", 4)
            .pose("C", 6)
            .pose("Q", 20)
            .pose("W", 75)
            .transition("A", "Q", 0)
            .transition("B", "C", 0)
            .transition("C", "Q", 0)
            .transition("Q", "W", 0)
            .build()
            .unwrap();
        let a = catalog.pose("A").unwrap().clone();
        let b = catalog.pose("B").unwrap().clone();

        let run = |mode: CacheMode| {
            let mut memo = MemoTable::new(mode);
            let mut search =
                SessionSearch::new(&catalog, 100, &mut memo).with_max_depth(Some(3));
            let from_a = search.best_continuation(&a);
            let from_b = search.best_continuation(&b);
            (from_a, from_b, search.is_exhausted())
        };

        let plain = run(CacheMode::Disabled);
        let cached = run(CacheMode::Continuation);

        assert_eq!(plain, cached);
        assert_eq!(cached.0.length(), 105);
        assert!(cached.1.is_empty());
        assert!(cached.2);
    }

    #[test]
    fn memo_records_resolved_states() {
        let catalog = CatalogBuilder::new()
            .pose("A", 10)
            .pose("B", 10)
            .transition("A", "B", 0)
            .transition("B", "A", 0)
            .build()
            .unwrap();
        let start = catalog.pose("A").unwrap().clone();

        let mut memo = MemoTable::new(CacheMode::Continuation);
        let mut search = SessionSearch::new(&catalog, 45, &mut memo);
        let session = search.best_continuation(&start);

        assert_eq!(session.length(), 50);
        assert!(!memo.is_empty());
    }

    #[test]
    fn memoized_search_matches_plain_search() {
        let catalog = CatalogBuilder::new()
            .pose("A", 7)
            .pose("B", 11)
            .pose("C", 13)
            .transition("A", "B", 2)
            .transition("A", "C", 3)
            .transition("B", "C", 1)
            .transition("C", "A", 4)
            .transition("B", "A", 2)
            .build()
            .unwrap();

        for target in [20, 37, 58, 91] {
            let plain = search_from(&catalog, "A", target, CacheMode::Disabled);
            let cached = search_from(&catalog, "A", target, CacheMode::Continuation);
            assert_eq!(plain, cached, "target {target}");
        }
    }
}
