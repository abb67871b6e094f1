//! Sequence search over a catalog.
//!
//! The search is a greedy depth-first exploration: from each starting pose
//! it follows transitions until a path matches the target exactly, runs out
//! of transitions, or overshoots. It does not guarantee a global optimum.
//!
//! # Key Concepts
//!
//! - **Engine**: [`SessionSearch`] resolves the best session from one start
//! - **Memo table**: [`MemoTable`] caches resolved `(pose, remaining, depth_left)` states
//! - **Driver**: [`find_best_session`] tries every start and keeps the best

mod driver;
mod engine;
mod memo;

pub use driver::{find_best_session, SearchReport};
pub use engine::{SearchStats, SessionSearch};
pub use memo::{CacheMode, MemoTable, SearchKey};
