//! Session Designer: timed pose sequences that fit a target duration
//!
//! Given a catalog of poses (each held for a fixed number of seconds) and
//! directed transitions between them, the designer searches for the
//! alternating pose/transition sequence whose total duration comes closest
//! to a requested target.
//!
//! The search is a pure core: catalogs are read-only, sessions are
//! immutable values, and every best-so-far accumulator is local to the call
//! that owns it. Loading files, parsing arguments and printing results live
//! at the edges.
//!
//! # Core Concepts
//!
//! - **Pose / Transition**: the catalog's timed building blocks
//! - **Session**: an alternating sequence starting and ending with a pose
//! - **Search**: greedy depth-first exploration with optional memoization
//!
//! # Example
//!
//! ```rust
//! use session_designer::catalog::CatalogBuilder;
//! use session_designer::config::SearchConfig;
//! use session_designer::search::find_best_session;
//!
//! let catalog = CatalogBuilder::new()
//!     .pose("Mountain", 30)
//!     .pose("Tree", 30)
//!     .transition("Mountain", "Tree", 10)
//!     .build()
//!     .unwrap();
//!
//! let report = find_best_session(&catalog, 70, &SearchConfig::new().memoized());
//! assert_eq!(report.achieved(), 70);
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod present;
pub mod search;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogBuilder};
pub use config::SearchConfig;
pub use self::core::{Pose, Session, SessionElement, Transition};
pub use search::{find_best_session, SearchReport};
