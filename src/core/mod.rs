//! Core session model and match scoring.
//!
//! This module contains the pure value types of a session:
//! - Poses and the transitions linking them
//! - Sessions as alternating pose/transition sequences
//! - Scoring of a session's length against a target duration
//!
//! Nothing in this module performs I/O or holds shared mutable state.

mod pose;
pub mod score;
mod session;
mod transition;

pub use pose::Pose;
pub use session::{Session, SessionElement};
pub use transition::Transition;
