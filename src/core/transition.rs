//! Directed, timed links between poses.

use super::pose::Pose;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed move from one pose to another.
///
/// Transitions are immutable values. Several transitions may connect the
/// same pair of poses with different durations; each is a distinct edge.
///
/// # Example
///
/// ```rust
/// use session_designer::core::{Pose, Transition};
///
/// let mountain = Pose::new("Mountain", 30);
/// let tree = Pose::new("Tree", 30);
/// let step = Transition::new(mountain.clone(), tree, 10);
///
/// assert!(step.leaves(&mountain));
/// assert_eq!(step.to_string(), "Mountain -> Tree (10s)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The pose being left
    pub from: Pose,
    /// The pose being entered
    pub to: Pose,
    /// How long the move takes
    pub duration_seconds: u32,
}

impl Transition {
    pub fn new(from: Pose, to: Pose, duration_seconds: u32) -> Self {
        Self {
            from,
            to,
            duration_seconds,
        }
    }

    /// Check if this transition starts at `pose` (pure)
    pub fn leaves(&self, pose: &Pose) -> bool {
        self.from == *pose
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}s)",
            self.from.name(),
            self.to.name(),
            self.duration_seconds
        )
    }
}
