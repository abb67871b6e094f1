//! Poses: the atomic timed activities a session is built from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An atomic timed activity with a fixed duration.
///
/// Poses are identified by name: two poses with the same name are the same
/// pose regardless of duration. The name is reference counted so that paths
/// can carry poses around without reallocating strings on every branch.
///
/// # Example
///
/// ```rust
/// use session_designer::core::Pose;
///
/// let mountain = Pose::new("Mountain", 30);
/// assert_eq!(mountain.name(), "Mountain");
/// assert_eq!(mountain.duration_seconds(), 30);
/// assert_eq!(mountain.to_string(), "Mountain (30s)");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pose {
    name: Arc<str>,
    duration_seconds: u32,
}

impl Pose {
    /// Create a pose.
    pub fn new(name: impl Into<Arc<str>>, duration_seconds: u32) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
        }
    }

    /// The pose's identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How long the pose is held.
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Pose {}

impl Hash for Pose {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name, self.duration_seconds)
    }
}
