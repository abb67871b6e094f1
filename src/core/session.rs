//! Sessions: alternating sequences of poses and transitions.

use super::pose::Pose;
use super::score;
use super::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionElement {
    Pose(Pose),
    Transition(Transition),
}

impl SessionElement {
    pub fn duration_seconds(&self) -> u32 {
        match self {
            Self::Pose(pose) => pose.duration_seconds(),
            Self::Transition(transition) => transition.duration_seconds,
        }
    }

    pub fn is_pose(&self) -> bool {
        matches!(self, Self::Pose(_))
    }

    pub fn as_pose(&self) -> Option<&Pose> {
        match self {
            Self::Pose(pose) => Some(pose),
            Self::Transition(_) => None,
        }
    }
}

impl From<Pose> for SessionElement {
    fn from(pose: Pose) -> Self {
        Self::Pose(pose)
    }
}

impl From<Transition> for SessionElement {
    fn from(transition: Transition) -> Self {
        Self::Transition(transition)
    }
}

impl fmt::Display for SessionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pose(pose) => write!(f, "{pose}"),
            Self::Transition(transition) => write!(f, "{transition}"),
        }
    }
}

/// Ordered sequence of poses and transitions.
///
/// Sessions are immutable during search - `extended` and `truncated` return
/// new sessions and leave the receiver untouched, so sibling branches of the
/// search never observe each other's paths.
///
/// # Example
///
/// ```rust
/// use session_designer::core::{Pose, Session, Transition};
///
/// let a = Pose::new("A", 30);
/// let b = Pose::new("B", 30);
///
/// let session = Session::new()
///     .extended(a.clone())
///     .extended(Transition::new(a, b.clone(), 10))
///     .extended(b);
///
/// assert_eq!(session.length(), 70);
/// assert_eq!(session.distance(70), 0);
/// assert!(session.is_well_formed());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    elements: Vec<SessionElement>,
}

impl Session {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Append an element, returning a new session.
    ///
    /// This is a pure function - the receiver keeps its elements and the
    /// returned session owns a fresh buffer.
    pub fn extended(&self, element: impl Into<SessionElement>) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(element.into());
        Self { elements }
    }

    /// Drop the last `count` elements, returning a new session.
    pub fn truncated(&self, count: usize) -> Self {
        let keep = self.elements.len().saturating_sub(count);
        Self {
            elements: self.elements[..keep].to_vec(),
        }
    }

    /// Concatenate `suffix` after this session, returning a new session.
    pub fn spliced(&self, suffix: &[SessionElement]) -> Self {
        let mut elements = self.elements.clone();
        elements.extend_from_slice(suffix);
        Self { elements }
    }

    pub fn elements(&self) -> &[SessionElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The most recently appended pose, if the session ends with one.
    pub fn last_pose(&self) -> Option<&Pose> {
        self.elements.last().and_then(SessionElement::as_pose)
    }

    /// Poses in order, skipping transitions.
    pub fn poses(&self) -> impl Iterator<Item = &Pose> {
        self.elements.iter().filter_map(SessionElement::as_pose)
    }

    /// Total duration: the sum of every element's duration.
    ///
    /// Summed in `u64`: a session may hold several `u32::MAX`-long elements.
    pub fn length(&self) -> u64 {
        self.elements
            .iter()
            .map(|element| u64::from(element.duration_seconds()))
            .sum()
    }

    /// Absolute distance of this session's length from `target`.
    pub fn distance(&self, target: u32) -> u64 {
        score::distance(self.length(), target)
    }

    /// Check the alternation invariant.
    ///
    /// A well-formed session is empty, or starts and ends with a pose and
    /// alternates pose, transition, pose. Each transition must also leave the
    /// pose before it and enter the pose after it.
    pub fn is_well_formed(&self) -> bool {
        if self.elements.is_empty() {
            return true;
        }
        if self.elements.len() % 2 == 0 {
            return false;
        }

        self.elements.iter().enumerate().all(|(i, element)| match element {
            SessionElement::Pose(_) => i % 2 == 0,
            SessionElement::Transition(transition) => {
                i % 2 == 1
                    && self.elements[i - 1].as_pose() == Some(&transition.from)
                    && self.elements[i + 1].as_pose() == Some(&transition.to)
            }
        })
    }
}

/// Numbered listing, one element per line, counting from 1.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, element) in self.elements.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, element)?;
        }
        Ok(())
    }
}
