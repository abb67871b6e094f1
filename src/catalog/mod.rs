//! Pose and transition catalogs.
//!
//! A catalog is the read-only input to a search: every pose that may
//! appear in a session and every transition that may link two of them.
//! Catalogs are built once (through [`CatalogBuilder`] or the JSON
//! [`loader`]) and then shared by reference for the rest of a run.

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::CatalogBuilder;
pub use error::{CatalogError, CatalogViolation, LoadError};
pub use loader::load_catalog;

use crate::core::{Pose, Transition};
use std::collections::HashMap;

/// Immutable collection of poses and transitions, in catalog order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    poses: Vec<Pose>,
    transitions: Vec<Transition>,
    outgoing: HashMap<Pose, Vec<usize>>,
}

impl Catalog {
    pub(crate) fn new(poses: Vec<Pose>, transitions: Vec<Transition>) -> Self {
        let mut outgoing: HashMap<Pose, Vec<usize>> = HashMap::new();
        for (index, transition) in transitions.iter().enumerate() {
            outgoing
                .entry(transition.from.clone())
                .or_default()
                .push(index);
        }

        Self {
            poses,
            transitions,
            outgoing,
        }
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Look up a pose by name.
    pub fn pose(&self, name: &str) -> Option<&Pose> {
        self.poses.iter().find(|p| p.name() == name)
    }

    /// Transitions leaving `pose`, in catalog order.
    pub fn outgoing<'a>(&'a self, pose: &Pose) -> impl Iterator<Item = &'a Transition> + 'a {
        self.outgoing
            .get(pose)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&index| &self.transitions[index])
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}
