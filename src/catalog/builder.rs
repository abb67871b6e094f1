//! Builder for constructing validated catalogs.

use crate::catalog::error::{CatalogError, CatalogViolation};
use crate::catalog::Catalog;
use crate::core::{Pose, Transition};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing catalogs with a fluent API.
///
/// Transitions name their endpoints; the names are resolved against the
/// declared poses when the catalog is built. Validation collects every
/// problem in the catalog instead of stopping at the first one.
///
/// # Example
///
/// ```rust
/// use session_designer::catalog::CatalogBuilder;
///
/// let catalog = CatalogBuilder::new()
///     .pose("Mountain", 30)
///     .pose("Tree", 30)
///     .transition("Mountain", "Tree", 10)
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.poses().len(), 2);
/// assert_eq!(catalog.transitions().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    poses: Vec<(String, u32)>,
    transitions: Vec<(String, String, u32)>,
}

impl CatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a pose.
    pub fn pose(mut self, name: impl Into<String>, duration_seconds: u32) -> Self {
        self.poses.push((name.into(), duration_seconds));
        self
    }

    /// Declare a transition between two named poses.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        duration_seconds: u32,
    ) -> Self {
        self.transitions
            .push((from.into(), to.into(), duration_seconds));
        self
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<CatalogViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<CatalogViolation>>> = Vec::new();
        let mut seen = HashSet::new();

        for (name, duration) in &self.poses {
            if !seen.insert(name.as_str()) {
                checks.push(Validation::fail(CatalogViolation::DuplicatePose {
                    name: name.clone(),
                }));
            }
            if *duration == 0 {
                checks.push(Validation::fail(CatalogViolation::ZeroDurationPose {
                    name: name.clone(),
                }));
            }
        }

        for (from, to, _) in &self.transitions {
            for end in [from, to] {
                if !seen.contains(end.as_str()) {
                    checks.push(Validation::fail(CatalogViolation::UnknownPose {
                        from: from.clone(),
                        to: to.clone(),
                        missing: end.clone(),
                    }));
                }
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the catalog.
    /// Returns an error listing every violation if validation fails.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if let Validation::Failure(violations) = self.validate() {
            return Err(CatalogError {
                violations: violations.iter().cloned().collect(),
            });
        }

        let poses: Vec<Pose> = self
            .poses
            .into_iter()
            .map(|(name, duration)| Pose::new(name, duration))
            .collect();
        let by_name: HashMap<&str, &Pose> = poses.iter().map(|p| (p.name(), p)).collect();

        let mut transitions = Vec::with_capacity(self.transitions.len());
        for (from, to, duration) in &self.transitions {
            // validate() has already rejected unknown endpoints
            if let (Some(from), Some(to)) = (by_name.get(from.as_str()), by_name.get(to.as_str()))
            {
                transitions.push(Transition::new((*from).clone(), (*to).clone(), *duration));
            }
        }

        Ok(Catalog::new(poses, transitions))
    }
}
