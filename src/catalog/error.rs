//! Catalog validation and loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating a catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogViolation {
    #[error("Pose '{name}' is defined more than once")]
    DuplicatePose { name: String },

    #[error("Pose '{name}' has zero duration; poses must last at least one second")]
    ZeroDurationPose { name: String },

    #[error("Transition '{from}' -> '{to}' references unknown pose '{missing}'")]
    UnknownPose {
        from: String,
        to: String,
        missing: String,
    },
}

/// Every violation found in a catalog, in the order they were detected.
#[derive(Debug, Error)]
#[error("Catalog failed validation: {}", list(.violations))]
pub struct CatalogError {
    pub violations: Vec<CatalogViolation>,
}

fn list(violations: &[CatalogViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while reading catalogs or configuration from disk
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape
    #[error("Could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The records parsed but do not form a valid catalog
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}
