//! JSON catalog loading.
//!
//! Poses and transitions live in two separate files, each a JSON array:
//!
//! ```json
//! [{ "name": "Mountain", "duration": 30 }, { "name": "Tree", "duration": 45 }]
//! ```
//!
//! ```json
//! [{ "from": "Mountain", "to": "Tree", "duration": 10 }]
//! ```
//!
//! `durationInSeconds` is accepted in place of `duration`.

use crate::catalog::error::LoadError;
use crate::catalog::{Catalog, CatalogBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk shape of a pose.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub name: String,
    #[serde(alias = "durationInSeconds")]
    pub duration: u32,
}

/// On-disk shape of a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    #[serde(alias = "durationInSeconds")]
    pub duration: u32,
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Assemble a catalog from already-parsed records.
pub fn catalog_from_records(
    poses: Vec<PoseRecord>,
    transitions: Vec<TransitionRecord>,
) -> Result<Catalog, LoadError> {
    let builder = poses
        .into_iter()
        .fold(CatalogBuilder::new(), |builder, record| {
            builder.pose(record.name, record.duration)
        });
    let builder = transitions.into_iter().fold(builder, |builder, record| {
        builder.transition(record.from, record.to, record.duration)
    });

    Ok(builder.build()?)
}

/// Load the pose and transition files into a validated catalog.
///
/// Nothing is returned unless both files parse and the combined catalog
/// validates, so a search never runs against a partial catalog.
pub fn load_catalog(poses_path: &Path, transitions_path: &Path) -> Result<Catalog, LoadError> {
    let poses: Vec<PoseRecord> = read_json(poses_path)?;
    let transitions: Vec<TransitionRecord> = read_json(transitions_path)?;
    debug!(
        poses = poses.len(),
        transitions = transitions.len(),
        "Parsed catalog files"
    );
    catalog_from_records(poses, transitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_record_accepts_duration_alias() {
        let record: PoseRecord =
            serde_json::from_str(r#"{"name": "Tree", "durationInSeconds": 45}"#).unwrap();
        assert_eq!(record.duration, 45);
    }

    #[test]
    fn records_build_catalog() {
        let poses = vec![
            PoseRecord {
                name: "A".to_string(),
                duration: 30,
            },
            PoseRecord {
                name: "B".to_string(),
                duration: 30,
            },
        ];
        let transitions = vec![TransitionRecord {
            from: "A".to_string(),
            to: "B".to_string(),
            duration: 10,
        }];

        let catalog = catalog_from_records(poses, transitions).unwrap();
        assert_eq!(catalog.poses().len(), 2);
        assert_eq!(catalog.transitions()[0].duration_seconds, 10);
    }

    #[test]
    fn invalid_records_are_rejected() {
        let transitions = vec![TransitionRecord {
            from: "A".to_string(),
            to: "B".to_string(),
            duration: 10,
        }];

        let result = catalog_from_records(Vec::new(), transitions);
        assert!(matches!(result, Err(LoadError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result: Result<Vec<PoseRecord>, _> =
            read_json(Path::new("/definitely/not/here/poses.json"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
