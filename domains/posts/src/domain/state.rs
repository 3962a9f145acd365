//! Version status lifecycle
//!
//! Three states, deliberately permissive: every new version starts at
//! `Draft`, and `set_status` may move a version between any two states —
//! including `Archived` back to `Published`. The single automatic rule
//! lives in the versioning service: when a version becomes `Published`,
//! every other `Published` version of the same post is demoted to
//! `Archived`, so at most one version per post is ever live.

use serde::{Deserialize, Serialize};

/// Status of a post version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl VersionStatus {
    /// All status values, in lifecycle order
    pub const ALL: [VersionStatus; 3] = [
        VersionStatus::Draft,
        VersionStatus::Published,
        VersionStatus::Archived,
    ];
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::Draft => write!(f, "draft"),
            VersionStatus::Published => write!(f, "published"),
            VersionStatus::Archived => write!(f, "archived"),
        }
    }
}
