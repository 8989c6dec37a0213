//! Publisher configuration blocks.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::option::{
    collection_option, link_options, scalar_option, Mergeable, OptionSet, OptionSpec,
};

pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_TO_APP_BUNDLES: bool = false;
pub const DEFAULT_COMMIT: bool = true;
pub const DEFAULT_TRACK: &str = "internal";
pub const DEFAULT_RESOLUTION_STRATEGY: ResolutionStrategy = ResolutionStrategy::Fail;

/// Status a release is created with on its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseStatus {
    Completed,
    Draft,
    Halted,
    InProgress,
}

impl ReleaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStatus::Completed => "completed",
            ReleaseStatus::Draft => "draft",
            ReleaseStatus::Halted => "halted",
            ReleaseStatus::InProgress => "inProgress",
        }
    }
}

/// What to do when an uploaded version code already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStrategy {
    Auto,
    Fail,
    Ignore,
}

impl ResolutionStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionStrategy::Auto => "auto",
            ResolutionStrategy::Fail => "fail",
            ResolutionStrategy::Ignore => "ignore",
        }
    }
}

/// Error returned when parsing an unknown enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl FromStr for ReleaseStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ReleaseStatus::Completed,
            ReleaseStatus::Draft,
            ReleaseStatus::Halted,
            ReleaseStatus::InProgress,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseEnumError {
            kind: "release status",
            value: s.to_string(),
        })
    }
}

impl FromStr for ResolutionStrategy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ResolutionStrategy::Auto,
            ResolutionStrategy::Fail,
            ResolutionStrategy::Ignore,
        ]
        .into_iter()
        .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseEnumError {
            kind: "resolution strategy",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which previously uploaded artifacts a release keeps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Retain {
    pub artifacts: Cell<Vec<i64>>,
    pub main_obb: Cell<i32>,
    pub patch_obb: Cell<i32>,
}

static RETAIN_OPTIONS: &[OptionSpec<Retain>] = &[
    collection_option!(Retain, artifacts),
    scalar_option!(Retain, main_obb),
    scalar_option!(Retain, patch_obb),
];

impl OptionSet for Retain {
    fn options() -> &'static [OptionSpec<Self>] {
        RETAIN_OPTIONS
    }
}

/// One publishing configuration block: the root block or a per-variant
/// override.
///
/// Every option starts out unset. `name` identifies the block and is never
/// inherited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayExtension {
    pub name: String,
    pub enabled: Cell<bool>,
    pub service_account_credentials: Cell<PathBuf>,
    pub default_to_app_bundles: Cell<bool>,
    pub commit: Cell<bool>,
    pub from_track: Cell<String>,
    pub track: Cell<String>,
    pub promote_track: Cell<String>,
    pub user_fraction: Cell<f64>,
    pub update_priority: Cell<i32>,
    pub release_status: Cell<ReleaseStatus>,
    pub release_name: Cell<String>,
    pub resolution_strategy: Cell<ResolutionStrategy>,
    pub retain: Retain,
}

impl PlayExtension {
    /// Creates a block named `name` with every option unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

static PLAY_OPTIONS: &[OptionSpec<PlayExtension>] = &[
    scalar_option!(PlayExtension, enabled),
    scalar_option!(PlayExtension, service_account_credentials),
    scalar_option!(PlayExtension, default_to_app_bundles),
    scalar_option!(PlayExtension, commit),
    scalar_option!(PlayExtension, from_track),
    scalar_option!(PlayExtension, track),
    scalar_option!(PlayExtension, promote_track),
    scalar_option!(PlayExtension, user_fraction),
    scalar_option!(PlayExtension, update_priority),
    scalar_option!(PlayExtension, release_status),
    scalar_option!(PlayExtension, release_name),
    scalar_option!(PlayExtension, resolution_strategy),
];

impl OptionSet for PlayExtension {
    fn options() -> &'static [OptionSpec<Self>] {
        PLAY_OPTIONS
    }

    fn link_nested(parent: &Self, child: &Self, child_copy: &mut Self) {
        link_options(&parent.retain, &child.retain, &mut child_copy.retain);
    }
}

impl Mergeable for PlayExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn uninitialized_copy(&self) -> Self {
        Self::new(self.name.clone())
    }

    fn conventions(name: &str) -> Self {
        Self {
            enabled: Cell::Set(DEFAULT_ENABLED),
            default_to_app_bundles: Cell::Set(DEFAULT_TO_APP_BUNDLES),
            commit: Cell::Set(DEFAULT_COMMIT),
            track: Cell::Set(DEFAULT_TRACK.to_string()),
            resolution_strategy: Cell::Set(DEFAULT_RESOLUTION_STRATEGY),
            ..Self::new(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::option::{mergeable_names, OptionKind};

    #[test]
    fn test_name_is_not_mergeable() {
        let names = mergeable_names::<PlayExtension>();
        assert!(!names.contains(&"name"));
        assert!(!names.contains(&"retain"));
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "enabled");
    }

    #[test]
    fn test_retain_options() {
        let kinds: Vec<_> = Retain::options().iter().map(|o| (o.name, o.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("artifacts", OptionKind::Collection),
                ("main_obb", OptionKind::Scalar),
                ("patch_obb", OptionKind::Scalar),
            ]
        );
    }

    #[test]
    fn test_uninitialized_copy_keeps_only_name() {
        let mut ext = PlayExtension::new("release");
        ext.track.set("beta".into());
        ext.retain.artifacts.set(vec![1]);

        let copy = ext.uninitialized_copy();
        assert_eq!(copy, PlayExtension::new("release"));
    }

    #[test]
    fn test_conventions() {
        let ext = PlayExtension::conventions("play");
        assert_eq!(ext.name, "play");
        assert_eq!(ext.track.get().map(String::as_str), Some("internal"));
        assert_eq!(ext.resolution_strategy, Cell::Set(ResolutionStrategy::Fail));
        assert_eq!(ext.update_priority, Cell::Unset);
        assert_eq!(ext.retain, Retain::default());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("inProgress".parse::<ReleaseStatus>(), Ok(ReleaseStatus::InProgress));
        assert_eq!("COMPLETED".parse::<ReleaseStatus>(), Ok(ReleaseStatus::Completed));
        assert_eq!("auto".parse::<ResolutionStrategy>(), Ok(ResolutionStrategy::Auto));
        assert!("sometimes".parse::<ResolutionStrategy>().is_err());
    }
}
