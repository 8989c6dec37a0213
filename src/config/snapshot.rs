//! Immutable view of a resolved configuration block.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::extension::{
    PlayExtension, ReleaseStatus, ResolutionStrategy, DEFAULT_COMMIT, DEFAULT_ENABLED,
    DEFAULT_RESOLUTION_STRATEGY, DEFAULT_TO_APP_BUNDLES, DEFAULT_TRACK,
};

/// Flattened publishing configuration handed to the rest of the pipeline.
///
/// Optional fields are `None` when neither the block nor any ancestor set
/// them and no default exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub enabled: bool,
    pub service_account_credentials: Option<PathBuf>,
    pub default_to_app_bundles: bool,
    pub commit: bool,
    pub from_track: Option<String>,
    pub track: String,
    pub promote_track: Option<String>,
    pub user_fraction: Option<f64>,
    pub update_priority: Option<i32>,
    pub release_status: Option<ReleaseStatus>,
    pub release_name: Option<String>,
    pub resolution_strategy: ResolutionStrategy,
    pub retain_artifacts: Option<Vec<i64>>,
    pub retain_main_obb: Option<i32>,
    pub retain_patch_obb: Option<i32>,
}

impl PlayExtension {
    /// Copies every option into a [`ResolvedConfig`].
    ///
    /// Options with a documented default read that default when unset. After a
    /// multi-block [`merge`](crate::config::merge) they are always set; only a
    /// single-block chain, which `merge` returns unchanged, reaches these
    /// defaults here. Both paths use the same `DEFAULT_*` constants.
    pub fn to_config(&self) -> ResolvedConfig {
        ResolvedConfig {
            enabled: self.enabled.get().copied().unwrap_or(DEFAULT_ENABLED),
            service_account_credentials: self.service_account_credentials.get().cloned(),
            default_to_app_bundles: self
                .default_to_app_bundles
                .get()
                .copied()
                .unwrap_or(DEFAULT_TO_APP_BUNDLES),
            commit: self.commit.get().copied().unwrap_or(DEFAULT_COMMIT),
            from_track: self.from_track.get().cloned(),
            track: self
                .track
                .get()
                .cloned()
                .unwrap_or_else(|| DEFAULT_TRACK.to_string()),
            promote_track: self.promote_track.get().cloned(),
            user_fraction: self.user_fraction.get().copied(),
            update_priority: self.update_priority.get().copied(),
            release_status: self.release_status.get().copied(),
            release_name: self.release_name.get().cloned(),
            resolution_strategy: self
                .resolution_strategy
                .get()
                .copied()
                .unwrap_or(DEFAULT_RESOLUTION_STRATEGY),
            retain_artifacts: self.retain.artifacts.get().cloned(),
            retain_main_obb: self.retain.main_obb.get().copied(),
            retain_patch_obb: self.retain.patch_obb.get().copied(),
        }
    }
}
