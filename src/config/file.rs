//! TOML source for configuration blocks.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::Deserialize;
use tracing::debug;

use super::container::{ExtensionContainer, ROOT_NAME};
use super::extension::{PlayExtension, ReleaseStatus, ResolutionStrategy, Retain};
use super::ConfigError;

/// Loads the root block and its named overrides from a TOML file.
///
/// ```toml
/// [play]
/// track = "production"
///
/// [play.retain]
/// artifacts = [1, 2]
///
/// [play.variants.release]
/// track = "beta"
/// ```
///
/// Keys that are absent stay unset. An explicitly empty array is kept as an
/// explicit empty value.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist yield an empty container.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    /// Loads the root block and every override block from the file.
    pub fn load(&self) -> Result<ExtensionContainer, ConfigError> {
        let contents = match read_config_file(&self.path, self.required)? {
            Some(contents) => contents,
            None => {
                debug!(path = %self.path.display(), "optional config file missing");
                return Ok(ExtensionContainer::default());
            }
        };

        let container = parse_container(&contents).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(
            path = %self.path.display(),
            overrides = container.names().count(),
            "loaded configuration blocks"
        );
        Ok(container)
    }
}

/// Parses a container from TOML text.
pub fn parse_container(contents: &str) -> Result<ExtensionContainer, toml::de::Error> {
    let file: RawFile = toml::from_str(contents)?;
    let mut root = file.play;
    let variants = std::mem::take(&mut root.variants);

    let mut container = ExtensionContainer::new(root.into_extension(ROOT_NAME));
    for (name, block) in variants {
        if !block.variants.is_empty() {
            return Err(toml::de::Error::custom(format!(
                "override block '{name}' cannot declare nested variants"
            )));
        }
        container.insert(block.into_extension(&name));
    }
    Ok(container)
}

/// Reads a config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn read_config_file(path: &Path, required: bool) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    #[serde(default)]
    play: RawBlock,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    enabled: Option<bool>,
    #[serde(alias = "serviceAccountCredentials")]
    service_account_credentials: Option<PathBuf>,
    #[serde(alias = "defaultToAppBundles")]
    default_to_app_bundles: Option<bool>,
    commit: Option<bool>,
    #[serde(alias = "fromTrack")]
    from_track: Option<String>,
    track: Option<String>,
    #[serde(alias = "promoteTrack")]
    promote_track: Option<String>,
    #[serde(alias = "userFraction")]
    user_fraction: Option<f64>,
    #[serde(alias = "updatePriority")]
    update_priority: Option<i32>,
    #[serde(alias = "releaseStatus")]
    release_status: Option<ReleaseStatus>,
    #[serde(alias = "releaseName")]
    release_name: Option<String>,
    #[serde(alias = "resolutionStrategy")]
    resolution_strategy: Option<ResolutionStrategy>,
    #[serde(default)]
    retain: RawRetain,
    /// Only meaningful on the root block.
    #[serde(default)]
    variants: BTreeMap<String, RawBlock>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRetain {
    artifacts: Option<Vec<i64>>,
    #[serde(alias = "mainObb")]
    main_obb: Option<i32>,
    #[serde(alias = "patchObb")]
    patch_obb: Option<i32>,
}

impl RawBlock {
    fn into_extension(self, name: &str) -> PlayExtension {
        PlayExtension {
            name: name.to_string(),
            enabled: self.enabled.into(),
            service_account_credentials: self.service_account_credentials.into(),
            default_to_app_bundles: self.default_to_app_bundles.into(),
            commit: self.commit.into(),
            from_track: self.from_track.into(),
            track: self.track.into(),
            promote_track: self.promote_track.into(),
            user_fraction: self.user_fraction.into(),
            update_priority: self.update_priority.into(),
            release_status: self.release_status.into(),
            release_name: self.release_name.into(),
            resolution_strategy: self.resolution_strategy.into(),
            retain: Retain {
                artifacts: self.retain.artifacts.into(),
                main_obb: self.retain.main_obb.into(),
                patch_obb: self.retain.patch_obb.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cell::Cell;
    use crate::config::container::Variant;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_loads_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [play]
            track = "production"
            service_account_credentials = "keys/play.json"

            [play.retain]
            artifacts = [1, 2]

            [play.variants.release]
            track = "beta"
            release_status = "inProgress"
            user_fraction = 0.25

            [play.variants.release.retain]
            artifacts = []
            "#
        )
        .unwrap();

        let container = FileSource::new(file.path(), true).load().unwrap();

        let root = container.root();
        assert_eq!(root.name, "play");
        assert_eq!(root.track, Cell::Set("production".to_string()));
        assert_eq!(root.retain.artifacts, Cell::Set(vec![1, 2]));
        assert_eq!(root.commit, Cell::Unset);

        let release = container.get("release").unwrap();
        assert_eq!(release.release_status, Cell::Set(ReleaseStatus::InProgress));
        assert_eq!(release.retain.artifacts, Cell::Set(vec![]));
        assert_eq!(release.service_account_credentials, Cell::Unset);

        let config = container.resolve(&Variant::new("release", "release")).unwrap();
        assert_eq!(config.track, "beta");
        assert_eq!(config.retain_artifacts, Some(vec![]));
        assert_eq!(
            config.service_account_credentials,
            Some(PathBuf::from("keys/play.json"))
        );
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/play.toml", true);
        let result = source.load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/play.toml", false);
        let container = source.load().unwrap();

        assert_eq!(container, ExtensionContainer::default());
    }

    #[test]
    fn test_file_source_rejects_bad_types() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[play]\nuser_fraction = \"half\"").unwrap();

        let result = FileSource::new(file.path(), true).load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_file_source_rejects_misspelled_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[play]\ntrak = \"beta\"").unwrap();

        let result = FileSource::new(file.path(), true).load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_parse_rejects_misspelled_variant_keys() {
        let result = parse_container("[play.variants.release]\nretian = { artifacts = [] }");
        assert!(result.is_err());

        let result = parse_container("[play.retain]\nartifact = [1]");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_accepts_camel_case_keys() {
        let container = parse_container(
            "[play]\ndefaultToAppBundles = true\n\
             [play.variants.release]\nuserFraction = 0.5\nreleaseStatus = \"halted\"\n\
             [play.variants.release.retain]\nmainObb = 4",
        )
        .unwrap();

        assert_eq!(container.root().default_to_app_bundles, Cell::Set(true));
        let release = container.get("release").unwrap();
        assert_eq!(release.user_fraction, Cell::Set(0.5));
        assert_eq!(release.release_status, Cell::Set(ReleaseStatus::Halted));
        assert_eq!(release.retain.main_obb, Cell::Set(4));
    }

    #[test]
    fn test_parse_rejects_nested_variants() {
        let result = parse_container("[play.variants.paid.variants.release]\ntrack = \"beta\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_document() {
        let container = parse_container("").unwrap();
        assert_eq!(container, ExtensionContainer::default());
    }

    #[test]
    fn test_parse_unknown_release_status() {
        let result = parse_container("[play]\nrelease_status = \"someday\"");
        assert!(result.is_err());
    }
}
