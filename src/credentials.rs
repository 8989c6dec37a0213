//! Service account credential lookup for a resolved configuration.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::config::{ExtensionContainer, ResolvedConfig, Variant};
use crate::Error;

/// Environment variable holding raw service account credentials.
pub const CREDENTIAL_ENV_VAR: &str = "ANDROID_PUBLISHER_CREDENTIALS";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("failed to open credentials file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no credentials file configured and ANDROID_PUBLISHER_CREDENTIALS is not set")]
    Missing,
}

/// Opens the credentials for `config`.
///
/// The configured credentials file wins. Without one, the value of
/// [`CREDENTIAL_ENV_VAR`] is read through `env` and returned as raw bytes.
pub fn credential_stream<F>(
    config: &ResolvedConfig,
    env: F,
) -> Result<Box<dyn Read>, CredentialsError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &config.service_account_credentials {
        debug!(path = %path.display(), "reading credentials from file");
        let file = File::open(path).map_err(|e| CredentialsError::Open {
            path: path.clone(),
            source: e,
        })?;
        return Ok(Box::new(file));
    }

    let raw = env(CREDENTIAL_ENV_VAR).ok_or(CredentialsError::Missing)?;
    debug!("reading credentials from {CREDENTIAL_ENV_VAR}");
    Ok(Box::new(Cursor::new(raw.into_bytes())))
}

/// [`credential_stream`] backed by the process environment.
pub fn credential_stream_from_env(
    config: &ResolvedConfig,
) -> Result<Box<dyn Read>, CredentialsError> {
    credential_stream(config, |key| std::env::var(key).ok())
}

/// Resolves `variant` from `container` and opens its credentials.
pub fn variant_credentials<F>(
    container: &ExtensionContainer,
    variant: &Variant,
    env: F,
) -> Result<Box<dyn Read>, Error>
where
    F: Fn(&str) -> Option<String>,
{
    let config = container.resolve(variant)?;
    Ok(credential_stream(&config, env)?)
}
