use crate::config::ConfigError;
use crate::credentials::CredentialsError;
use thiserror::Error;

/// Top-level error type for the play-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("credentials error: {0}")]
    Credentials(#[from] CredentialsError),
}
