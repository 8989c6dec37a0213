pub mod config;
pub mod credentials;
mod error;

pub use config::{merge, ConfigError, ExtensionContainer, PlayExtension, ResolvedConfig, Variant};
pub use credentials::{
    credential_stream, credential_stream_from_env, variant_credentials, CredentialsError,
};
pub use error::Error;
