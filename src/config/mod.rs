//! Publisher configuration blocks and their inheritance.

mod cell;
mod container;
mod error;
mod extension;
mod file;
mod merge;
mod option;
mod snapshot;

pub use cell::Cell;
pub use container::{ExtensionContainer, Variant, ROOT_NAME};
pub use error::ConfigError;
pub use extension::{
    ParseEnumError, PlayExtension, ReleaseStatus, ResolutionStrategy, Retain, DEFAULT_COMMIT,
    DEFAULT_ENABLED, DEFAULT_RESOLUTION_STRATEGY, DEFAULT_TO_APP_BUNDLES, DEFAULT_TRACK,
};
pub use file::{parse_container, FileSource};
pub use merge::merge;
pub use option::{
    link_collection, link_options, link_scalar, mergeable_names, LinkFn, Mergeable, OptionKind,
    OptionSet, OptionSpec, Storage,
};
pub use snapshot::ResolvedConfig;
