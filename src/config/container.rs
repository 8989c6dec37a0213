//! Named override blocks and per-variant chain assembly.

use std::collections::BTreeMap;

use tracing::debug;

use super::extension::PlayExtension;
use super::merge::merge;
use super::snapshot::ResolvedConfig;
use super::ConfigError;

/// Name given to the root block.
pub const ROOT_NAME: &str = "play";

/// A build variant: a build type combined with zero or more product flavors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub build_type: String,
    pub flavors: Vec<String>,
}

impl Variant {
    /// Creates a variant with no product flavors.
    pub fn new(name: impl Into<String>, build_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            build_type: build_type.into(),
            flavors: Vec::new(),
        }
    }

    /// Appends a product flavor. Earlier flavors take precedence.
    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavors.push(flavor.into());
        self
    }
}

/// The root block plus every named override block.
///
/// Override blocks are looked up by variant, flavor, or build-type name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionContainer {
    root: PlayExtension,
    named: BTreeMap<String, PlayExtension>,
}

impl Default for ExtensionContainer {
    fn default() -> Self {
        Self::new(PlayExtension::new(ROOT_NAME))
    }
}

impl ExtensionContainer {
    /// Creates a container with `root` and no override blocks.
    pub fn new(root: PlayExtension) -> Self {
        Self {
            root,
            named: BTreeMap::new(),
        }
    }

    /// Returns the root block.
    pub fn root(&self) -> &PlayExtension {
        &self.root
    }

    /// Returns the root block for in-place edits.
    pub fn root_mut(&mut self) -> &mut PlayExtension {
        &mut self.root
    }

    /// Adds an override block, replacing any block with the same name.
    pub fn insert(&mut self, block: PlayExtension) -> Option<PlayExtension> {
        self.named.insert(block.name.clone(), block)
    }

    /// Returns the override block registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&PlayExtension> {
        self.named.get(name)
    }

    /// Returns the block registered under `name`, creating an empty one if needed.
    pub fn get_or_create(&mut self, name: &str) -> &mut PlayExtension {
        self.named
            .entry(name.to_string())
            .or_insert_with(|| PlayExtension::new(name))
    }

    /// Iterates over override block names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named.keys().map(String::as_str)
    }

    /// Builds the inheritance chain for `variant`, most specific first:
    /// the variant block, its flavor blocks in order, the build-type block,
    /// then the root. Names without a block are skipped.
    pub fn chain_for(&self, variant: &Variant) -> Vec<PlayExtension> {
        let mut names: Vec<&str> = Vec::with_capacity(variant.flavors.len() + 2);
        names.push(&variant.name);
        names.extend(variant.flavors.iter().map(String::as_str));
        names.push(&variant.build_type);

        let mut chain = Vec::with_capacity(names.len() + 1);
        for name in names {
            if chain.iter().any(|block: &PlayExtension| block.name == name) {
                continue;
            }
            if let Some(block) = self.named.get(name) {
                chain.push(block.clone());
            }
        }
        chain.push(self.root.clone());

        debug!(
            variant = %variant.name,
            chain = ?chain.iter().map(|block| block.name.as_str()).collect::<Vec<_>>(),
            "assembled configuration chain"
        );
        chain
    }

    /// Merges the chain for `variant` and snapshots the result.
    pub fn resolve(&self, variant: &Variant) -> Result<ResolvedConfig, ConfigError> {
        Ok(merge(self.chain_for(variant))?.to_config())
    }
}
