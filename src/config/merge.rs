//! Inheritance across a chain of configuration blocks.

use tracing::{debug, trace};

use super::option::{link_options, Mergeable};
use super::ConfigError;

/// Merges a chain of blocks, ordered from most specific to root, into one
/// block carrying every inherited value.
///
/// Each option the first block leaves unset takes the value of the nearest
/// ancestor that sets it. Options nobody sets take their documented default,
/// or stay unset when the default is absent. The result keeps the name of
/// the first block.
///
/// A chain of one block is returned unchanged. An empty chain is rejected.
pub fn merge<B: Mergeable>(chain: Vec<B>) -> Result<B, ConfigError> {
    let mut originals = chain;
    match originals.len() {
        0 => return Err(ConfigError::EmptyChain),
        1 => return Ok(originals.remove(0)),
        _ => {}
    }

    debug!(
        block = originals[0].name(),
        depth = originals.len(),
        "merging configuration chain"
    );

    let mut copies: Vec<B> = originals.iter().map(Mergeable::uninitialized_copy).collect();

    // The root appears twice: once as a child, once as its own parent. Its
    // parent copy only holds defaults, so unset root options end up there.
    let root_name = originals[originals.len() - 1].name().to_string();
    copies.push(B::conventions(&root_name));

    // Parents are resolved before their children read from them.
    for i in (1..copies.len()).rev() {
        let (children, parents) = copies.split_at_mut(i);
        let child = &originals[i - 1];
        trace!(child = child.name(), parent = parents[0].name(), "linking block");
        link_options(&parents[0], child, &mut children[i - 1]);
    }

    copies.truncate(1);
    Ok(copies.swap_remove(0))
}
