//! Declared option tables used by the merge engine.
//!
//! Each block type lists its mergeable options once, as a static table of
//! [`OptionSpec`] entries. The merge engine walks that table instead of
//! inspecting fields at runtime.

use super::cell::Cell;

/// Shape of an option's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Holds at most one value.
    Scalar,
    /// Holds a sequence of values. An explicit empty sequence is a value.
    Collection,
}

/// Who owns an option's storage across a hierarchy of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Every block has its own cell; unset cells fall back to the parent.
    Owned,
    /// One cell is shared by the whole hierarchy, so there is nothing to
    /// fall back to and the child value is taken as is.
    Shared,
}

/// Writes the child-copy cell from the child's own cell and the parent's
/// resolved cell.
pub type LinkFn<B> = fn(parent: &B, child: &B, child_copy: &mut B, storage: Storage);

/// One entry of a block's option table.
pub struct OptionSpec<B> {
    pub name: &'static str,
    pub kind: OptionKind,
    pub storage: Storage,
    pub link: LinkFn<B>,
}

impl<B> OptionSpec<B> {
    pub(crate) fn apply(&self, parent: &B, child: &B, child_copy: &mut B) {
        (self.link)(parent, child, child_copy, self.storage);
    }
}

impl<B> std::fmt::Debug for OptionSpec<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("storage", &self.storage)
            .finish()
    }
}

/// A set of options that can be linked against a parent of the same shape.
pub trait OptionSet: Sized + 'static {
    /// Every mergeable option. Identity fields such as `name` are never listed.
    fn options() -> &'static [OptionSpec<Self>];

    /// Links nested option sets (e.g. `retain`). Most types have none.
    fn link_nested(_parent: &Self, _child: &Self, _child_copy: &mut Self) {}
}

/// A named configuration block that can take part in a merge chain.
pub trait Mergeable: OptionSet {
    fn name(&self) -> &str;

    /// Returns a block with the same name and every option unset.
    fn uninitialized_copy(&self) -> Self;

    /// Returns a block holding only the documented defaults.
    ///
    /// The root of a chain is linked against this block so its own unset
    /// options collapse to defaults through the normal linking path.
    fn conventions(name: &str) -> Self;
}

/// Names of all options that take part in merging, in declaration order.
pub fn mergeable_names<S: OptionSet>() -> Vec<&'static str> {
    S::options().iter().map(|option| option.name).collect()
}

/// Links every option of `child_copy` to `child`, falling back to `parent`.
pub fn link_options<S: OptionSet>(parent: &S, child: &S, child_copy: &mut S) {
    for option in S::options() {
        option.apply(parent, child, child_copy);
    }
    S::link_nested(parent, child, child_copy);
}

/// Takes `original` when set, else `fallback`; shared storage never falls back.
pub fn link_scalar<T: Clone>(original: &Cell<T>, fallback: &Cell<T>, storage: Storage) -> Cell<T> {
    match storage {
        Storage::Owned => original.clone().or(fallback.clone()),
        Storage::Shared => original.clone(),
    }
}

/// Like [`link_scalar`], but an explicit empty collection stays explicit and
/// shadows the parent instead of inheriting from it.
pub fn link_collection<T: Clone>(
    original: &Cell<Vec<T>>,
    fallback: &Cell<Vec<T>>,
    storage: Storage,
) -> Cell<Vec<T>> {
    if let Cell::Set(values) = original {
        if values.is_empty() && fallback.is_set() {
            tracing::trace!("explicit empty collection overrides inherited value");
        }
    }
    link_scalar(original, fallback, storage)
}

macro_rules! scalar_option {
    ($block:ty, $field:ident) => {
        $crate::config::option::scalar_option!(
            $block,
            $field,
            $crate::config::option::Storage::Owned
        )
    };
    ($block:ty, $field:ident, $storage:expr) => {
        $crate::config::option::OptionSpec::<$block> {
            name: stringify!($field),
            kind: $crate::config::option::OptionKind::Scalar,
            storage: $storage,
            link: |parent: &$block, child: &$block, copy: &mut $block, storage| {
                copy.$field =
                    $crate::config::option::link_scalar(&child.$field, &parent.$field, storage);
            },
        }
    };
}

macro_rules! collection_option {
    ($block:ty, $field:ident) => {
        $crate::config::option::OptionSpec::<$block> {
            name: stringify!($field),
            kind: $crate::config::option::OptionKind::Collection,
            storage: $crate::config::option::Storage::Owned,
            link: |parent: &$block, child: &$block, copy: &mut $block, storage| {
                copy.$field = $crate::config::option::link_collection(
                    &child.$field,
                    &parent.$field,
                    storage,
                );
            },
        }
    };
}

pub(crate) use collection_option;
pub(crate) use scalar_option;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_scalar_falls_back() {
        let linked = link_scalar(&Cell::Unset, &Cell::Set(5), Storage::Owned);
        assert_eq!(linked, Cell::Set(5));
    }

    #[test]
    fn test_shared_scalar_skips_fallback() {
        let linked = link_scalar(&Cell::Unset, &Cell::Set(5), Storage::Shared);
        assert_eq!(linked, Cell::Unset);

        let linked = link_scalar(&Cell::Set(1), &Cell::Set(5), Storage::Shared);
        assert_eq!(linked, Cell::Set(1));
    }

    #[test]
    fn test_collection_keeps_explicit_empty() {
        let linked = link_collection(
            &Cell::Set(Vec::<i64>::new()),
            &Cell::Set(vec![1, 2]),
            Storage::Owned,
        );
        assert_eq!(linked, Cell::Set(vec![]));
    }

    #[test]
    fn test_collection_inherits_when_unset() {
        let linked = link_collection(&Cell::Unset, &Cell::Set(vec![1_i64, 2]), Storage::Owned);
        assert_eq!(linked, Cell::Set(vec![1, 2]));
    }
}
