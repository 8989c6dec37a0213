//! Tri-state option storage.

/// Storage for a single configuration option.
///
/// `Unset` means the option was never specified and should be inherited.
/// `Set` holds an explicit value, which for collections may be empty.
/// An explicitly empty collection is a real value and is never treated as
/// `Unset`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Cell<T> {
    /// Stores an explicit value, replacing whatever was there.
    pub fn set(&mut self, value: T) {
        *self = Cell::Set(value);
    }

    /// Forgets the stored value so the option inherits again.
    pub fn clear(&mut self) {
        *self = Cell::Unset;
    }

    /// Returns the explicit value, or `None` when unset.
    pub fn get(&self) -> Option<&T> {
        match self {
            Cell::Set(value) => Some(value),
            Cell::Unset => None,
        }
    }

    /// Returns true when the option holds an explicit value.
    pub fn is_set(&self) -> bool {
        matches!(self, Cell::Set(_))
    }

    /// Returns `self` if it is set, otherwise `fallback`.
    pub fn or(self, fallback: Cell<T>) -> Cell<T> {
        match self {
            Cell::Set(_) => self,
            Cell::Unset => fallback,
        }
    }

    /// Converts into an `Option`, with `Unset` becoming `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Cell::Set(value) => Some(value),
            Cell::Unset => None,
        }
    }
}

impl<T> From<Option<T>> for Cell<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Cell::Set(value),
            None => Cell::Unset,
        }
    }
}
