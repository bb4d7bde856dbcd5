//! Variable bindings accumulated during a traversal.

use std::collections::HashMap;

use weft_core::Ref;

/// A set of named variable bindings for the current position of a
/// traversal.
///
/// Bindings are accumulated by walking up the plan tree: each cursor first
/// asks its child to fill the set, then writes its own entries. Writes use
/// plain insert-or-overwrite, so on a name collision the writer closer to
/// the root wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: HashMap<String, Ref>,
}

impl Bindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, overwriting any existing entry.
    pub fn bind(&mut self, name: impl Into<String>, value: Ref) {
        self.entries.insert(name.into(), value);
    }

    /// Returns the binding for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Ref> {
        self.entries.get(name).copied()
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no names are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the bound `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Ref)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Removes all bindings, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(String, Ref)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (String, Ref)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
