//! String interner for efficient string storage and comparison.
//!
//! Uses `Arc<str>` for cheap cloning (reference count increment instead of
//! allocation) and so that interned names can cross thread boundaries during
//! the parallel collection phase. The interner deduplicates strings so
//! identical strings share the same allocation.

use std::collections::HashSet;
use std::sync::Arc;

/// An interned string - cheap to clone (just Arc increment)
pub type Name = Arc<str>;

/// String interner that deduplicates strings.
///
/// Interning a string returns an `Arc<str>` that can be cheaply cloned.
/// If the same string is interned multiple times, the same `Arc` is returned.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    strings: HashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a cheap-to-clone reference.
    ///
    /// If the string was already interned, returns the existing `Arc`.
    /// Otherwise, creates a new `Arc` and stores it.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(existing) = self.strings.get(s) {
            Arc::clone(existing)
        } else {
            let arc: Arc<str> = Arc::from(s);
            self.strings.insert(Arc::clone(&arc));
            arc
        }
    }

    /// Intern an owned string, avoiding allocation if possible.
    pub fn intern_string(&mut self, s: String) -> Name {
        if let Some(existing) = self.strings.get(s.as_str()) {
            Arc::clone(existing)
        } else {
            let arc: Arc<str> = Arc::from(s);
            self.strings.insert(Arc::clone(&arc));
            arc
        }
    }

    /// Get an interned string if it exists, without creating it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.strings.get(s).cloned()
    }

    /// Number of unique strings interned.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings have been interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
