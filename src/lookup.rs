//! Ready-made lookup functions.
//!
//! Any `FnMut(&str) -> String` works with [`bind`](crate::bind); these cover
//! the common sources.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Reads a process environment variable.
///
/// Unset variables and values that are not valid unicode read as empty.
pub fn env(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

/// A map that can answer lookups by string key.
pub trait TextMap {
    fn text(&self, key: &str) -> Option<&str>;
}

impl<K, V, S> TextMap for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V> TextMap for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn text(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

/// Looks keys up in `map`; missing keys read as empty.
pub fn from_map<M: TextMap>(map: &M) -> impl Fn(&str) -> String + '_ {
    move |key| map.text(key).unwrap_or_default().to_string()
}
