//! An insertion-ordered map backed by a vector of pairs, used for EMP
//! [dictionaries][`crate::Value::Dictionary`].
//!
//! The wire format has no ordering field: entries are written in the order they are
//! iterated, so the map keeps the order in which keys were first inserted and refuses to
//! hold the same key twice.
//!
//! # Example
//!
//! ```
//! use emp::prelude::*;
//!
//! let mut vmap = VecMap::new();
//! vmap.insert(Bytes::from("b"), Value::from(1i32));
//! vmap.insert(Bytes::from("a"), Value::from(2i32));
//!
//! // insertion order is kept
//! let keys: Vec<&Bytes> = vmap.keys().collect();
//! assert_eq!(keys, vec![&Bytes::from("b"), &Bytes::from("a")]);
//!
//! // re-inserting replaces the value in place
//! vmap.insert(Bytes::from("b"), Value::Null);
//! assert_eq!(vmap.get(&Bytes::from("b")), Some(&Value::Null));
//! assert_eq!(vmap.len(), 2);
//! ```

use std::{
    borrow::Borrow,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Clone, Hash, Debug)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::vecmap::VecMap;
    ///
    /// let vmap = VecMap::from_unique(vec![("foo", "bar")]);
    ///
    /// // should have one element
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Returns the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }
}

impl<K: Eq, V> VecMap<K, V> {
    /// Creates a [`VecMap`] from a vector of key-value pairs whose keys are already
    /// unique, keeping their order.
    ///
    /// # Panics
    ///
    /// This function will panic if two entries share a key.
    ///
    /// ```should_panic
    /// use emp::vecmap::VecMap;
    ///
    /// let vmap = VecMap::from_unique(vec![("a", ""), ("a", "")]);
    /// ```
    pub fn from_unique(v: Vec<(K, V)>) -> Self {
        for i in 1..v.len() {
            if v[..i].iter().any(|(k, _)| *k == v[i].0) {
                panic!("`Vec` contains a duplicate key")
            }
        }
        VecMap(v)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.0
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Indicates whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a pair. If the key is already present its value is replaced in place and
    /// the previous value is returned; otherwise the pair is appended.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Appends a pair, handing it back unchanged if the key is already present.
    ///
    /// # Example
    ///
    /// ```
    /// use emp::vecmap::VecMap;
    ///
    /// let mut vmap = VecMap::new();
    ///
    /// assert!(vmap.try_push("a", 1).is_ok());
    /// assert_eq!(vmap.try_push("a", 2), Err(("a", 2)));
    /// ```
    pub fn try_push(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        if self.contains_key(&key) {
            Err((key, value))
        } else {
            self.0.push((key, value));
            Ok(())
        }
    }
}

impl<K: Eq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { v.into_iter().collect() }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: Eq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut out = VecMap::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
