//! Module implement a chained hash table over `u32` identifiers.
//!
//! Bucket index is computed by multiplicative hashing with the golden
//! ratio, `floor(buckets * frac(id * (sqrt(5) - 1) / 2))`. Table doubles
//! its bucket count when the load factor crosses `grow_at` after an
//! insert, and halves it when the load factor drops under `shrink_at`
//! after a remove, never going below the initial bucket count.

use log::debug;

use std::{fmt, mem};

use crate::{Error, Result};

/// Multiplier for golden ratio hashing.
const GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;

/// Configuration for [HashTable].
#[derive(Clone, Debug, PartialEq)]
pub struct HashConfig {
    /// Initial number of buckets, also the floor when shrinking.
    pub buckets: usize,
    /// Grow when `len / buckets` exceeds this, after an insert.
    pub grow_at: f64,
    /// Shrink when `len / buckets` drops under this, after a remove.
    pub shrink_at: f64,
}

impl Default for HashConfig {
    fn default() -> HashConfig {
        HashConfig {
            buckets: 2,
            grow_at: 0.5,
            shrink_at: 0.25,
        }
    }
}

impl HashConfig {
    fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            err_at!(InvalidInput, msg: "zero buckets")
        } else if !(self.shrink_at >= 0.0 && self.shrink_at < self.grow_at) {
            err_at!(InvalidInput, msg: "shrink_at:{} grow_at:{}", self.shrink_at, self.grow_at)
        } else {
            Ok(())
        }
    }
}

/// Hash table keyed by `u32` identifiers, collisions are chained.
pub struct HashTable<T> {
    config: HashConfig,
    buckets: Vec<Vec<(u32, T)>>,
    n_items: usize,
}

impl<T> Default for HashTable<T> {
    fn default() -> HashTable<T> {
        HashTable::new()
    }
}

impl<T> fmt::Debug for HashTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "HashTable<len:{} buckets:{}>",
            self.n_items,
            self.buckets.len()
        )
    }
}

impl<T> HashTable<T> {
    /// Create an empty table with default configuration.
    pub fn new() -> HashTable<T> {
        let config = HashConfig::default();
        let buckets = new_buckets(config.buckets);
        HashTable {
            config,
            buckets,
            n_items: 0,
        }
    }

    /// Create an empty table with supplied configuration.
    pub fn with_config(config: HashConfig) -> Result<HashTable<T>> {
        config.validate()?;
        let buckets = new_buckets(config.buckets);
        Ok(HashTable {
            config,
            buckets,
            n_items: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n_items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_items == 0
    }

    /// Return the current number of buckets.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn contains_key(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        let chain = &self.buckets[self.index(id)];
        chain.iter().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        let off = self.index(id);
        let chain = &mut self.buckets[off];
        chain.iter_mut().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    /// Insert `value` under `id`, fails with `KeyAlreadyExists` if `id`
    /// is already present.
    pub fn insert(&mut self, id: u32, value: T) -> Result<()> {
        let off = self.index(id);
        if self.buckets[off].iter().any(|(k, _)| *k == id) {
            return err_at!(KeyAlreadyExists, msg: "id {}", id);
        }
        self.buckets[off].push((id, value));
        self.n_items += 1;

        if self.load() > self.config.grow_at {
            self.resize(self.buckets.len() * 2);
        }
        Ok(())
    }

    /// Remove and return the value under `id`, fails with `KeyNotFound`
    /// if `id` is missing.
    pub fn remove(&mut self, id: u32) -> Result<T> {
        let off = self.index(id);
        let chain = &mut self.buckets[off];
        let value = match chain.iter().position(|(k, _)| *k == id) {
            Some(pos) => chain.swap_remove(pos).1,
            None => return err_at!(KeyNotFound, msg: "id {}", id),
        };
        self.n_items -= 1;

        let n = self.buckets.len();
        if self.load() < self.config.shrink_at && (n / 2) >= self.config.buckets {
            self.resize(n / 2);
        }
        Ok(value)
    }

    /// Iterate over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|(k, v)| (*k, v)))
    }

    #[inline]
    fn load(&self) -> f64 {
        (self.n_items as f64) / (self.buckets.len() as f64)
    }

    fn index(&self, id: u32) -> usize {
        bucket_index(id, self.buckets.len())
    }

    fn resize(&mut self, n: usize) {
        debug!(
            "hash resize {} -> {} buckets for {} items",
            self.buckets.len(),
            n,
            self.n_items
        );
        let old = mem::replace(&mut self.buckets, new_buckets(n));
        for (id, value) in old.into_iter().flatten() {
            let off = bucket_index(id, n);
            self.buckets[off].push((id, value));
        }
    }
}

fn new_buckets<T>(n: usize) -> Vec<Vec<(u32, T)>> {
    (0..n).map(|_| vec![]).collect()
}

pub(crate) fn bucket_index(id: u32, buckets: usize) -> usize {
    let frac = (f64::from(id) * GOLDEN_RATIO).fract();
    let off = (frac * (buckets as f64)).floor() as usize;
    // guard against rounding at the upper edge.
    std::cmp::min(off, buckets - 1)
}

#[cfg(test)]
#[path = "hash_test.rs"]
mod hash_test;
