use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered counter.
///
/// `most_common` and `top` break ties in favour of the key seen first, so
/// results do not depend on hash order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Entries by descending count; equal counts keep first-seen order.
    pub fn most_common(&self) -> Vec<(&K, u64)> {
        let mut out: Vec<(&K, u64)> = self.iter().collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// The first key holding the maximum count.
    pub fn top(&self) -> Option<&K> {
        let mut best: Option<(&K, u64)> = None;
        for (key, n) in self.iter() {
            if best.is_none_or(|(_, b)| n > b) {
                best = Some((key, n));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Add every count from `other`. Keys new to `self` are appended in
    /// `other`'s order.
    pub fn merge(&mut self, other: &Tally<K>) {
        for (key, n) in other.iter() {
            self.add_n(key.clone(), n);
        }
    }
}
