use std::fmt;
use std::hash::Hash;

use log::debug;
use rustc_hash::FxHashMap;

use omega_automata::Word;

/// An antichain element together with one word that produces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witnessed<T> {
    pub element: T,
    pub word: Word,
}

impl<T> Witnessed<T> {
    pub fn new(element: T, word: Word) -> Self {
        Self { element, word }
    }
}

/// An antichain stores for every key a set of elements in which no element
/// dominates another. Elements carry their witness word, so that removing a
/// dominated element also removes its witness.
///
/// The domination order is supplied on insertion: `dominates(x, y)` holds when
/// `x` makes `y` redundant. For sets of states this is the subset relation,
/// a smaller set being a stronger obligation.
pub struct Antichain<K, T> {
    storage: FxHashMap<K, Vec<Witnessed<T>>>,

    /// The largest size of the antichain of a single key.
    max_antichain: usize,
    /// Number of times an element was added to the antichain.
    antichain_misses: usize,
    /// Number of times insert was called.
    antichain_inserts: usize,
}

impl<K: Eq + Hash, T> Antichain<K, T> {
    /// Creates a new empty antichain.
    pub fn new() -> Self {
        Antichain {
            storage: FxHashMap::default(),
            max_antichain: 0,
            antichain_misses: 0,
            antichain_inserts: 0,
        }
    }

    /// Inserts the element under the given key unless an existing element
    /// dominates it, in which case false is returned. Otherwise all elements
    /// dominated by the new one are removed first.
    pub fn insert<F>(&mut self, key: K, value: Witnessed<T>, dominates: F) -> bool
    where
        F: Fn(&T, &T) -> bool,
    {
        self.antichain_inserts += 1;

        let entry = self.storage.entry(key).or_default();
        if entry.iter().any(|existing| dominates(&existing.element, &value.element)) {
            return false;
        }

        entry.retain(|existing| !dominates(&value.element, &existing.element));
        entry.push(value);

        self.antichain_misses += 1;
        self.max_antichain = self.max_antichain.max(entry.len());
        true
    }

    /// Returns the elements stored for the given key.
    pub fn get(&self, key: &K) -> &[Witnessed<T>] {
        self.storage.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the number of elements over all keys.
    pub fn len(&self) -> usize {
        self.storage.values().map(|entry| entry.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true iff no two elements stored for the same key are comparable.
    pub fn is_antichain<F>(&self, dominates: F) -> bool
    where
        F: Fn(&T, &T) -> bool,
    {
        self.storage.values().all(|entry| {
            entry.iter().enumerate().all(|(i, left)| {
                entry
                    .iter()
                    .enumerate()
                    .all(|(j, right)| i == j || !dominates(&left.element, &right.element))
            })
        })
    }

    /// Logs the statistics of this antichain.
    pub fn log_statistics(&self, name: &str) {
        debug!(
            "{name} antichain: {} elements, {} inserts, {} added, largest antichain {}",
            self.len(),
            self.antichain_inserts,
            self.antichain_misses,
            self.max_antichain
        );
    }
}

impl<K: Eq + Hash, T> Default for Antichain<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Antichain<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Antichain {{")?;
        for (key, values) in &self.storage {
            writeln!(f, "  {:?}: {:?}", key, values.iter().map(|value| &value.element).collect::<Vec<_>>())?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use omega_collections::VecSet;
    use omega_collections::vecset;
    use omega_utilities::random_test;
    use rand::Rng;

    use super::*;

    fn is_subset(left: &VecSet<u32>, right: &VecSet<u32>) -> bool {
        left.is_subset(right)
    }

    #[test]
    fn test_antichain() {
        let mut antichain: Antichain<u32, VecSet<u32>> = Antichain::new();

        let inserted = antichain.insert(1, Witnessed::new(vecset![2, 3], Word::new()), is_subset);
        assert!(inserted);

        let inserted = antichain.insert(1, Witnessed::new(vecset![2, 3, 6], Word::new()), is_subset);
        assert!(
            !inserted,
            "The pair (1, {{2,3,6}}) should not be inserted in {:?}.",
            antichain
        );

        let inserted = antichain.insert(1, Witnessed::new(vecset![2], Word::new()), is_subset);
        assert!(
            inserted,
            "The pair (1, {{2}}) should overwrite (1, {{2, 3}}) in {:?}.",
            antichain
        );
        assert_eq!(antichain.get(&1).len(), 1);

        let inserted = antichain.insert(1, Witnessed::new(vecset![5, 6], Word::new()), is_subset);
        assert!(
            inserted,
            "The pair (1, {{5, 6}}) should be inserted since it is incomparable to existing pairs in {:?}.",
            antichain
        );
        assert_eq!(antichain.len(), 2);
        assert!(antichain.get(&2).is_empty());
    }

    #[test]
    fn test_random_antichain() {
        random_test(100, |rng| {
            let mut antichain: Antichain<u32, VecSet<u32>> = Antichain::new();
            let mut inserted: Vec<(u32, VecSet<u32>)> = Vec::new();

            // Insert random pairs into the antichain.
            for _ in 0..50 {
                let key = rng.random_range(0..10);
                let set_size = rng.random_range(1..5);
                let mut value = vecset![];

                for _ in 0..set_size {
                    value.insert(rng.random_range(0..20));
                }

                antichain.insert(key, Witnessed::new(value.clone(), Word::new()), is_subset);
                inserted.push((key, value));
            }

            assert!(antichain.is_antichain(is_subset));

            // Every inserted element is covered by a remaining element.
            for (key, value) in &inserted {
                assert!(
                    antichain
                        .get(key)
                        .iter()
                        .any(|existing| existing.element.is_subset(value))
                );
            }
        })
    }
}
