#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;

use omega_automata::StateIndex;

/// A set of triples `(p, q, acc)` over the states of `B`, stating that `q` is
/// reachable from `p` by some word, where `acc` holds iff an accepting state
/// was visited on the way (including `p` and `q`).
///
/// For every pair `(p, q)` at most one triple is stored, `(p, q, true)` makes
/// `(p, q, false)` redundant.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Relation {
    triples: BTreeMap<(StateIndex, StateIndex), bool>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the triple `(p, q, acc)`, returns true iff the relation changed.
    pub fn insert(&mut self, p: StateIndex, q: StateIndex, acc: bool) -> bool {
        match self.triples.get_mut(&(p, q)) {
            Some(existing) => {
                if acc && !*existing {
                    *existing = true;
                    true
                } else {
                    false
                }
            }
            None => {
                self.triples.insert((p, q), acc);
                true
            }
        }
    }

    /// Returns the flag of the pair `(p, q)` if it is related.
    pub fn get(&self, p: StateIndex, q: StateIndex) -> Option<bool> {
        self.triples.get(&(p, q)).copied()
    }

    /// Iterates over all triples, ordered by pair.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, StateIndex, bool)> + '_ {
        self.triples.iter().map(|((p, q), acc)| (*p, *q, *acc))
    }

    /// Returns the triples with left state `p`.
    pub fn successors(&self, p: StateIndex) -> impl Iterator<Item = (StateIndex, bool)> + '_ {
        self.triples
            .range((p, StateIndex::new(0))..=(p, StateIndex::new(usize::MAX)))
            .map(|((_, q), acc)| (*q, *acc))
    }

    /// Returns the number of related pairs.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns true iff every triple `(p, q, b)` of this relation is entailed
    /// by a triple `(p, q', b')` of `other` where `q'` simulates `q` and `b`
    /// implies `b'`. With the identity simulation this is inclusion, where
    /// `(p, q, true)` also covers `(p, q, false)`.
    pub fn is_covered_by<F>(&self, other: &Relation, simulates: F) -> bool
    where
        F: Fn(StateIndex, StateIndex) -> bool,
    {
        self.iter().all(|(p, q, acc)| {
            other.get(p, q).is_some_and(|other_acc| !acc || other_acc) || other.covers((p, q, acc), &simulates)
        })
    }

    /// Returns the composition: `(p, r, b || c)` for every `(p, q, b)` of this
    /// relation and `(q, r, c)` of `other`.
    pub fn compose(&self, other: &Relation) -> Relation {
        let mut result = Relation::new();
        for (p, q, acc) in self.iter() {
            for (r, other_acc) in other.successors(q) {
                result.insert(p, r, acc || other_acc);
            }
        }
        result
    }

    /// Adds all triples of `other`, returns true iff the relation changed.
    pub fn extend(&mut self, other: &Relation) -> bool {
        let mut changed = false;
        for (p, q, acc) in other.iter() {
            changed |= self.insert(p, q, acc);
        }
        changed
    }

    fn covers<F>(&self, (p, q, acc): (StateIndex, StateIndex, bool), simulates: &F) -> bool
    where
        F: Fn(StateIndex, StateIndex) -> bool,
    {
        self.successors(p)
            .any(|(other_q, other_acc)| (!acc || other_acc) && simulates(other_q, q))
    }
}

impl FromIterator<(StateIndex, StateIndex, bool)> for Relation {
    fn from_iter<I: IntoIterator<Item = (StateIndex, StateIndex, bool)>>(iter: I) -> Self {
        let mut relation = Relation::new();
        for (p, q, acc) in iter {
            relation.insert(p, q, acc);
        }
        relation
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter().format_with(", ", |(p, q, acc), f| f(&format_args!("({p}, {q}, {acc})")))
        )
    }
}
