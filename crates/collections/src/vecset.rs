use std::cmp::Ordering;
use std::fmt;
use std::slice::Iter;

use itertools::Itertools;

/// Constructs a [VecSet] from a list of elements, duplicates are ignored.
#[macro_export]
macro_rules! vecset {
    () => {
        $crate::VecSet::new()
    };
    ($($x:expr),+ $(,)?) => {{
        let mut __set = $crate::VecSet::new();
        $( let _ = __set.insert($x); )*
        __set
    }};
}

/// A set stored as a sorted vector without duplicates.
///
/// Sets of automaton states are small, created once and then mostly compared,
/// for which a sorted vector is both compact and fast. A subset test is a
/// linear merge of the two vectors.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VecSet<T> {
    sorted_array: Vec<T>,
}

impl<T: Ord> VecSet<T> {
    pub fn new() -> Self {
        Self {
            sorted_array: Vec::new(),
        }
    }

    /// Inserts the element, returns true iff it was not yet present.
    pub fn insert(&mut self, element: T) -> bool {
        match self.sorted_array.binary_search(&element) {
            Ok(_) => false,
            Err(position) => {
                self.sorted_array.insert(position, element);
                true
            }
        }
    }

    /// Returns true iff every element of this set is also in `other`.
    pub fn is_subset(&self, other: &VecSet<T>) -> bool {
        if self.len() > other.len() {
            return false;
        }

        let mut other_iter = other.sorted_array.iter();
        'outer: for element in &self.sorted_array {
            for candidate in other_iter.by_ref() {
                match candidate.cmp(element) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }

            // Other is exhausted before finding the element.
            return false;
        }

        true
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.sorted_array.len()
    }

    /// Returns true iff the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.sorted_array.is_empty()
    }

    /// Iterates over the elements in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sorted_array.iter()
    }
}

impl<T: Ord> Default for VecSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sorted_array: Vec<T> = iter.into_iter().collect();
        sorted_array.sort_unstable();
        sorted_array.dedup();
        VecSet { sorted_array }
    }
}

impl<'a, T> IntoIterator for &'a VecSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.iter()
    }
}

impl<T> IntoIterator for VecSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for VecSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.sorted_array.iter().format(", "))
    }
}
