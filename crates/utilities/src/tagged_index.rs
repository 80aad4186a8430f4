use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ops::Index;
use std::ops::IndexMut;

/// A plain index `T` that carries a phantom `Tag`, so that indices of
/// different kinds (states of one automaton, letters, ...) cannot be mixed up
/// by accident.
///
/// Constructing a `TagIndex` is not a proof that it is in range, it only
/// prevents comparing or indexing with an index of another kind. Use
/// [`TagIndex::value`] (or deref) to obtain the raw value.
pub struct TagIndex<T, Tag> {
    index: T,
    marker: PhantomData<fn() -> Tag>,
}

impl<T, Tag> TagIndex<T, Tag> {
    pub const fn new(index: T) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }
}

impl<T: Copy, Tag> TagIndex<T, Tag> {
    /// Returns the raw index.
    pub fn value(&self) -> T {
        self.index
    }
}

impl<T: Default, Tag> Default for TagIndex<T, Tag> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone, Tag> Clone for TagIndex<T, Tag> {
    fn clone(&self) -> Self {
        Self::new(self.index.clone())
    }
}

impl<T: Copy, Tag> Copy for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq for TagIndex<T, Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: PartialEq, Tag> Eq for TagIndex<T, Tag> {}

impl<T: PartialEq, Tag> PartialEq<T> for TagIndex<T, Tag> {
    fn eq(&self, other: &T) -> bool {
        self.index == *other
    }
}

impl<T: Ord, Tag> Ord for TagIndex<T, Tag> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T: PartialOrd, Tag> PartialOrd for TagIndex<T, Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.index.partial_cmp(&other.index)
    }
}

impl<T: Hash, Tag> Hash for TagIndex<T, Tag> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: fmt::Debug, Tag> fmt::Debug for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T: fmt::Display, Tag> fmt::Display for TagIndex<T, Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.index.fmt(f)
    }
}

impl<T, Tag> Deref for TagIndex<T, Tag> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.index
    }
}

// Vectors and slices indexed by a tagged `usize`.
impl<U, Tag> Index<TagIndex<usize, Tag>> for Vec<U> {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &U {
        &self[index.index]
    }
}

impl<U, Tag> IndexMut<TagIndex<usize, Tag>> for Vec<U> {
    fn index_mut(&mut self, index: TagIndex<usize, Tag>) -> &mut U {
        &mut self[index.index]
    }
}

impl<U, Tag> Index<TagIndex<usize, Tag>> for [U] {
    type Output = U;

    fn index(&self, index: TagIndex<usize, Tag>) -> &U {
        &self[index.index]
    }
}

impl<U, Tag> IndexMut<TagIndex<usize, Tag>> for [U] {
    fn index_mut(&mut self, index: TagIndex<usize, Tag>) -> &mut U {
        &mut self[index.index]
    }
}
