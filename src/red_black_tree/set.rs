use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::red_black_tree::cursor::{Cursor, CursorMut, Reverse};
use crate::red_black_tree::node::{self, Link, Side};
use crate::red_black_tree::tree::Tree;
use log::debug;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{AddAssign, Bound, Index, RangeBounds, SubAssign};

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, no red node has a red parent, and every path from a node down to a missing
/// child passes through the same number of black nodes. Together these bound the height of the
/// tree by `2 * log2(n + 1)`, so insertion, removal and lookup are all `O(log n)`.
///
/// Nodes live in an arena owned by the set and link to their parent as well as their children,
/// which lets cursors and iterators step to the next or previous key without an auxiliary stack.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T> {
    tree: Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::with_chunk_size(4096);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts a key into the set. Returns `false` and leaves the set untouched if an equal key
    /// is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(key).1
    }

    /// Inserts a key that must not already be in the set and returns a cursor to it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsertionFailed` if an equal key is already present and
    /// `Error::AllocationFailure` if no memory could be reserved for the new node. The set is
    /// unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    /// use redblack_collections::Error;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.try_insert(1).unwrap().key(), Some(&1));
    /// assert_eq!(set.try_insert(1).unwrap_err(), Error::InsertionFailed);
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<Cursor<'_, T>>
    where
        T: Ord,
    {
        let handle = self.tree.try_insert(key)?;
        Ok(Cursor::new(&self.tree, Some(handle)))
    }

    /// Removes a key from the set. Returns `false` if the key was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Removes a key from the set and returns it, or `None` if the key was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(String::from("a"));
    /// assert_eq!(set.take("a"), Some(String::from("a")));
    /// assert_eq!(set.take("a"), None);
    /// ```
    pub fn take<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.take(key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// Returns a reference to the key in the set that is equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get(&1), Some(&1));
    /// assert_eq!(set.get(&2), None);
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .node_find(key)
            .map(|handle| self.tree.key(handle))
    }

    /// Returns a cursor to the key equal to `key`, or the end cursor if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// let mut cursor = set.find(&2);
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Some(&3));
    /// assert!(set.find(&4) == set.end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.node_find(key))
    }

    /// Returns a mutable cursor to the key equal to `key`, or the end cursor if there is none.
    pub fn find_mut<V>(&mut self, key: &V) -> CursorMut<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.tree.node_find(key);
        CursorMut::new(&mut self.tree, handle)
    }

    /// Replaces the key equal to `old` with `new` in place and returns the old key, or `None` if
    /// `old` is not in the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::OrderViolation` without modifying the set if `new` does not sort strictly
    /// between the keys adjacent to `old`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    /// use redblack_collections::Error;
    ///
    /// let mut set: RedBlackSet<u32> = vec![1, 5, 9].into_iter().collect();
    /// assert_eq!(set.replace(&5, 6), Ok(Some(5)));
    /// assert_eq!(set.replace(&6, 10), Err(Error::OrderViolation));
    /// assert_eq!(set.replace(&7, 8), Ok(None));
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &6, &9]);
    /// ```
    pub fn replace<V>(&mut self, old: &V, new: T) -> Result<Option<T>>
    where
        T: Borrow<V> + Ord,
        V: Ord + ?Sized,
    {
        match self.tree.node_find(old) {
            Some(handle) => self.tree.replace(handle, new).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.len == 0
    }

    /// Clears the set, removing all values. Clearing an empty set does nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        if !self.is_empty() {
            debug!("Clearing a set of {} keys.", self.len());
        }
        self.tree.clear();
    }

    /// Returns the number of black nodes on the path from the root to the minimum key, which is
    /// the same for every path from the root to a missing child.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..7).collect();
    /// assert!(set.black_height() >= 2);
    /// assert_eq!(RedBlackSet::<u32>::new().black_height(), 0);
    /// ```
    pub fn black_height(&self) -> usize {
        self.tree.black_height()
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.bound(key, Side::Left, true))
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.key_of(self.tree.lower_bound(key))
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.key_of(self.tree.min())
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.key_of(self.tree.max())
    }

    /// Removes and returns the minimum key of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_min()
    }

    /// Removes and returns the maximum key of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
    /// assert_eq!(set.pop_last(), Some(2));
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_max()
    }

    /// Returns the key with a particular rank, the zero-based position of the key in sorted
    /// order. This walks the keys from the minimum, so it runs in `O(rank)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `rank` is not less than the length of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    /// use redblack_collections::Error;
    ///
    /// let set: RedBlackSet<u32> = vec![7, 2].into_iter().collect();
    /// assert_eq!(set.at(0), Ok(&2));
    /// assert_eq!(set.at(1), Ok(&7));
    /// assert_eq!(set.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, rank: usize) -> Result<&T> {
        self.tree.select(rank).map(|handle| self.tree.key(handle))
    }

    /// Returns a cursor to the first key that is not less than `key`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(set.lower_bound(&4).key(), Some(&5));
    /// assert_eq!(set.lower_bound(&5).key(), Some(&5));
    /// assert!(set.lower_bound(&8).is_end());
    /// ```
    pub fn lower_bound<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.lower_bound(key))
    }

    /// Returns a cursor to the first key that is greater than `key`, or the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(set.upper_bound(&5).key(), Some(&7));
    /// assert!(set.upper_bound(&7).is_end());
    /// ```
    pub fn upper_bound<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.upper_bound(key))
    }

    /// Returns the pair of `lower_bound(key)` and `upper_bound(key)`. The pair spans the key
    /// equal to `key` if there is one and is empty otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// let (lower, upper) = set.equal_range(&3);
    /// assert_eq!(lower.key(), Some(&3));
    /// assert_eq!(upper.key(), Some(&5));
    ///
    /// let (lower, upper) = set.equal_range(&4);
    /// assert!(lower == upper);
    /// ```
    pub fn equal_range<V>(&self, key: &V) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns cursors to the keys equal to `from` and `to`. Either cursor is the end cursor if
    /// its key is not in the set, and both are if `from` is greater than `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..10).collect();
    /// let (from, to) = set.bounded_range(&2, &5);
    /// assert_eq!(from.key(), Some(&2));
    /// assert_eq!(to.key(), Some(&5));
    ///
    /// let (from, to) = set.bounded_range(&5, &2);
    /// assert!(from.is_end() && to.is_end());
    /// ```
    pub fn bounded_range<V>(&self, from: &V, to: &V) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        if from > to {
            return (self.end(), self.end());
        }
        (self.find(from), self.find(to))
    }

    /// Returns an iterator over the keys of the set that fall within `range`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..10).collect();
    /// assert_eq!(set.range(3..6).collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    /// assert_eq!(set.range(8..).rev().collect::<Vec<&u32>>(), vec![&9, &8]);
    /// assert_eq!(set.range(6..3).next(), None);
    /// ```
    pub fn range<V, R>(&self, range: R) -> RedBlackSetIter<'_, T>
    where
        T: Borrow<V> + Ord,
        V: Ord + ?Sized,
        R: RangeBounds<V>,
    {
        let front = match range.start_bound() {
            Bound::Included(key) => self.tree.bound(key, Side::Right, true),
            Bound::Excluded(key) => self.tree.bound(key, Side::Right, false),
            Bound::Unbounded => self.tree.min(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.tree.bound(key, Side::Left, true),
            Bound::Excluded(key) => self.tree.bound(key, Side::Left, false),
            Bound::Unbounded => self.tree.max(),
        };

        match (front, back) {
            (Some(front), Some(back)) if self.tree.key(front) <= self.tree.key(back) => {
                RedBlackSetIter::new(&self.tree, Some(front), Some(back))
            },
            _ => RedBlackSetIter::new(&self.tree, None, None),
        }
    }

    /// Returns a cursor to the minimum key of the set.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, self.tree.min())
    }

    /// Returns the end cursor of an ascending traversal.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a descending cursor to the maximum key of the set.
    pub fn rbegin(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(&self.tree, self.tree.max())
    }

    /// Returns the end cursor of a descending traversal.
    pub fn rend(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a mutable cursor to the minimum key of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = (0..6).collect();
    /// let mut cursor = set.begin_mut();
    /// while let Some(&key) = cursor.key() {
    ///     if key % 2 == 0 {
    ///         cursor.remove_current();
    ///     } else {
    ///         cursor.move_next();
    ///     }
    /// }
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    /// ```
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let min = self.tree.min();
        CursorMut::new(&mut self.tree, min)
    }

    /// Returns a descending mutable cursor to the maximum key of the set.
    pub fn rbegin_mut(&mut self) -> CursorMut<'_, T, Reverse> {
        let max = self.tree.max();
        CursorMut::new(&mut self.tree, max)
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal
    /// and can be reversed.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    ///
    /// assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&3, &1]);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter::new(&self.tree, self.tree.min(), self.tree.max())
    }

    /// Inserts every key of `other` into the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let other: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// set.merge(&other);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn merge(&mut self, other: &RedBlackSet<T>)
    where
        T: Ord + Clone,
    {
        let initial_len = self.len();
        for key in other {
            self.insert(key.clone());
        }
        debug!(
            "Merged {} keys into a set of {} keys, {} were new.",
            other.len(),
            initial_len,
            self.len() - initial_len,
        );
    }

    /// Removes every key of `other` from the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![1, 2, 3].into_iter().collect();
    /// let other: RedBlackSet<u32> = vec![2, 3, 4].into_iter().collect();
    /// set.split(&other);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn split(&mut self, other: &RedBlackSet<T>)
    where
        T: Ord,
    {
        let initial_len = self.len();
        for key in other {
            self.remove(key);
        }
        debug!(
            "Split {} keys off a set of {} keys, {} were present.",
            other.len(),
            initial_len,
            initial_len - self.len(),
        );
    }

    fn key_of(&self, link: Link) -> Option<&T> {
        link.map(|handle| self.tree.key(handle))
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter { tree: self.tree }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct RedBlackSetIntoIter<T> {
    tree: Tree<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len, Some(self.tree.len))
    }
}

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_max()
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references. It
/// holds a front and a back position, which meet when the iterator is exhausted.
pub struct RedBlackSetIter<'a, T> {
    tree: &'a Tree<T>,
    front: Link,
    back: Link,
}

impl<'a, T> RedBlackSetIter<'a, T> {
    fn new(tree: &'a Tree<T>, front: Link, back: Link) -> Self {
        RedBlackSetIter { tree, front, back }
    }

    fn advance(&mut self, side: Side) -> Option<&'a T> {
        let tree = self.tree;
        let handle = match side {
            Side::Right => self.front?,
            Side::Left => self.back?,
        };

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            let next = node::step(&tree.nodes, handle, side);
            match side {
                Side::Right => self.front = next,
                Side::Left => self.back = next,
            }
        }
        Some(tree.key(handle))
    }
}

impl<'a, T> Clone for RedBlackSetIter<'a, T> {
    fn clone(&self) -> Self {
        RedBlackSetIter::new(self.tree, self.front, self.back)
    }
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance(Side::Right)
    }
}

impl<'a, T> DoubleEndedIterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.advance(Side::Left)
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

// Sets of different lengths order by length; keys only break ties between equal lengths. No `Ord`
// impl: `Ord::min` and `Ord::max` would shadow the inherent `min` and `max` on owned sets.
impl<T> PartialOrd for RedBlackSet<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &RedBlackSet<T>) -> Option<Ordering> {
        Some(
            self.len()
                .cmp(&other.len())
                .then_with(|| self.iter().cmp(other.iter())),
        )
    }
}

impl<T> Index<usize> for RedBlackSet<T> {
    type Output = T;

    fn index(&self, rank: usize) -> &Self::Output {
        match self.at(rank) {
            Ok(key) => key,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<'a, T> AddAssign<&'a RedBlackSet<T>> for RedBlackSet<T>
where
    T: Ord + Clone,
{
    fn add_assign(&mut self, other: &'a RedBlackSet<T>) {
        self.merge(other);
    }
}

impl<'a, T> SubAssign<&'a RedBlackSet<T>> for RedBlackSet<T>
where
    T: Ord,
{
    fn sub_assign(&mut self, other: &'a RedBlackSet<T>) {
        self.split(other);
    }
}
