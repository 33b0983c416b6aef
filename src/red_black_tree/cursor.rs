use crate::error::{Error, Result};
use crate::red_black_tree::node::{self, Link, Side};
use crate::red_black_tree::tree::Tree;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

/// The order in which a cursor visits keys.
///
/// This trait is implemented by `Forward` and `Reverse` and cannot be usefully implemented
/// outside of this crate.
pub trait Direction {
    #[doc(hidden)]
    const SIDE: Side;
}

/// Visits keys in ascending order.
#[derive(Clone, Copy, Debug)]
pub struct Forward;

/// Visits keys in descending order.
#[derive(Clone, Copy, Debug)]
pub struct Reverse;

impl Direction for Forward {
    const SIDE: Side = Side::Right;
}

impl Direction for Reverse {
    const SIDE: Side = Side::Left;
}

/// A cursor over the keys of a `RedBlackSet<T>`.
///
/// A cursor either points at a key or is at the end. Moving an end cursor leaves it at the end.
/// `move_next` steps in the cursor's direction and `move_prev` steps against it, so a
/// `Cursor<'_, T, Reverse>` walks from the maximum down to the minimum. Stepping only follows
/// parent and child links of the tree and needs no auxiliary stack.
///
/// Two cursors are equal if they point at the same node of the same set, or if both are at the
/// end.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::RedBlackSet;
///
/// let set: RedBlackSet<u32> = vec![3, 1, 2].into_iter().collect();
///
/// let mut cursor = set.begin();
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&2));
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_prev();
/// assert!(cursor == set.end());
///
/// let mut cursor = set.rbegin();
/// assert_eq!(cursor.key(), Some(&3));
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&2));
/// ```
pub struct Cursor<'a, T, D = Forward> {
    tree: &'a Tree<T>,
    current: Link,
    direction: PhantomData<D>,
}

impl<'a, T, D> Cursor<'a, T, D>
where
    D: Direction,
{
    pub(crate) fn new(tree: &'a Tree<T>, current: Link) -> Self {
        Cursor {
            tree,
            current,
            direction: PhantomData,
        }
    }

    /// Returns the key the cursor points at, or `None` at the end.
    pub fn key(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.current.map(|handle| tree.key(handle))
    }

    /// Returns `true` if the cursor is at the end.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves the cursor to the next key in its direction.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.current {
            self.current = node::step(&self.tree.nodes, handle, D::SIDE);
        }
    }

    /// Moves the cursor to the previous key in its direction.
    pub fn move_prev(&mut self) {
        if let Some(handle) = self.current {
            self.current = node::step(&self.tree.nodes, handle, D::SIDE.opposite());
        }
    }
}

impl<'a, T, D> Clone for Cursor<'a, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, D> Copy for Cursor<'a, T, D> {}

impl<'a, T, D> PartialEq for Cursor<'a, T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && (self.current.is_none() || ptr::eq(self.tree, other.tree))
    }
}

impl<'a, T, D> Eq for Cursor<'a, T, D> {}

impl<'a, T, D> fmt::Debug for Cursor<'a, T, D>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        f.debug_tuple("Cursor")
            .field(&self.current.map(|handle| tree.key(handle)))
            .finish()
    }
}

/// A cursor over the keys of a `RedBlackSet<T>` that can replace or remove the key it points at.
///
/// Keys cannot be mutated in place because that could break the ordering of the set. Instead,
/// `replace` swaps the current key for a new one after checking that it still sorts between its
/// neighbours.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::RedBlackSet;
/// use redblack_collections::Error;
///
/// let mut set: RedBlackSet<u32> = vec![10, 20, 30].into_iter().collect();
///
/// let mut cursor = set.find_mut(&20);
/// assert_eq!(cursor.replace(25), Ok(20));
/// assert_eq!(cursor.replace(35), Err(Error::OrderViolation));
/// assert_eq!(cursor.remove_current(), Some(25));
/// assert_eq!(cursor.key(), Some(&30));
///
/// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&10, &30]);
/// ```
pub struct CursorMut<'a, T, D = Forward> {
    tree: &'a mut Tree<T>,
    current: Link,
    direction: PhantomData<D>,
}

impl<'a, T, D> CursorMut<'a, T, D>
where
    D: Direction,
{
    pub(crate) fn new(tree: &'a mut Tree<T>, current: Link) -> Self {
        CursorMut {
            tree,
            current,
            direction: PhantomData,
        }
    }

    /// Returns the key the cursor points at, or `None` at the end.
    pub fn key(&self) -> Option<&T> {
        self.current.map(|handle| self.tree.key(handle))
    }

    /// Returns `true` if the cursor is at the end.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves the cursor to the next key in its direction.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.current {
            self.current = node::step(&self.tree.nodes, handle, D::SIDE);
        }
    }

    /// Moves the cursor to the previous key in its direction.
    pub fn move_prev(&mut self) {
        if let Some(handle) = self.current {
            self.current = node::step(&self.tree.nodes, handle, D::SIDE.opposite());
        }
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, D> {
        Cursor::new(&*self.tree, self.current)
    }

    /// Replaces the current key with `key` and returns the old key. Returns
    /// `Error::OrderViolation` without modifying the set if `key` does not sort strictly between
    /// the neighbours of the current key, and `Error::CursorAtEnd` if the cursor is at the end.
    pub fn replace(&mut self, key: T) -> Result<T>
    where
        T: Ord,
    {
        let handle = self.current.ok_or(Error::CursorAtEnd)?;
        self.tree.replace(handle, key)
    }

    /// Removes the current key and returns it, moving the cursor to the next key in its
    /// direction. Returns `None` if the cursor is at the end.
    pub fn remove_current(&mut self) -> Option<T> {
        let handle = self.current?;
        let has_two_children = {
            let curr = &self.tree.nodes[handle];
            curr.left.is_some() && curr.right.is_some()
        };

        // The successor's key moves into a node with two children, so a forward cursor stays put.
        let next = if has_two_children && D::SIDE == Side::Right {
            Some(handle)
        } else {
            node::step(&self.tree.nodes, handle, D::SIDE)
        };
        let key = self.tree.remove_node(handle);
        self.current = next;
        Some(key)
    }
}

impl<'a, T, D> fmt::Debug for CursorMut<'a, T, D>
where
    T: fmt::Debug,
    D: Direction,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.key()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, CursorMut, Forward, Reverse};
    use crate::error::Error;
    use crate::red_black_tree::tree::Tree;

    fn tree_of(keys: &[u32]) -> Tree<u32> {
        let mut tree = Tree::new(4);
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    fn collect<D: super::Direction>(mut cursor: Cursor<'_, u32, D>) -> Vec<u32> {
        let mut keys = Vec::new();
        while let Some(key) = cursor.key() {
            keys.push(*key);
            cursor.move_next();
        }
        keys
    }

    #[test]
    fn test_forward_and_reverse_are_mirrored() {
        let tree = tree_of(&[5, 2, 8, 1, 9, 3, 7, 4, 6]);
        let forward = collect(Cursor::<_, Forward>::new(&tree, tree.min()));
        let mut reverse = collect(Cursor::<_, Reverse>::new(&tree, tree.max()));
        assert_eq!(forward, (1..10).collect::<Vec<u32>>());
        reverse.reverse();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_end_is_absorbing() {
        let tree = tree_of(&[1, 2]);
        let mut cursor: Cursor<'_, u32> = Cursor::new(&tree, tree.max());
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_prev();
        assert!(cursor.is_end());
        assert_eq!(cursor.key(), None);
    }

    #[test]
    fn test_move_prev_reverse() {
        let tree = tree_of(&[1, 2, 3]);
        let mut cursor: Cursor<'_, u32, Reverse> = Cursor::new(&tree, tree.min());
        cursor.move_prev();
        assert_eq!(cursor.key(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.key(), Some(&1));
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_equality() {
        let tree = tree_of(&[1, 2]);
        let other = tree_of(&[1, 2]);
        let a: Cursor<'_, u32> = Cursor::new(&tree, tree.min());
        let mut b: Cursor<'_, u32> = Cursor::new(&tree, tree.max());
        assert!(a != b);
        b.move_prev();
        assert!(a == b);

        let c: Cursor<'_, u32> = Cursor::new(&other, other.min());
        assert!(a != c);

        let end: Cursor<'_, u32> = Cursor::new(&tree, None);
        let other_end: Cursor<'_, u32> = Cursor::new(&other, None);
        assert!(end == other_end);
    }

    #[test]
    fn test_cursor_mut_replace_at_end() {
        let mut tree = tree_of(&[1]);
        let mut cursor: CursorMut<'_, u32> = CursorMut::new(&mut tree, None);
        assert_eq!(cursor.replace(2), Err(Error::CursorAtEnd));
        assert_eq!(cursor.remove_current(), None);
    }

    #[test]
    fn test_cursor_mut_remove_forward() {
        let mut tree = tree_of(&(0..64).collect::<Vec<u32>>());
        let min = tree.min();
        let mut cursor: CursorMut<'_, u32> = CursorMut::new(&mut tree, min);
        let mut visited = Vec::new();
        while let Some(key) = cursor.key().cloned() {
            visited.push(key);
            if key % 2 == 0 {
                assert_eq!(cursor.remove_current(), Some(key));
            } else {
                cursor.move_next();
            }
        }
        assert_eq!(visited, (0..64).collect::<Vec<u32>>());
        tree.assert_valid();
        assert_eq!(
            tree.keys(),
            (0..64).filter(|key| key % 2 == 1).collect::<Vec<u32>>().iter().collect::<Vec<&u32>>(),
        );
    }

    #[test]
    fn test_cursor_mut_remove_reverse() {
        let mut tree = tree_of(&(0..64).collect::<Vec<u32>>());
        let max = tree.max();
        let mut cursor: CursorMut<'_, u32, Reverse> = CursorMut::new(&mut tree, max);
        let mut visited = Vec::new();
        while let Some(key) = cursor.key().cloned() {
            visited.push(key);
            assert_eq!(cursor.remove_current(), Some(key));
        }
        assert_eq!(visited, (0..64).rev().collect::<Vec<u32>>());
        tree.assert_valid();
        assert_eq!(tree.len, 0);
    }

    #[test]
    fn test_cursor_mut_as_cursor() {
        let mut tree = tree_of(&[4, 2]);
        let min = tree.min();
        let mut cursor: CursorMut<'_, u32> = CursorMut::new(&mut tree, min);
        cursor.move_next();
        assert_eq!(cursor.as_cursor().key(), Some(&4));
        cursor.move_prev();
        assert_eq!(cursor.as_cursor().key(), Some(&2));
    }
}
