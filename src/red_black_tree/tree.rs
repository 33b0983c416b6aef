use crate::arena::Handle;
use crate::error::{Error, Result};
use crate::red_black_tree::node::{self, Color, Link, Node, Nodes, Side};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

// Where a key lives, or the parent and side a new node for it would hang from.
enum Search {
    Found(Handle),
    Vacant(Option<(Handle, Side)>),
}

#[derive(Clone, Debug)]
pub struct Tree<T> {
    pub nodes: Nodes<T>,
    pub root: Link,
    pub len: usize,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            nodes: Nodes::new(chunk_size),
            root: None,
            len: 0,
        }
    }

    pub fn key(&self, handle: Handle) -> &T {
        &self.nodes[handle].key
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn min(&self) -> Link {
        self.root.map(|root| node::min_node(&self.nodes, root))
    }

    pub fn max(&self) -> Link {
        self.root.map(|root| node::max_node(&self.nodes, root))
    }

    // Counts the black nodes on the leftmost path from the root. Only meaningful when every path
    // already agrees.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut curr = self.root;
        while let Some(handle) = curr {
            if !self.nodes[handle].is_red() {
                count += 1;
            }
            curr = self.nodes[handle].left;
        }
        count
    }

    // O(rank): walks successors from the minimum.
    pub fn select(&self, rank: usize) -> Result<Handle> {
        let out_of_range = Error::IndexOutOfRange {
            index: rank,
            len: self.len,
        };
        if rank >= self.len {
            return Err(out_of_range);
        }

        let mut curr = self.min();
        for _ in 0..rank {
            curr = curr.and_then(|handle| node::successor(&self.nodes, handle));
        }
        curr.ok_or(out_of_range)
    }

    fn position(&self, handle: Handle) -> Option<(Handle, Side)> {
        let parent = self.nodes[handle].parent?;
        node::side_of(&self.nodes, handle).map(|side| (parent, side))
    }

    // Hangs `child` at `position`, or makes it the root.
    fn replace_child(&mut self, position: Option<(Handle, Side)>, child: Link) {
        match position {
            None => self.root = child,
            Some((parent, side)) => *self.nodes[parent].child_mut(side) = child,
        }
        if let Some(child) = child {
            self.nodes[child].parent = position.map(|(parent, _)| parent);
        }
    }

    // `x` moves down towards `side` and its child on the opposite side takes its place.
    fn rotate_towards(&mut self, x: Handle, side: Side) {
        let pivot = match self.nodes[x].child(side.opposite()) {
            Some(pivot) => pivot,
            None => return,
        };
        let inner = self.nodes[pivot].child(side);
        let position = self.position(x);

        *self.nodes[x].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }

        self.replace_child(position, Some(pivot));
        *self.nodes[pivot].child_mut(side) = Some(x);
        self.nodes[x].parent = Some(pivot);
    }

    pub fn rotate_left(&mut self, x: Handle) {
        self.rotate_towards(x, Side::Left);
    }

    pub fn rotate_right(&mut self, x: Handle) {
        self.rotate_towards(x, Side::Right);
    }

    fn rotate(&mut self, x: Handle, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    fn search<Q>(&self, key: &Q) -> Search
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut position = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let side = match key.cmp(self.nodes[handle].key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(handle),
            };
            position = Some((handle, side));
            curr = self.nodes[handle].child(side);
        }
        Search::Vacant(position)
    }

    pub fn node_find<Q>(&self, key: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(handle) => Some(handle),
            Search::Vacant(_) => None,
        }
    }

    pub fn find<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.node_find(key).is_some()
    }

    /// Inserts `key` unless an equal key is already present. Returns the node holding the key and
    /// whether a new node was created.
    pub fn insert(&mut self, key: T) -> (Handle, bool)
    where
        T: Ord,
    {
        match self.search(&key) {
            Search::Found(handle) => (handle, false),
            Search::Vacant(position) => {
                let parent = position.map(|(parent, _)| parent);
                let handle = self.nodes.allocate(Node::new(key, parent));
                self.attach(handle, position);
                (handle, true)
            },
        }
    }

    pub fn try_insert(&mut self, key: T) -> Result<Handle>
    where
        T: Ord,
    {
        match self.search(&key) {
            Search::Found(_) => Err(Error::InsertionFailed),
            Search::Vacant(position) => {
                let parent = position.map(|(parent, _)| parent);
                let handle = self.nodes.try_allocate(Node::new(key, parent))?;
                self.attach(handle, position);
                Ok(handle)
            },
        }
    }

    fn attach(&mut self, handle: Handle, position: Option<(Handle, Side)>) {
        self.replace_child(position, Some(handle));
        self.len += 1;
        self.insert_fixup(handle);
    }

    fn insert_fixup(&mut self, handle: Handle) {
        let mut x = handle;
        while let Some(parent) = self.nodes[x].parent {
            if !self.nodes[parent].is_red() {
                break;
            }
            // a red parent is never the root
            let (grandparent, side) = match self.position(parent) {
                Some(position) => position,
                None => break,
            };

            match node::sibling(&self.nodes, parent) {
                Some(uncle) if self.nodes[uncle].is_red() => {
                    self.nodes[parent].color = Color::Black;
                    self.nodes[uncle].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    x = grandparent;
                },
                _ => {
                    let mut parent = parent;
                    if self.nodes[parent].child(side.opposite()) == Some(x) {
                        self.rotate(parent, side);
                        parent = x;
                    }
                    self.nodes[parent].color = Color::Black;
                    self.nodes[grandparent].color = Color::Red;
                    self.rotate(grandparent, side.opposite());
                    break;
                },
            }
        }

        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.node_find(key).map(|handle| self.remove_node(handle))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes the key held by `handle`. If the node has two children, its successor's key moves
    /// into it and the successor's node is freed instead.
    pub fn remove_node(&mut self, handle: Handle) -> T {
        let spliced = match (self.nodes[handle].left, self.nodes[handle].right) {
            (Some(_), Some(right)) => node::min_node(&self.nodes, right),
            _ => handle,
        };
        let child = self.nodes[spliced].left.or(self.nodes[spliced].right);
        let position = self.position(spliced);
        self.replace_child(position, child);

        let removed = self.nodes.free(spliced);
        let key = if spliced == handle {
            removed.key
        } else {
            mem::replace(&mut self.nodes[handle].key, removed.key)
        };

        if removed.color == Color::Black {
            self.remove_fixup(child, position);
        }
        self.len -= 1;
        key
    }

    // `x` is the link carrying the extra black and `position` is where it hangs. `x` may be
    // `None` when a black leaf was removed.
    fn remove_fixup(&mut self, mut x: Link, mut position: Option<(Handle, Side)>) {
        while let Some((parent, side)) = position {
            if node::is_red(&self.nodes, x) {
                break;
            }

            let mut sibling = match self.nodes[parent].child(side.opposite()) {
                Some(sibling) => sibling,
                None => break,
            };

            if self.nodes[sibling].is_red() {
                self.nodes[sibling].color = Color::Black;
                self.nodes[parent].color = Color::Red;
                self.rotate(parent, side);
                sibling = match self.nodes[parent].child(side.opposite()) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());
            if !node::is_red(&self.nodes, near) && !node::is_red(&self.nodes, far) {
                self.nodes[sibling].color = Color::Red;
                x = Some(parent);
                position = self.position(parent);
                continue;
            }

            if !node::is_red(&self.nodes, far) {
                if let Some(near) = near {
                    self.nodes[near].color = Color::Black;
                }
                self.nodes[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = match self.nodes[parent].child(side.opposite()) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            let parent_color = self.nodes[parent].color;
            self.nodes[sibling].color = parent_color;
            self.nodes[parent].color = Color::Black;
            if let Some(far) = self.nodes[sibling].child(side.opposite()) {
                self.nodes[far].color = Color::Black;
            }
            self.rotate(parent, side);
            x = self.root;
            break;
        }

        if let Some(x) = x {
            self.nodes[x].color = Color::Black;
        }
        if let Some(root) = self.root {
            self.nodes[root].color = Color::Black;
        }
    }

    pub fn pop_min(&mut self) -> Option<T> {
        self.min().map(|handle| self.remove_node(handle))
    }

    pub fn pop_max(&mut self) -> Option<T> {
        self.max().map(|handle| self.remove_node(handle))
    }

    /// Swaps the key held by `handle` for `key` if it still sorts strictly between the node's
    /// neighbours.
    pub fn replace(&mut self, handle: Handle, key: T) -> Result<T>
    where
        T: Ord,
    {
        let after_predecessor = node::predecessor(&self.nodes, handle)
            .map_or(true, |predecessor| self.nodes[predecessor].key < key);
        let before_successor = node::successor(&self.nodes, handle)
            .map_or(true, |successor| key < self.nodes[successor].key);
        if !after_predecessor || !before_successor {
            return Err(Error::OrderViolation);
        }
        Ok(mem::replace(&mut self.nodes[handle].key, key))
    }

    /// Returns the node closest to `key` on `side` of it: with `Side::Right` the first key greater
    /// than `key`, with `Side::Left` the last key less than `key`. Equal keys qualify when
    /// `inclusive` is set.
    pub fn bound<Q>(&self, key: &Q, side: Side, inclusive: bool) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let beyond = match side {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
        };

        let mut best = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let ordering = self.nodes[handle].key.borrow().cmp(key);
            if ordering == beyond || (inclusive && ordering == Ordering::Equal) {
                best = Some(handle);
                curr = self.nodes[handle].child(side.opposite());
            } else {
                curr = self.nodes[handle].child(side);
            }
        }
        best
    }

    pub fn lower_bound<Q>(&self, key: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.bound(key, Side::Right, true)
    }

    pub fn upper_bound<Q>(&self, key: &Q) -> Link
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.bound(key, Side::Right, false)
    }
}

#[cfg(test)]
impl<T> Tree<T>
where
    T: Ord + std::fmt::Debug,
{
    /// Checks every red black invariant by walking every root-to-nil path, independently of the
    /// navigation helpers used by the tree itself.
    pub fn assert_valid(&self) {
        assert_eq!(self.nodes.len(), self.len);

        let root = match self.root {
            Some(root) => root,
            None => {
                assert_eq!(self.len, 0);
                return;
            },
        };
        assert!(!self.nodes[root].is_red(), "root must be black");
        assert_eq!(self.nodes[root].parent, None);

        let mut black_height = None;
        let mut count = 0;
        let mut stack = vec![(root, 0)];
        while let Some((handle, blacks_above)) = stack.pop() {
            count += 1;
            let curr = &self.nodes[handle];
            let blacks = blacks_above + if curr.is_red() { 0 } else { 1 };
            if curr.is_red() {
                assert!(
                    !node::is_red(&self.nodes, curr.parent),
                    "red node {:?} has a red parent",
                    curr.key,
                );
            }

            for &side in &[Side::Left, Side::Right] {
                match curr.child(side) {
                    Some(child) => {
                        assert_eq!(self.nodes[child].parent, Some(handle));
                        stack.push((child, blacks));
                    },
                    None => match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) => assert_eq!(
                            expected, blacks,
                            "black height differs below {:?}",
                            curr.key,
                        ),
                    },
                }
            }
        }
        assert_eq!(count, self.len);
        assert_eq!(Some(self.black_height()), black_height);

        // in-order with an explicit stack, so the ordering check does not rely on `successor`
        let mut in_order = Vec::with_capacity(self.len);
        let mut pending = Vec::new();
        let mut curr = self.root;
        while curr.is_some() || !pending.is_empty() {
            while let Some(handle) = curr {
                pending.push(handle);
                curr = self.nodes[handle].left;
            }
            if let Some(handle) = pending.pop() {
                in_order.push(handle);
                curr = self.nodes[handle].right;
            }
        }
        for window in in_order.windows(2) {
            assert!(self.key(window[0]) < self.key(window[1]));
            assert_eq!(node::successor(&self.nodes, window[0]), Some(window[1]));
            assert_eq!(node::predecessor(&self.nodes, window[1]), Some(window[0]));
        }
        assert_eq!(in_order.first().cloned(), self.min());
        assert_eq!(in_order.last().cloned(), self.max());
    }

    pub fn keys(&self) -> Vec<&T> {
        let mut keys = Vec::with_capacity(self.len);
        let mut curr = self.min();
        while let Some(handle) = curr {
            keys.push(self.key(handle));
            curr = node::successor(&self.nodes, handle);
        }
        keys
    }
}
