use crate::arena::{Handle, TypedArena};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// An enum naming one of the two children of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub type Link = Option<Handle>;

pub type Nodes<T> = TypedArena<Node<T>>;

/// A struct representing an internal node of a red black tree. The child links own the subtree
/// through the arena; `parent` is only a back link.
#[derive(Clone, Debug)]
pub struct Node<T> {
    pub key: T,
    pub color: Color,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T> Node<T> {
    pub fn new(key: T, parent: Link) -> Self {
        Node {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

pub fn is_red<T>(nodes: &Nodes<T>, link: Link) -> bool {
    match link {
        None => false,
        Some(handle) => nodes[handle].is_red(),
    }
}

// Follows `side` children until there are none left.
pub fn extreme_node<T>(nodes: &Nodes<T>, handle: Handle, side: Side) -> Handle {
    let mut curr = handle;
    while let Some(child) = nodes[curr].child(side) {
        curr = child;
    }
    curr
}

pub fn min_node<T>(nodes: &Nodes<T>, handle: Handle) -> Handle {
    extreme_node(nodes, handle, Side::Left)
}

pub fn max_node<T>(nodes: &Nodes<T>, handle: Handle) -> Handle {
    extreme_node(nodes, handle, Side::Right)
}

fn is_son<T>(nodes: &Nodes<T>, handle: Handle, side: Side) -> bool {
    match nodes[handle].parent {
        Some(parent) => nodes[parent].child(side) == Some(handle),
        None => false,
    }
}

pub fn is_left_son<T>(nodes: &Nodes<T>, handle: Handle) -> bool {
    is_son(nodes, handle, Side::Left)
}

pub fn is_right_son<T>(nodes: &Nodes<T>, handle: Handle) -> bool {
    is_son(nodes, handle, Side::Right)
}

/// Returns which child of its parent `handle` is, or `None` for the root.
pub fn side_of<T>(nodes: &Nodes<T>, handle: Handle) -> Option<Side> {
    nodes[handle].parent?;
    if is_right_son(nodes, handle) {
        Some(Side::Right)
    } else {
        Some(Side::Left)
    }
}

pub fn sibling<T>(nodes: &Nodes<T>, handle: Handle) -> Link {
    let parent = nodes[handle].parent?;
    if is_left_son(nodes, handle) {
        nodes[parent].right
    } else {
        nodes[parent].left
    }
}

/// Returns the neighbour of `handle` in in-order sequence towards `side`: `Side::Right` gives the
/// successor and `Side::Left` gives the predecessor. Only parent links are used to climb.
pub fn step<T>(nodes: &Nodes<T>, handle: Handle, side: Side) -> Link {
    if let Some(child) = nodes[handle].child(side) {
        return Some(extreme_node(nodes, child, side.opposite()));
    }

    let mut curr = handle;
    while is_son(nodes, curr, side) {
        curr = nodes[curr].parent?;
    }
    nodes[curr].parent
}

pub fn successor<T>(nodes: &Nodes<T>, handle: Handle) -> Link {
    step(nodes, handle, Side::Right)
}

pub fn predecessor<T>(nodes: &Nodes<T>, handle: Handle) -> Link {
    step(nodes, handle, Side::Left)
}
