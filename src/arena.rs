//! Chunked allocator that owns the nodes of a tree.

use crate::error::{Error, Result};
use log::warn;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// Number of objects per chunk used by `TypedArena::default()`.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// A copyable reference to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone, Debug)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that only stores a single type of object and hands out `Handle`s to them.
///
/// Objects live in fixed-size chunks, so growing the arena never moves existing objects. Freed
/// blocks are threaded onto a free list and reused by later allocations. Handles stay valid until
/// the object they refer to is freed or the arena is cleared. Dropping or clearing the arena
/// releases every object without recursion, regardless of how the objects refer to each other.
///
/// # Examples
///
/// ```
/// use redblack_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` that stores `chunk_size` objects per chunk. A
    /// `chunk_size` of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert_eq!(arena.chunk_size(), 1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    /// Returns the number of objects stored per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn place(&mut self, value: T) -> Handle {
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_index = self.chunks.len() - 1;
                let chunk = &mut self.chunks[chunk_index];
                chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index,
                    block_index: chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
            },
        }
    }

    /// Allocates an object in the arena and returns its `Handle`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(2);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.place(value)
    }

    /// Allocates an object in the arena, returning `Error::AllocationFailure` instead of aborting
    /// if a new chunk cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(2);
    /// let x = arena.try_allocate("a").unwrap();
    /// assert_eq!(arena[x], "a");
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Handle> {
        if self.len == self.capacity {
            let mut chunk = Vec::new();
            if chunk.try_reserve_exact(self.chunk_size).is_err()
                || self.chunks.try_reserve(1).is_err()
            {
                warn!(
                    "Could not reserve a chunk of {} blocks with {} blocks live.",
                    self.chunk_size, self.len,
                );
                return Err(Error::AllocationFailure);
            }
            self.chunks.push(chunk);
            self.capacity += self.chunk_size;
        }
        Ok(self.place(value))
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` refers to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(next_handle) => {
                self.chunks[handle.chunk_index][handle.block_index] = Block::Vacant(next_handle);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    /// Drops every object in the arena and releases its chunks. Every outstanding `Handle` is
    /// invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }

    /// Returns an immutable reference to an object in the arena, or `None` if `handle` does not
    /// refer to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if `handle` does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};
    use crate::error::Error;

    fn handle(chunk_index: usize, block_index: usize) -> Handle {
        Handle {
            chunk_index,
            block_index,
        }
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(16);
        arena.free(handle(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(16);
        let x = arena.allocate(0);
        arena.free(x);
        arena.free(x);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new(16);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(0, 2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(1, 0));
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        assert_eq!(arena.chunk_size(), 1);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(1, 0));
    }

    #[test]
    fn test_try_allocate() {
        let mut arena = TypedArena::new(1);
        assert_eq!(arena.try_allocate(0), Ok(handle(0, 0)));
        assert_eq!(arena.try_allocate(1), Ok(handle(1, 0)));
        assert_eq!(arena[handle(1, 0)], 1);
    }

    #[test]
    fn test_try_allocate_failure() {
        let mut arena: TypedArena<u64> = TypedArena::new(usize::max_value());
        assert_eq!(arena.try_allocate(0), Err(Error::AllocationFailure));
        assert!(arena.is_empty());
        assert_eq!(arena.get(handle(0, 0)), None);
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new(16);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(x), 0);
        assert_eq!(arena.free(y), 1);
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(2), y);
        assert_eq!(arena.allocate(3), x);
        assert_eq!(arena.allocate(4), handle(0, 2));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(16);
        let x = arena.allocate(0);
        arena.free(x);
        assert_eq!(arena.get(x), None);
        assert_eq!(arena.get_mut(x), None);
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(16);
        assert_eq!(arena.get(handle(0, 0)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(16);
        let x = arena.allocate(0);
        *arena.get_mut(x).unwrap() = 1;
        assert_eq!(arena.get(x), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        for i in 0..5 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(7), handle(0, 0));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut arena = TypedArena::new(16);
        let x = arena.allocate(0);
        let mut copy = arena.clone();
        copy[x] = 1;
        assert_eq!(arena[x], 0);
        assert_eq!(copy[x], 1);
    }
}
