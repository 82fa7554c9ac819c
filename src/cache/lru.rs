//! LRU Recency List Module
//!
//! Arena-backed doubly-linked list that keeps cache slots in recency order.

// Null link marker.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<T> {
    item: Option<T>,
    prev: usize,
    next: usize,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Items live in a `Vec` arena and are addressed by slot index, so every
/// operation below is O(1):
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Freed slots are chained through `next` and reused by later pushes.
/// Slot indices handed out by [`RecencyList::push_front`] stay valid until
/// the item is removed or evicted.
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an item as most recently used and returns its slot index.
    pub fn push_front(&mut self, item: T) -> usize {
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.nodes[idx].next;
            self.nodes[idx] = Node {
                item: Some(item),
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.nodes.push(Node {
                item: Some(item),
                prev: NIL,
                next: NIL,
            });
            self.nodes.len() - 1
        };

        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Touch ==
    /// Marks a slot as recently used (moves it to the front).
    ///
    /// Vacant or out-of-range slots are ignored.
    pub fn touch(&mut self, idx: usize) {
        if self.head == idx || self.get(idx).is_none() {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Removes a slot from the list and returns its item.
    ///
    /// Returns None if the slot is not occupied.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        let item = self.nodes.get_mut(idx)?.item.take()?;
        self.unlink(idx);
        self.nodes[idx].next = self.free;
        self.free = idx;
        self.len -= 1;
        Some(item)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used item.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used item without touching it.
    pub fn peek_oldest(&self) -> Option<&T> {
        self.get(self.tail)
    }

    // == Slot Access ==
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.nodes.get(idx).and_then(|node| node.item.as_ref())
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.nodes.get_mut(idx).and_then(|node| node.item.as_mut())
    }

    // == Length ==
    /// Returns the number of tracked items.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every item and releases all slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    // == Iterate ==
    /// Iterates from most recently used to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.len,
        }
    }

    fn link_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        if prev != NIL {
            self.nodes[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.nodes[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }
}

// == Iterator ==
/// Most-recent-first iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == NIL {
            return None;
        }
        let node = &self.nodes[self.current];
        self.current = node.next;
        self.remaining -= 1;
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
