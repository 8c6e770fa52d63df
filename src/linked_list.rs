// src/linked_list.rs

//! Generic singly linked list.
//!
//! The list backs the per-action listener registry, but carries no
//! registry semantics of its own: it is an insertion-ordered collection with
//! O(1) append, O(n) remove-by-value and a borrowing, non-restartable
//! traversal.
//!
//! ## Storage
//!
//! Nodes live in a slot arena owned by the list. A node's `next` link is the
//! slot index of its successor, so every node is reachable from exactly one
//! predecessor (or is the head) and the chain cannot form cycles. Slots freed
//! by `remove` are recycled by later `add` calls; once the list becomes empty
//! the arena itself is released.
//!
//! Internal links are never handed out. Callers observe the list only through
//! [`LinkedList::iter`] and the by-value [`IntoIterator`] implementation.

use std::fmt;
use std::iter::FusedIterator;

/// A single list node.
#[derive(Clone)]
struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// Arena slot; vacant slots form an intrusive free list.
#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// Insertion-ordered singly linked list.
///
/// # Example
///
/// ```
/// use listener_transport::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.add("a");
/// list.add("b");
/// list.add("a");
///
/// // Only the first matching node is removed.
/// assert_eq!(list.remove(&"a"), Some("a"));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["b", "a"]);
/// ```
#[derive(Clone)]
pub struct LinkedList<T> {
    // ---
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> LinkedList<T> {
    // ---
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The value at the head of the list, if any.
    pub fn first(&self) -> Option<&T> {
        self.head.and_then(|index| self.node(index)).map(|node| &node.value)
    }

    /// Append `value` at the tail.
    ///
    /// Duplicates are permitted. When the list is empty the new node becomes
    /// the head.
    pub fn add(&mut self, value: T) {
        // ---
        let node = Node { value, next: None };

        let index = match self.take_free_slot() {
            Some(index) => {
                self.slots[index] = Slot::Occupied(node);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.node_mut(tail)) {
            Some(last) => last.next = Some(index),
            None => self.head = Some(index),
        }

        self.tail = Some(index);
        self.len += 1;
    }

    /// Remove the first value satisfying `predicate` and return it.
    ///
    /// The list is left unchanged when nothing matches.
    pub fn remove_first_by<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        // ---
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let node = self.node(index)?;
            let next = node.next;

            if predicate(&node.value) {
                return self.unlink(prev, index, next);
            }

            prev = Some(index);
            cursor = next;
        }

        None
    }

    /// Remove and return the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        // ---
        let index = self.head?;
        let next = self.node(index)?.next;
        self.unlink(None, index, next)
    }

    /// Drop every value.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
    }

    /// Borrowing traversal in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, index: usize) -> Option<&Node<T>> {
        match self.slots.get(index) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn take_free_slot(&mut self) -> Option<usize> {
        // ---
        let index = self.free?;
        match self.slots.get(index) {
            Some(Slot::Vacant { next_free }) => {
                self.free = *next_free;
                Some(index)
            }
            _ => None,
        }
    }

    /// Relink `prev` around `index` and vacate its slot.
    fn unlink(&mut self, prev: Option<usize>, index: usize, next: Option<usize>) -> Option<T> {
        // ---
        match prev.and_then(|prev| self.node_mut(prev)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }

        if self.tail == Some(index) {
            self.tail = prev;
        }

        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        let removed = std::mem::replace(&mut self.slots[index], vacant);
        self.free = Some(index);
        self.len -= 1;

        if self.len == 0 {
            self.clear();
        }

        match removed {
            Slot::Occupied(node) => Some(node.value),
            Slot::Vacant { .. } => None,
        }
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Remove the first value equal to `value` and return it.
    ///
    /// Equality is whatever `T: PartialEq` says it is; handle types that
    /// compare by identity (such as [`Listener`](crate::Listener)) therefore
    /// remove by identity. Absent values are not an error.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.remove_first_by(|stored| stored == value)
    }

    /// Returns `true` if some stored value equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|stored| stored == value)
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Borrowing iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // ---
        let list = self.list;
        let node = list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`LinkedList`].
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
