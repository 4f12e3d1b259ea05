//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly-linked list threaded through a slot arena, with a
/// key -> slot index on the side, so touch, remove and candidate lookup are
/// all O(1):
/// - Head = Least recently used
/// - Tail = Most recently used
#[derive(Debug)]
pub struct LruTracker<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }
}

impl<K> LruTracker<K>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as recently used (moves to tail).
    ///
    /// If key exists, unlinks it first then relinks at the tail.
    /// If key is new, allocates a slot at the tail.
    pub fn touch(&mut self, key: &K) {
        if let Some(&idx) = self.index.get(key) {
            self.unlink(idx);
            self.link_tail(idx);
            return;
        }

        let node = Node {
            key: key.clone(),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_tail(idx);
        self.index.insert(key.clone(), idx);
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if the key is not tracked.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(idx) = self.index.remove(key) {
            self.unlink(idx);
            self.slots[idx] = None;
            self.free.push(idx);
        }
    }

    // == Candidate ==
    /// Returns the least recently used key other than `protect`.
    ///
    /// Returns None if no such key is tracked.
    pub fn candidate(&self, protect: Option<&K>) -> Option<&K> {
        let head = self.node(self.head?);
        if protect == Some(&head.key) {
            return head.next.map(|idx| &self.node(idx).key);
        }
        Some(&head.key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.candidate(None)
    }

    // == Clear ==
    /// Forgets every tracked key.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.node(cursor?);
            cursor = node.next;
            Some(&node.key)
        })
    }

    fn node(&self, idx: usize) -> &Node<K> {
        // Indices reachable from head/tail/index always point at occupied slots.
        match self.slots[idx].as_ref() {
            Some(node) => node,
            None => unreachable!("lru slot {idx} is linked but empty"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        match self.slots[idx].as_mut() {
            Some(node) => node,
            None => unreachable!("lru slot {idx} is linked but empty"),
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn link_tail(&mut self, idx: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(idx);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}
