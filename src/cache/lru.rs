//! LRU List Module
//!
//! Recency ordering for the cache, kept as a doubly linked list over a slot
//! arena so every reorder is O(1).

use crate::cache::CacheEntry;

// == LRU List ==
/// Entries ordered by access time.
///
/// - Head = most recently used
/// - Tail = least recently used
///
/// Entries are addressed by slot index. A removed entry's slot goes onto the
/// free list and is reused by the next insertion, so indices are only stable
/// while the entry is linked.
#[derive(Debug, Default)]
pub struct LruList {
    slots: Vec<Option<CacheEntry>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts an entry as most recently used and returns its slot.
    pub fn push_front(&mut self, mut entry: CacheEntry) -> usize {
        entry.prev = None;
        entry.next = None;

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Marks the entry in `idx` as most recently used.
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Unlinks and returns the entry in `idx`, freeing its slot.
    pub fn remove(&mut self, idx: usize) -> Option<CacheEntry> {
        self.slots.get(idx)?.as_ref()?;
        self.unlink(idx);
        let entry = self.slots[idx].take();
        self.free.push(idx);
        self.len -= 1;
        entry
    }

    // == Back ==
    /// Slot of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Returns the entry in `idx`.
    pub fn get(&self, idx: usize) -> Option<&CacheEntry> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Returns the entry in `idx` mutably.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut CacheEntry> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Check Links ==
    /// Walks the list in both directions and verifies that the links agree
    /// with each other and with the entry count.
    pub fn check_links(&self) -> std::result::Result<(), String> {
        let mut forward = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let entry = self
                .get(idx)
                .ok_or_else(|| format!("linked slot {idx} is empty"))?;
            if entry.prev != prev {
                return Err(format!(
                    "slot {idx} has prev {:?}, expected {:?}",
                    entry.prev, prev
                ));
            }
            forward += 1;
            if forward > self.len {
                return Err("forward walk exceeds entry count".to_string());
            }
            prev = cursor;
            cursor = entry.next;
        }
        if prev != self.tail {
            return Err(format!("walk ended at {prev:?}, tail is {:?}", self.tail));
        }
        if forward != self.len {
            return Err(format!("walked {forward} entries, len is {}", self.len));
        }

        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        if occupied != self.len || occupied + self.free.len() != self.slots.len() {
            return Err(format!(
                "{occupied} occupied and {} free slots do not add up to {} (len {})",
                self.free.len(),
                self.slots.len(),
                self.len
            ));
        }
        Ok(())
    }

    // == Link Helpers ==
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head.and_then(|h| self.slots[h].as_mut()) {
            Some(head) => head.prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev.and_then(|p| self.slots[p].as_mut()) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.slots[n].as_mut()) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Iterator over entries from most to least recently used.
pub struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn entry(key: &str) -> CacheEntry {
        CacheEntry::new(
            key.to_string(),
            format!("value_{key}"),
            Duration::from_secs(60),
            Instant::now(),
        )
    }

    fn keys(list: &LruList) -> Vec<&str> {
        list.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_lru_new() {
        let list = LruList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.back(), None);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.push_front(entry("c"));

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.back(), Some(a));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        list.push_front(entry("c"));

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back(), Some(b));
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_move_head_to_front_is_noop() {
        let mut list = LruList::new();

        list.push_front(entry("a"));
        let b = list.push_front(entry("b"));

        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "a"]);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_remove_middle_head_and_tail() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));
        let d = list.push_front(entry("d"));

        assert_eq!(list.remove(b).map(|e| e.key), Some("b".to_string()));
        assert_eq!(keys(&list), vec!["d", "c", "a"]);

        list.remove(d);
        assert_eq!(keys(&list), vec!["c", "a"]);

        list.remove(a);
        assert_eq!(keys(&list), vec!["c"]);
        assert_eq!(list.back(), Some(c));

        list.remove(c);
        assert!(list.is_empty());
        assert_eq!(list.back(), None);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_remove_empty_slot_returns_none() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        list.remove(a);

        assert!(list.remove(a).is_none());
        assert!(list.remove(42).is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = LruList::with_capacity(2);

        let a = list.push_front(entry("a"));
        list.push_front(entry("b"));
        list.remove(a);

        let c = list.push_front(entry("c"));
        assert_eq!(c, a);
        assert_eq!(keys(&list), vec!["c", "b"]);
        assert!(list.check_links().is_ok());
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = LruList::new();

        let a = list.push_front(entry("a"));
        let b = list.push_front(entry("b"));
        let c = list.push_front(entry("c"));

        // [c, b, a] -> a -> [a, c, b] -> c -> [c, a, b] -> b -> [b, c, a]
        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        assert_eq!(keys(&list), vec!["b", "c", "a"]);
        assert_eq!(list.back(), Some(a));
    }
}
