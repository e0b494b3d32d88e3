//! Binary min-heap with a caller-supplied ordering
//!
//! There is no decrease-key. Callers that need it insert the item again
//! with its new priority and skip stale entries when they come out.

use crate::core_types::FieldError;
use std::cmp::Ordering;

/// Min-heap ordered by `compare`
pub struct PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    items: Vec<T>,
    compare: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Empty queue ordered by `compare`
    pub fn new(compare: F) -> Self {
        Self::with_capacity(0, compare)
    }

    /// Empty queue with room for `capacity` items before reallocating
    pub fn with_capacity(capacity: usize, compare: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Number of queued items, stale duplicates included
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items are queued
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Smallest item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Remove every item, keeping the allocation
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Add an item, O(log n)
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest item, O(log n)
    ///
    /// # Errors
    /// Returns [`FieldError::EmptyQueue`] if the queue is empty
    pub fn remove_min(&mut self) -> Result<T, FieldError> {
        if self.items.is_empty() {
            return Err(FieldError::EmptyQueue);
        }

        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.less(child, parent) {
                break;
            }
            self.items.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let min = if right < len && self.less(right, left) {
                right
            } else {
                left
            };

            if !self.less(min, parent) {
                break;
            }
            self.items.swap(min, parent);
            parent = min;
        }
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.items.len())
            .field("min", &self.items.first())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_min_order() {
        let mut queue = PriorityQueue::new(|a: &i32, b: &i32| a.cmp(b));
        for v in [5, 1, 4, 1, 3, 9, 2] {
            queue.insert(v);
        }
        assert_eq!(queue.peek(), Some(&1));

        let mut out = Vec::new();
        while !queue.is_empty() {
            out.push(queue.remove_min().unwrap());
        }
        assert_eq!(out, vec![1, 1, 2, 3, 4, 5, 9]);
    }

    #[test]
    fn test_empty_queue_error() {
        let mut queue = PriorityQueue::new(|a: &f64, b: &f64| a.total_cmp(b));
        assert_eq!(queue.remove_min(), Err(FieldError::EmptyQueue));
        queue.insert(1.0);
        queue.clear();
        assert_eq!(queue.len(), 0);
        assert!(queue.remove_min().is_err());
    }

    #[test]
    fn test_custom_order_max_heap() {
        let mut queue = PriorityQueue::with_capacity(4, |a: &(u8, char), b: &(u8, char)| b.0.cmp(&a.0));
        queue.insert((1, 'a'));
        queue.insert((7, 'b'));
        queue.insert((3, 'c'));
        assert_eq!(queue.remove_min().unwrap(), (7, 'b'));
        assert_eq!(queue.remove_min().unwrap(), (3, 'c'));
    }
}
