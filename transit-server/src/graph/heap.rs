//! Binary heap priority queue with a pluggable ordering.
//!
//! The ordering decides which element sits at the top. A `Compare`
//! returns `true` when its first argument must sit *below* the second:
//! [`Less`] therefore keeps the largest element on top (a max-heap) and
//! [`Greater`] keeps the smallest on top (a min-heap).

/// Strict ordering used to arrange a [`PriorityQueue`].
pub trait Compare<T> {
    /// Returns true if `parent` must be moved below `child`.
    fn sinks(&self, parent: &T, child: &T) -> bool;
}

/// Natural `<` ordering. Produces a max-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Less;

/// Natural `>` ordering. Produces a min-heap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greater;

impl<T: Ord> Compare<T> for Less {
    fn sinks(&self, parent: &T, child: &T) -> bool {
        parent < child
    }
}

impl<T: Ord> Compare<T> for Greater {
    fn sinks(&self, parent: &T, child: &T) -> bool {
        parent > child
    }
}

/// Priority queue backed by a dense vector.
///
/// `push` and `pop` are O(log n); `top`, `len` and `is_empty` are O(1).
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, C = Less> {
    items: Vec<T>,
    order: C,
}

/// Heap yielding the largest element first.
pub type MaxHeap<T> = PriorityQueue<T, Less>;

/// Heap yielding the smallest element first.
pub type MinHeap<T> = PriorityQueue<T, Greater>;

impl<T, C: Compare<T> + Default> PriorityQueue<T, C> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::with_order(C::default())
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            order: C::default(),
        }
    }
}

impl<T, C: Compare<T> + Default> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Compare<T>> PriorityQueue<T, C> {
    /// Create an empty queue arranged by `order`.
    pub fn with_order(order: C) -> Self {
        Self {
            items: Vec::new(),
            order,
        }
    }

    /// Insert an element.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the top element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.items.len().checked_sub(1)?;
        self.items.swap(0, last);
        let top = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// The element `pop` would return next.
    pub fn top(&self) -> Option<&T> {
        self.items.first()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.order.sinks(&self.items[parent], &self.items[child]) {
                break;
            }
            self.items.swap(parent, child);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.items.len();
        loop {
            let mut child = parent * 2 + 1;
            if child >= len {
                break;
            }
            if child + 1 < len && self.order.sinks(&self.items[child], &self.items[child + 1]) {
                child += 1;
            }
            if !self.order.sinks(&self.items[parent], &self.items[child]) {
                break;
            }
            self.items.swap(parent, child);
            parent = child;
        }
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for PriorityQueue<T, C> {
    /// Heapify in O(n) by sifting down from the last internal node.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self {
            items: iter.into_iter().collect(),
            order: C::default(),
        };
        for parent in (0..queue.items.len() / 2).rev() {
            queue.sift_down(parent);
        }
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue() {
        let mut q: MinHeap<u32> = MinHeap::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.top(), None);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn min_heap_pops_ascending() {
        let mut q = MinHeap::new();
        for x in [5, 1, 4, 1, 3, 9, 2] {
            q.push(x);
        }
        assert_eq!(q.len(), 7);
        assert_eq!(q.top(), Some(&1));

        let mut out = Vec::new();
        while let Some(x) = q.pop() {
            out.push(x);
        }
        assert_eq!(out, vec![1, 1, 2, 3, 4, 5, 9]);
    }

    #[test]
    fn max_heap_pops_descending() {
        let mut q = MaxHeap::new();
        for x in [5, 1, 4, 3] {
            q.push(x);
        }
        assert_eq!(q.pop(), Some(5));
        assert_eq!(q.pop(), Some(4));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), Some(1));
        assert!(q.is_empty());
    }

    #[test]
    fn tuples_order_by_first_then_second() {
        let mut q = MinHeap::new();
        q.push((3, 'c'));
        q.push((1, 'b'));
        q.push((1, 'a'));
        assert_eq!(q.pop(), Some((1, 'a')));
        assert_eq!(q.pop(), Some((1, 'b')));
        assert_eq!(q.pop(), Some((3, 'c')));
    }

    #[test]
    fn from_iter_heapifies() {
        let q: MaxHeap<i32> = vec![2, 8, -1, 7, 7, 0].into_iter().collect();
        assert_eq!(q.top(), Some(&8));
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn interleaved_push_pop() {
        let mut q = MinHeap::with_capacity(4);
        q.push(10);
        q.push(4);
        assert_eq!(q.pop(), Some(4));
        q.push(6);
        q.push(1);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(6));
        assert_eq!(q.pop(), Some(10));
        assert_eq!(q.pop(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Draining a min-heap yields the input sorted ascending
        #[test]
        fn min_heap_sorts(values in proptest::collection::vec(any::<i64>(), 0..200)) {
            let mut q = MinHeap::new();
            for v in &values {
                q.push(*v);
            }
            let mut drained = Vec::with_capacity(values.len());
            while let Some(v) = q.pop() {
                drained.push(v);
            }
            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(drained, expected);
        }

        /// Heapified max-heap drains in descending order
        #[test]
        fn heapify_then_drain(values in proptest::collection::vec(any::<u16>(), 0..200)) {
            let mut q: MaxHeap<u16> = values.iter().copied().collect();
            let mut drained = Vec::with_capacity(values.len());
            while let Some(v) = q.pop() {
                drained.push(v);
            }
            let mut expected = values.clone();
            expected.sort_by(|a, b| b.cmp(a));
            prop_assert_eq!(drained, expected);
        }
    }
}
