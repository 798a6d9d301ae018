use std::cmp::Ordering;
use std::fmt;

use log::debug;

/// Minimal capacity accepted when building a new queue.
pub const MIN_CAPACITY: usize = 16;

pub type Comparator<T> = fn(&T, &T) -> Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    InvalidCapacity { requested: usize, minimum: usize },
    OutOfMemory,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueueError::InvalidCapacity { requested, minimum } => write!(
                f,
                "bad capacity {}, minimum priority queue capacity is {}",
                requested, minimum
            ),
            QueueError::OutOfMemory => write!(f, "priority queue out of memory"),
        }
    }
}

/// Priority queue implemented as a binary heap over a growable array.
///
/// The comparator decides the priority order: the item which compares
/// `Less` than every other item sits on the peek. Items are stored by
/// value and handed back on `poll`; the queue never clones payloads.
#[derive(Clone)]
pub struct PriorityQueue<T> {
    items: Vec<T>,
    capacity: usize,
    min_capacity: usize,
    comparator: Comparator<T>,
}

impl<T> PriorityQueue<T> {
    /// Builds an empty queue with the requested capacity, which also
    /// becomes the floor below which `trim_to_size` never shrinks.
    pub fn new(capacity: usize, comparator: Comparator<T>) -> Result<Self, QueueError> {
        if capacity < MIN_CAPACITY {
            return Err(QueueError::InvalidCapacity {
                requested: capacity,
                minimum: MIN_CAPACITY,
            });
        }

        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::OutOfMemory)?;

        Ok(Self {
            items,
            capacity,
            min_capacity: capacity,
            comparator,
        })
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advertised slot count, always at least `size() + 1` and never
    /// below the construction floor.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Item on the peek without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn insert(&mut self, item: T) -> Result<(), QueueError> {
        // @NOTE: 2 = 1 for the spare slot + 1 for the item itself
        self.ensure_capacity(self.items.len() + 2)?;

        self.items.push(item);
        self.repair_bottom(self.items.len() - 1);

        Ok(())
    }

    /// Removes and returns the item on the peek.
    pub fn poll(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);

        let item = self.items.pop();
        self.repair_top(0);

        item
    }

    /// Shrinks the backing array down to the inserted items. Capacity
    /// never drops below the construction floor, and a failed
    /// reallocation leaves the queue untrimmed but intact.
    pub fn trim_to_size(&mut self) -> Result<(), QueueError> {
        let target = usize::max(self.items.len() + 1, self.min_capacity);

        if self.capacity > target {
            let mut trimmed = Vec::new();
            trimmed
                .try_reserve_exact(target)
                .map_err(|_| QueueError::OutOfMemory)?;
            trimmed.append(&mut self.items);

            debug!("Trim capacity from {} down to {}", self.capacity, target);

            self.items = trimmed;
            self.capacity = target;
        }

        Ok(())
    }

    /// Hands every stored item to the destructor and leaves the queue
    /// empty. The backing array is kept for reuse.
    pub fn drain_with<F>(&mut self, mut destructor: F)
    where
        F: FnMut(T),
    {
        for item in self.items.drain(..) {
            destructor(item);
        }
    }

    /// Renders the content in array order, not in priority order.
    pub fn format_with<F>(&self, to_string: F) -> String
    where
        F: Fn(&T) -> String,
    {
        let mut out = format!("{} [", self.items.len());

        for item in &self.items {
            out.push(' ');
            out.push_str(&to_string(item));
            out.push(' ');
        }

        out.push(']');
        out
    }

    fn ensure_capacity(&mut self, min_needed: usize) -> Result<(), QueueError> {
        if min_needed <= self.capacity {
            return Ok(());
        }

        // @NOTE: growth formula taken over Java ArrayList
        let grown = usize::max(min_needed, self.capacity * 3 / 2 + 1);

        self.items
            .try_reserve_exact(grown - self.items.len())
            .map_err(|_| QueueError::OutOfMemory)?;

        debug!("Grow capacity from {} to {}", self.capacity, grown);
        self.capacity = grown;

        Ok(())
    }

    fn repair_bottom(&mut self, mut key: usize) {
        while key > 0 {
            let parent = (key - 1) / 2;

            if (self.comparator)(&self.items[parent], &self.items[key]) != Ordering::Greater {
                break;
            }

            self.items.swap(parent, key);
            key = parent;
        }
    }

    fn repair_top(&mut self, mut key: usize) {
        let size = self.items.len();

        while 2 * key + 1 < size {
            let mut child = 2 * key + 1;

            // @NOTE: left child wins the tie
            if child + 1 < size
                && (self.comparator)(&self.items[child], &self.items[child + 1])
                    == Ordering::Greater
            {
                child += 1;
            }

            if (self.comparator)(&self.items[key], &self.items[child]) != Ordering::Greater {
                break;
            }

            self.items.swap(key, child);
            key = child;
        }
    }
}
