pub mod heap;

pub use heap::{Comparator, PriorityQueue, QueueError, MIN_CAPACITY};
