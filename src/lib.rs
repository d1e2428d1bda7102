//! blockq - Bounded Blocking FIFO Queue
//!
//! Arsitektur:
//! - Circular buffer berkapasitas tetap
//! - Mutex + Condvar (parking_lot) untuk semantik blocking
//! - Snapshot iterator tanpa salinan item
//!
//! ```
//! use blockq::BlockingQueue;
//!
//! let q = BlockingQueue::new(2);
//! q.put("a");
//! q.put("b");
//! assert_eq!(q.poll(), Some("a"));
//! assert_eq!(q.take(), "b");
//! assert_eq!(q.poll(), None);
//! ```

pub mod core;
pub mod trace;

pub use crate::core::{BlockingQueue, PutError, QueueError, SnapshotIter};
