//! Core module: Bounded Blocking Queue
//!
//! Prinsip desain:
//! - Fixed capacity: buffer dialokasikan sekali saat init, tidak pernah resize
//! - Satu lock: semua state dijaga satu Mutex + dua Condvar
//! - Backpressure: producer menunggu saat penuh, consumer menunggu saat kosong

mod blocking_queue;
mod error;
mod iter;

pub use blocking_queue::BlockingQueue;
pub use error::{PutError, QueueError};
pub use iter::SnapshotIter;
