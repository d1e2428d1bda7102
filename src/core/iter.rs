//! Snapshot iterator untuk BlockingQueue
//!
//! Saat dibuat, iterator mencatat `head` dan `count` queue di bawah lock.
//! Setelah itu iterator hanya menggeser cursor miliknya sendiri; tidak ada
//! salinan item. Jumlah item yang dihasilkan selalu sama dengan `count` saat
//! snapshot, tapi NILAI yang dibaca mengikuti isi buffer saat itu:
//!
//! - slot yang sudah di-`take` thread lain menghasilkan `None`
//! - slot yang sudah ditimpa `put` (setelah wraparound) menghasilkan item baru
//!
//! Butuh nilai yang konsisten? Pakai [`BlockingQueue::snapshot`].

use std::iter::FusedIterator;

use super::blocking_queue::BlockingQueue;
use super::error::QueueError;

/// Iterator read-only atas posisi item pada saat [`BlockingQueue::iter`]
/// dipanggil.
///
/// Tidak untuk dipakai bersama oleh beberapa thread; setiap thread membuat
/// iterator sendiri.
pub struct SnapshotIter<'a, T> {
    queue: &'a BlockingQueue<T>,
    read_idx: usize,
    to_read: usize,
}

impl<'a, T> SnapshotIter<'a, T> {
    pub(super) fn new(queue: &'a BlockingQueue<T>, head: usize, count: usize) -> Self {
        Self {
            queue,
            read_idx: head,
            to_read: count,
        }
    }

    /// `true` selama masih ada posisi yang belum dibaca. Tanpa lock.
    #[inline(always)]
    pub fn has_next(&self) -> bool {
        self.to_read > 0
    }

    /// Sisa posisi yang belum dibaca.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.to_read
    }
}

impl<'a, T: Clone> SnapshotIter<'a, T> {
    /// Baca posisi berikutnya.
    ///
    /// `Ok(None)` berarti slot tersebut sudah dikosongkan oleh `take`/`poll`
    /// setelah snapshot dibuat.
    ///
    /// # Errors
    /// [`QueueError::IteratorExhausted`] jika dipanggil setelah
    /// `has_next()` bernilai false.
    pub fn try_next(&mut self) -> Result<Option<T>, QueueError> {
        if self.to_read == 0 {
            return Err(QueueError::IteratorExhausted);
        }

        let item = self.queue.read_slot(self.read_idx);
        self.to_read -= 1;
        self.read_idx += 1;
        if self.read_idx == self.queue.capacity() {
            self.read_idx = 0;
        }
        Ok(item)
    }
}

impl<'a, T: Clone> Iterator for SnapshotIter<'a, T> {
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.to_read, Some(self.to_read))
    }
}

impl<'a, T: Clone> ExactSizeIterator for SnapshotIter<'a, T> {}

impl<'a, T: Clone> FusedIterator for SnapshotIter<'a, T> {}

impl<'a, T> std::fmt::Debug for SnapshotIter<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotIter")
            .field("read_idx", &self.read_idx)
            .field("to_read", &self.to_read)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterates_in_fifo_order() {
        let q = BlockingQueue::new(5);
        q.put(1);
        q.put(2);
        q.put(3);

        let mut it = q.iter();
        assert_eq!(it.remaining(), 3);
        assert!(it.has_next());
        assert_eq!(it.try_next(), Ok(Some(1)));
        assert_eq!(it.try_next(), Ok(Some(2)));
        assert_eq!(it.try_next(), Ok(Some(3)));
        assert!(!it.has_next());
        assert_eq!(it.try_next(), Err(QueueError::IteratorExhausted));

        // Iterasi tidak mengubah isi queue
        assert_eq!(q.size(), 3);
    }

    #[test]
    fn test_empty_iterator_exhausted() {
        let q: BlockingQueue<u8> = BlockingQueue::new(1);
        let mut it = q.iter();

        assert!(!it.has_next());
        assert_eq!(it.len(), 0);
        assert_eq!(it.try_next(), Err(QueueError::IteratorExhausted));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_iterates_across_wraparound() {
        let q = BlockingQueue::new(3);
        q.put(0);
        q.put(1);
        assert_eq!(q.take(), 0);
        assert_eq!(q.take(), 1);

        // head = 2, isi melewati batas buffer
        q.put(10);
        q.put(11);
        q.put(12);

        let items: Vec<u32> = q.iter().flatten().collect();
        assert_eq!(items, vec![10, 11, 12]);
    }

    #[test]
    fn test_count_fixed_at_creation() {
        let q = BlockingQueue::new(4);
        q.put("a");
        q.put("b");

        let mut it = q.iter();
        q.put("c");

        assert_eq!(it.next(), Some(Some("a")));
        assert_eq!(it.next(), Some(Some("b")));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_reads_live_slots() {
        let q = BlockingQueue::new(2);
        q.put(1);
        q.put(2);

        let mut it = q.iter();

        // Slot pertama dikosongkan lalu ditimpa setelah wraparound
        assert_eq!(q.take(), 1);
        q.put(3);
        assert_eq!(it.try_next(), Ok(Some(3)));
        assert_eq!(it.try_next(), Ok(Some(2)));
        assert!(!it.has_next());
    }

    #[test]
    fn test_vacated_slot_yields_none() {
        let q = BlockingQueue::new(3);
        q.put('x');
        q.put('y');

        let mut it = q.iter();
        assert_eq!(q.poll(), Some('x'));

        assert_eq!(it.try_next(), Ok(None));
        assert_eq!(it.try_next(), Ok(Some('y')));
        assert_eq!(it.try_next(), Err(QueueError::IteratorExhausted));
    }
}
