//! Bounded Blocking FIFO Queue
//!
//! Circular buffer berkapasitas tetap yang dijaga satu `Mutex` dan dua
//! `Condvar`: `not_full` (ada ruang) dan `not_empty` (ada item).
//! Semua operasi serial lewat lock yang sama; tidak ada lock-free trick di sini.

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::error::{PutError, QueueError};
use super::iter::SnapshotIter;
use crate::trace::{debug, trace};

/// State circular buffer. Hanya disentuh saat memegang lock queue.
pub(super) struct Ring<T> {
    slots: Box<[Option<T>]>,
    pub(super) head: usize,
    tail: usize,
    pub(super) count: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[inline(always)]
    fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Index berikutnya secara circular.
    #[inline(always)]
    pub(super) fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() {
            0
        } else {
            next
        }
    }

    #[inline(always)]
    pub(super) fn slot(&self, index: usize) -> Option<&T> {
        self.slots[index].as_ref()
    }

    /// Simpan item di `tail`. Return `true` jika ring sebelumnya kosong.
    fn push_back(&mut self, item: T) -> bool {
        debug_assert!(!self.is_full());

        let was_empty = self.count == 0;
        self.slots[self.tail] = Some(item);
        self.tail = self.advance(self.tail);
        self.count += 1;
        was_empty
    }

    /// Pindahkan item dari `head` keluar; slot dikosongkan supaya queue
    /// tidak lagi memegang ownership item tersebut.
    fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let item = self.slots[self.head].take();
        self.head = self.advance(self.head);
        self.count -= 1;
        debug_assert_eq!(self.tail, (self.head + self.count) % self.slots.len());
        item
    }
}

/// Bounded blocking FIFO queue.
///
/// - `put` menunggu selama queue penuh
/// - `take` menunggu selama queue kosong
/// - `poll` / `peek` tidak pernah menunggu
///
/// Share antar thread lewat `Arc<BlockingQueue<T>>`. Tidak ada mekanisme
/// close: shutdown harus dikoordinasikan caller (misalnya dengan sentinel).
pub struct BlockingQueue<T> {
    ring: Mutex<Ring<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BlockingQueue<T> {
    /// Membuat queue baru dengan kapasitas tetap.
    ///
    /// Alokasi buffer hanya terjadi sekali di sini.
    ///
    /// # Panics
    /// Panic jika `capacity == 0`. Gunakan [`BlockingQueue::try_new`] untuk
    /// versi yang mengembalikan error.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    /// Seperti [`BlockingQueue::new`], tapi kapasitas 0 dikembalikan sebagai
    /// [`QueueError::ZeroCapacity`].
    pub fn try_new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }

        debug!(capacity, "blocking queue created");

        Ok(Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        })
    }

    /// Masukkan item, block selama queue penuh.
    ///
    /// Hanya transisi kosong -> tidak kosong yang membangunkan satu consumer;
    /// consumer itu sendiri meneruskan wakeup jika masih ada item (lihat `take`).
    pub fn put(&self, item: T) {
        let mut ring = self.ring.lock();
        while ring.is_full() {
            trace!(capacity = self.capacity, "queue full, waiting for room");
            self.not_full.wait(&mut ring);
        }
        self.enqueue_locked(&mut ring, item);
    }

    /// Versi non-blocking dari `put`. Item dikembalikan lewat
    /// [`PutError::Full`] jika queue penuh.
    pub fn try_put(&self, item: T) -> Result<(), PutError<T>> {
        let mut ring = self.ring.lock();
        if ring.is_full() {
            return Err(PutError::Full(item));
        }
        self.enqueue_locked(&mut ring, item);
        Ok(())
    }

    /// `put` dengan batas waktu. Jika tidak ada ruang sampai `timeout` lewat,
    /// item dikembalikan lewat [`PutError::Timeout`].
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), PutError<T>> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.put(item);
                return Ok(());
            }
        };

        let mut ring = self.ring.lock();
        while ring.is_full() {
            if self.not_full.wait_until(&mut ring, deadline).timed_out() {
                if ring.is_full() {
                    trace!(?timeout, "put timed out");
                    return Err(PutError::Timeout(item));
                }
                break;
            }
        }
        self.enqueue_locked(&mut ring, item);
        Ok(())
    }

    /// Ambil item paling lama, block selama queue kosong.
    pub fn take(&self) -> T {
        let mut ring = self.ring.lock();
        loop {
            if let Some(item) = self.dequeue_locked(&mut ring) {
                return item;
            }
            trace!("queue empty, waiting for item");
            self.not_empty.wait(&mut ring);
        }
    }

    /// `take` dengan batas waktu. `None` jika queue tetap kosong sampai
    /// `timeout` lewat.
    pub fn take_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => return Some(self.take()),
        };

        let mut ring = self.ring.lock();
        loop {
            if let Some(item) = self.dequeue_locked(&mut ring) {
                return Some(item);
            }
            if self.not_empty.wait_until(&mut ring, deadline).timed_out() {
                let item = self.dequeue_locked(&mut ring);
                if item.is_none() {
                    trace!(?timeout, "take timed out");
                }
                return item;
            }
        }
    }

    /// Ambil item paling lama tanpa menunggu. `None` jika queue kosong.
    pub fn poll(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        self.dequeue_locked(&mut ring)
    }

    /// Jumlah item saat ini. Bisa langsung basi jika ada thread lain
    /// yang sedang put/take.
    pub fn size(&self) -> usize {
        self.ring.lock().count
    }

    /// Alias untuk [`BlockingQueue::size`].
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.lock().count == 0
    }

    pub fn is_full(&self) -> bool {
        self.ring.lock().is_full()
    }

    /// Kapasitas tetap queue (tanpa lock).
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterator snapshot atas item yang ada saat ini.
    ///
    /// Snapshot hanya mengunci posisi awal (`head`) dan jumlah item; nilai
    /// dibaca langsung dari buffer saat iterasi. Lihat [`SnapshotIter`] untuk
    /// konsekuensinya jika queue dimutasi selama iterasi.
    pub fn iter(&self) -> SnapshotIter<'_, T> {
        let ring = self.ring.lock();
        SnapshotIter::new(self, ring.head, ring.count)
    }

    /// Dipakai `SnapshotIter`: baca satu slot di bawah lock.
    pub(super) fn read_slot(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.ring.lock().slot(index).cloned()
    }

    fn enqueue_locked(&self, ring: &mut Ring<T>, item: T) {
        if ring.push_back(item) {
            // Wake up eventual reader waiting for next item
            self.not_empty.notify_one();
        }
    }

    fn dequeue_locked(&self, ring: &mut Ring<T>) -> Option<T> {
        let item = ring.pop_front()?;
        self.not_full.notify_one();
        // put hanya signal saat transisi dari kosong; teruskan ke consumer
        // berikutnya selama masih ada item
        if ring.count > 0 {
            self.not_empty.notify_one();
        }
        Some(item)
    }
}

impl<T: Clone> BlockingQueue<T> {
    /// Item paling lama tanpa mengeluarkannya. Tidak mengubah state.
    pub fn peek(&self) -> Option<T> {
        let ring = self.ring.lock();
        if ring.count == 0 {
            return None;
        }
        ring.slot(ring.head).cloned()
    }

    /// Salinan semua item (urutan FIFO) yang diambil di bawah lock.
    ///
    /// Berbeda dengan [`BlockingQueue::iter`], nilai di sini konsisten dengan
    /// isi queue pada saat pemanggilan, dengan biaya satu alokasi.
    pub fn snapshot(&self) -> Vec<T> {
        let ring = self.ring.lock();
        let mut items = Vec::with_capacity(ring.count);
        let mut index = ring.head;
        for _ in 0..ring.count {
            if let Some(item) = ring.slot(index) {
                items.push(item.clone());
            }
            index = ring.advance(index);
        }
        items
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("capacity", &self.capacity)
            .field("size", &self.size())
            .finish()
    }
}
