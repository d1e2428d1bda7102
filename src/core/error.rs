//! Error types untuk BlockingQueue dan SnapshotIter

/// Kesalahan pemakaian queue / iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Queue dibuat dengan kapasitas 0.
    #[error("queue capacity must be greater than zero")]
    ZeroCapacity,
    /// `try_next` dipanggil setelah `has_next()` bernilai false.
    #[error("trying to read past the end of the iterator")]
    IteratorExhausted,
}

/// Hasil gagal dari [`BlockingQueue::try_put`] dan [`BlockingQueue::put_timeout`].
///
/// Item yang ditolak selalu dikembalikan ke caller.
///
/// [`BlockingQueue::try_put`]: super::BlockingQueue::try_put
/// [`BlockingQueue::put_timeout`]: super::BlockingQueue::put_timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PutError<T> {
    /// Queue penuh saat `try_put`.
    #[error("the queue was full when attempting to put a new element")]
    Full(T),
    /// Tidak ada ruang kosong sampai deadline `put_timeout` lewat.
    #[error("timed out waiting for room in the queue")]
    Timeout(T),
}

impl<T> PutError<T> {
    /// Ambil kembali item yang ditolak.
    pub fn into_inner(self) -> T {
        match self {
            PutError::Full(item) | PutError::Timeout(item) => item,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, PutError::Full(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PutError::Timeout(_))
    }
}
