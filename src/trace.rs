//! Tracing untuk debugging wait/notify di queue.
//!
//! Aktifkan dengan `--features tracing`. Tanpa feature tersebut semua macro
//! menjadi no-op, jadi hot path `put`/`take` tidak membayar apa-apa.

/// Pasang tracing subscriber (fmt layer + `EnvFilter`).
///
/// Filter default `blockq=trace`, bisa di-override lewat `RUST_LOG`.
/// Tidak melakukan apa-apa jika feature `tracing` tidak aktif.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockq=trace"));

    // try_init: test dan binary boleh memanggil ini lebih dari sekali
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .try_init();
}

#[cfg(not(feature = "tracing"))]
pub const fn init_tracing() {}

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug_noop as debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use trace_noop as trace;
