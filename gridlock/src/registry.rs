//! Thread identity registry.
//!
//! Assigns each participating thread a unique non-zero priority token, lazily
//! on first use. Tokens come from a single process-wide counter, so they are
//! unique across every grid in the process (but not across processes). Lower
//! tokens belong to earlier threads and carry *higher* priority in the
//! priority-blocking back-end's back-off rule.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_THREAD_ID: AtomicU32 = AtomicU32::new(0);

thread_local! {
    static THREAD_TOKEN: Cell<u32> = const { Cell::new(0) };
}

/// Priority token of the calling thread.
///
/// The first call from a thread draws a fresh id from the process-wide
/// counter and derives `1 + (id mod u32::MAX)`; later calls return the cached
/// value. The result is never zero (zero marks a free lock slot).
pub fn current_thread_token() -> u32 {
    THREAD_TOKEN.with(|token| {
        let cached = token.get();
        if cached != 0 {
            return cached;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        let fresh = 1 + (id % u32::MAX);
        token.set(fresh);
        fresh
    })
}
