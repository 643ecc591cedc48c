//! Shared handle for hosts that drive one timer from several threads.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::timer::PerformanceTimer;

/// Cloneable handle serializing all access to one [`PerformanceTimer`].
///
/// Every operation takes the lock for its whole duration, so each call sees
/// and leaves a consistent timer.
///
/// # Example
///
/// ```rust
/// use perf_timer::{ManualClock, MemorySink, PerformanceTimer, SharedTimer};
///
/// let shared = SharedTimer::new(PerformanceTimer::new(ManualClock::new(), MemorySink::new()));
/// let worker = shared.clone();
///
/// std::thread::spawn(move || worker.with(|timer| timer.start()))
///     .join()
///     .expect("worker thread");
///
/// assert!(shared.lock().is_started());
/// ```
#[derive(Debug, Clone)]
pub struct SharedTimer {
    inner: Arc<Mutex<PerformanceTimer>>,
}

impl SharedTimer {
    /// Wrap `timer` for shared use
    pub fn new(timer: PerformanceTimer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(timer)),
        }
    }

    /// Lock the timer until the guard is dropped
    pub fn lock(&self) -> MutexGuard<'_, PerformanceTimer> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the timer
    pub fn with<R>(&self, f: impl FnOnce(&mut PerformanceTimer) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl Default for SharedTimer {
    fn default() -> Self {
        Self::new(PerformanceTimer::default())
    }
}

impl From<PerformanceTimer> for SharedTimer {
    fn from(timer: PerformanceTimer) -> Self {
        Self::new(timer)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::clock::ManualClock;
    use crate::sink::MemorySink;

    #[test]
    fn threads_share_one_timer() {
        let sink = MemorySink::new();
        let shared = SharedTimer::new(PerformanceTimer::new(ManualClock::new(), sink.clone()));
        shared.with(PerformanceTimer::start);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let worker = shared.clone();
                thread::spawn(move || {
                    let name = format!("t{i}");
                    worker.with(|timer| {
                        timer.mark(&name);
                        timer.measure(&name, &name, &name)
                    })
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("worker thread")
                .expect("mark recorded in the same critical section");
        }

        let timer = shared.lock();
        assert_eq!(timer.measures().count(), 4);
        assert!(timer.measures().all(|m| m.duration_ms == 0.0));
        assert!(sink.is_empty());
    }

    #[test]
    fn from_timer() {
        let shared: SharedTimer = PerformanceTimer::new(ManualClock::new(), MemorySink::new()).into();
        assert!(!shared.lock().is_started());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn handles_are_thread_safe() {
        assert_send_sync::<SharedTimer>();
        assert_send_sync::<PerformanceTimer>();
    }
}
