//! Progress reporting for long-running document analysis.
//!
//! Sinks are fire-and-forget: the pipeline never waits on a consumer and
//! a slow or panicking closure cannot change the analysis outcome.

use std::sync::atomic::{AtomicU8, Ordering};

/// Receives coarse percentage updates (0..=100) as the pipeline advances.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, percent: u8);
}

/// Discards all updates.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_progress(&self, _percent: u8) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

/// Wraps a sink and enforces the monotonic, capped-at-100 contract.
/// Out-of-order worker completions can otherwise report stale figures.
pub(crate) struct MonotonicProgress<'a> {
    sink: &'a dyn ProgressSink,
    last: AtomicU8,
}

impl<'a> MonotonicProgress<'a> {
    pub(crate) fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            last: AtomicU8::new(0),
        }
    }

    pub(crate) fn report(&self, percent: u8) {
        let percent = percent.min(100);
        let previous = self.last.fetch_max(percent, Ordering::SeqCst);
        if percent > previous {
            self.sink.on_progress(percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<u8>>);

    impl ProgressSink for Recorder {
        fn on_progress(&self, percent: u8) {
            self.0.lock().unwrap().push(percent);
        }
    }

    #[test]
    fn suppresses_regressions_and_repeats() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        let progress = MonotonicProgress::new(&recorder);
        for p in [10, 20, 15, 20, 60, 100] {
            progress.report(p);
        }
        assert_eq!(*recorder.0.lock().unwrap(), vec![10, 20, 60, 100]);
    }

    #[test]
    fn caps_at_one_hundred() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        let progress = MonotonicProgress::new(&recorder);
        progress.report(250);
        assert_eq!(*recorder.0.lock().unwrap(), vec![100]);
    }

    #[test]
    fn closure_is_a_sink() {
        let sink = |_p: u8| {};
        sink.on_progress(42);
    }
}
