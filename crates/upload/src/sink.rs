//! Progress sink trait and implementations.

use crate::error::UploadError;
use crate::types::{CompletionResponse, ProgressEvent};

/// Event receiver for one upload session.
///
/// A session emits zero or more `on_progress` calls followed by at most one
/// terminal call (`on_completed` or `on_error`). Initiation failures arrive
/// through `on_error` with an initiation-tagged `UploadError`.
pub trait ProgressSink: Send + Sync {
    /// Called once per acknowledged chunk.
    ///
    /// # Returns
    /// - `true` to continue the upload
    /// - `false` to cancel it before the next chunk
    fn on_progress(&self, progress: &ProgressEvent) -> bool;

    /// Called once when the store finalizes the object.
    fn on_completed(&self, response: &CompletionResponse);

    /// Called once when the session fails or is cancelled.
    fn on_error(&self, error: &UploadError);
}

/// A no-op sink that discards events and never cancels.
pub struct NoOpSink;

impl ProgressSink for NoOpSink {
    fn on_progress(&self, _progress: &ProgressEvent) -> bool {
        true
    }

    fn on_completed(&self, _response: &CompletionResponse) {}

    fn on_error(&self, _error: &UploadError) {}
}

/// A sink that forwards progress events to a closure.
///
/// Terminal events are logged; callers that need them implement
/// `ProgressSink` directly.
pub struct FnSink<F> {
    callback: F,
}

impl<F> FnSink<F>
where
    F: Fn(&ProgressEvent) -> bool + Send + Sync,
{
    /// Create a closure-based progress sink.
    ///
    /// # Arguments
    /// * `callback` - Closure that receives progress and returns whether to continue
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressSink for FnSink<F>
where
    F: Fn(&ProgressEvent) -> bool + Send + Sync,
{
    fn on_progress(&self, progress: &ProgressEvent) -> bool {
        (self.callback)(progress)
    }

    fn on_completed(&self, response: &CompletionResponse) {
        log::debug!("Upload completed (status {:?})", response.status);
    }

    fn on_error(&self, error: &UploadError) {
        log::warn!("Upload failed: {error}");
    }
}

/// Create a progress sink from a closure.
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(&ProgressEvent) -> bool + Send + Sync,
{
    FnSink::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn event(percent: f64) -> ProgressEvent {
        ProgressEvent {
            percent_complete: percent,
            eta_seconds: None,
            bytes_uploaded: 0,
            bytes_total: 0,
            part_number: 1,
        }
    }

    #[test]
    fn test_noop_sink_continues() {
        assert!(NoOpSink.on_progress(&event(50.0)));
    }

    #[test]
    fn test_fn_sink_cancel() {
        let sink = sink_fn(|p: &ProgressEvent| p.percent_complete < 50.0);
        assert!(sink.on_progress(&event(10.0)));
        assert!(!sink.on_progress(&event(75.0)));
    }

    #[test]
    fn test_fn_sink_captures_state() {
        let counter: Arc<AtomicU64> = Arc::new(AtomicU64::new(0));
        let counter_clone = counter.clone();

        let sink = sink_fn(move |_: &ProgressEvent| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            true
        });

        sink.on_progress(&event(25.0));
        sink.on_progress(&event(50.0));

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
