//! Error sinks.
//!
//! A sink receives one [`ValidationError`] per violation. Validation never
//! stops on a failure; the sink decides what to do with each descriptor.
//! Sinks may be shared by several schemas, so `report` takes `&self` and
//! implementations serialize their own writes.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::issue::ValidationError;

/// Receiver for validation errors.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: ValidationError);
}

impl<F> ErrorSink for F
where
    F: Fn(ValidationError) + Send + Sync,
{
    fn report(&self, error: ValidationError) {
        self(error);
    }
}

/// Drops every error. Used by rules that are not attached to a schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl ErrorSink for DiscardSink {
    fn report(&self, _error: ValidationError) {}
}

/// Keeps every error in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    errors: Mutex<Vec<ValidationError>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected errors.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.lock().clone()
    }

    /// Remove and return the collected errors.
    pub fn take(&self) -> Vec<ValidationError> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ValidationError>> {
        // A poisoned list is still a valid list of errors.
        self.errors
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ErrorSink for CollectingSink {
    fn report(&self, error: ValidationError) {
        self.lock().push(error);
    }
}

/// Counts errors without keeping them.
#[derive(Debug, Default)]
pub struct CountingSink {
    count: AtomicUsize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl ErrorSink for CountingSink {
    fn report(&self, _error: ValidationError) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Emits one `warn` event per error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, error: ValidationError) {
        tracing::warn!(
            tag = %error.tag,
            kind = %error.kind,
            row = ?error.row_number,
            source_row = ?error.source_row_number,
            "{}",
            error.message
        );
    }
}
