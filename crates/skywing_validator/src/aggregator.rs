//! Per-run error accumulation.

use skywing_core::FieldErrors;

/// Collects failure messages during one validation run.
///
/// Owned by a single run and consumed by [`finish`](Self::finish), so a
/// finished [`FieldErrors`] can no longer change.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    messages: Vec<(String, String)>,
}

impl ErrorAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure message for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages.push((field.into(), message.into()));
    }

    /// Returns the number of messages recorded so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Groups the recorded messages by field.
    pub fn finish(self) -> FieldErrors {
        self.messages.into_iter().collect()
    }
}
