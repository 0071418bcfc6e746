use thiserror::Error;

/// Failure reported by the recognition engine, carrying the message from
/// its last-error channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a blocking [`InferenceEngine::perform`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformStatus {
    Completed,
    /// The wait was cancelled externally (e.g. SIGINT) before all results
    /// arrived. No output of the batch may be trusted.
    Interrupted,
}

/// Domain interface for the batch recognition backend.
///
/// Implementations drive one batch at a time through a four-call
/// lifecycle. [`begin`](Self::begin) resets any previous batch, including
/// undrained outputs, so a single engine may serve consecutive batches.
pub trait InferenceEngine: Send {
    /// Reserve capacity for a batch of `capacity` waveforms.
    fn begin(&mut self, capacity: usize) -> Result<(), EngineError>;

    /// Submit one opaque WAV byte buffer. Buffers are decoded engine-side;
    /// this call performs no network activity.
    fn feed(&mut self, waveform: &[u8]) -> Result<(), EngineError>;

    /// Execute the whole batch. Blocks for the network round trips and
    /// recognition compute; this is the only suspension point.
    fn perform(&mut self) -> Result<PerformStatus, EngineError>;

    /// Pull the next transcription, or `None` once the batch is drained.
    fn next_output(&mut self) -> Result<Option<String>, EngineError>;
}
