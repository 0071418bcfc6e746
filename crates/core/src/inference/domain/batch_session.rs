use thiserror::Error;

use crate::inference::domain::inference_engine::{EngineError, InferenceEngine, PerformStatus};

#[cfg(feature = "ffi-engine")]
use crate::inference::domain::session_config::{ConfigError, SessionConfig};
#[cfg(feature = "ffi-engine")]
use crate::inference::infrastructure::ffi_engine::FfiEngine;

#[derive(Error, Debug)]
pub enum InferError {
    #[error("failed to reserve capacity for {capacity} results: {source}")]
    Capacity {
        capacity: usize,
        source: EngineError,
    },
    #[error("engine rejected waveform at index {index}: {source}")]
    Feed {
        index: usize,
        #[source]
        source: EngineError,
    },
    #[error("inference was interrupted, refusing to return incomplete results")]
    Interrupted,
    #[error("inference failed: {0}")]
    Engine(#[from] EngineError),
}

/// One configured client session against the recognition backend.
///
/// Owns the engine for its whole lifetime; engine resources are released
/// when the session is dropped, on every exit path.
pub struct BatchSession {
    engine: Box<dyn InferenceEngine>,
}

impl BatchSession {
    pub fn new(engine: Box<dyn InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Open a session against the real FFI engine.
    #[cfg(feature = "ffi-engine")]
    pub fn connect(config: &SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Box::new(FfiEngine::new(config)?)))
    }

    /// Transcribe a batch of WAV byte buffers.
    ///
    /// Returns exactly one transcription per input, index-aligned with the
    /// batch. On any error no result is returned at all: a partially
    /// transcribed batch cannot be distinguished from a complete one by
    /// the caller, so the whole call fails instead.
    ///
    /// Feeding is fail-fast: the first rejected waveform aborts the call
    /// before any network activity.
    ///
    /// # Panics
    ///
    /// Panics if the engine yields a different number of transcriptions
    /// than waveforms submitted. That means client and engine have
    /// desynchronized, and returning mismatched data would be worse than
    /// aborting.
    pub fn infer<W: AsRef<[u8]>>(&mut self, batch: &[W]) -> Result<Vec<String>, InferError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        log::debug!("submitting batch of {} waveforms", batch.len());

        self.engine
            .begin(batch.len())
            .map_err(|source| InferError::Capacity {
                capacity: batch.len(),
                source,
            })?;

        for (index, waveform) in batch.iter().enumerate() {
            self.engine
                .feed(waveform.as_ref())
                .map_err(|source| InferError::Feed { index, source })?;
        }

        match self.engine.perform()? {
            PerformStatus::Completed => {}
            PerformStatus::Interrupted => {
                log::warn!("inference interrupted, discarding batch");
                return Err(InferError::Interrupted);
            }
        }

        let mut transcriptions = Vec::with_capacity(batch.len());
        while let Some(text) = self.engine.next_output()? {
            transcriptions.push(text);
        }

        assert_eq!(
            transcriptions.len(),
            batch.len(),
            "engine produced {} transcriptions for {} waveforms",
            transcriptions.len(),
            batch.len()
        );

        log::debug!("batch of {} waveforms transcribed", batch.len());
        Ok(transcriptions)
    }
}
