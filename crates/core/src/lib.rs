//! Client library for the Triton Kaldi batch ASR backend.
//!
//! Two independent pieces compose a client application:
//!
//! - [`inference::domain::batch_session::BatchSession`] submits a batch of
//!   WAV byte buffers and returns exactly one transcription per input, in
//!   input order.
//! - [`restart::restart_coordinator::RestartCoordinator`] asks a local
//!   daemon to restart a set of backend inference servers before a run.
//!
//! The recognition engine itself lives behind the
//! [`inference::domain::inference_engine::InferenceEngine`] trait; the
//! production implementation wraps the prebuilt
//! `libkaldi-asr-parallel-client` shared object and is enabled with the
//! `ffi-engine` feature.

pub mod inference;
pub mod restart;
pub mod shared;
