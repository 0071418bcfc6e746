//! FFI bindings for libkaldi-asr-parallel-client
//!
//! This crate provides raw C FFI bindings to the parallel Kaldi ASR client
//! library, which fans batches of WAV data out to Triton inference servers
//! and collects one transcription per input.
//!
//! # Status codes
//!
//! Every `c_int`-returning function follows one convention: zero or positive
//! values are normal results, and exactly −1 signals an error whose
//! human-readable message is retrievable via [`client_last_error`].
//! [`client_infer_perform`] additionally returns 1 when the batch was
//! interrupted by a signal before completing.
//!
//! # Safety
//!
//! All functions in this crate are `unsafe` extern "C" functions. Callers
//! must ensure proper lifetime management of the client handle, valid
//! pointer parameters, and exactly one [`client_destroy`] per
//! [`client_alloc`].

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_float, c_int};

/// Opaque client handle owning the per-server connections and batch state.
#[repr(C)]
pub struct client {
    _private: [u8; 0],
}

extern "C" {
    /// Allocate a fresh, unconfigured client handle.
    pub fn client_alloc() -> *mut client;

    /// Configure the handle: sample frequency, NULL-terminated array of
    /// `host:port` server addresses, model name, number of inference
    /// contexts per server, chunk length in samples, verbosity.
    ///
    /// Must be called exactly once before any infer call.
    pub fn client_set_config(
        client: *mut client,
        samp_freq: c_float,
        servers: *const *const c_char,
        model_name: *const c_char,
        ncontextes: c_int,
        chunk_length: c_int,
        verbose: bool,
    ) -> c_int;

    /// Reserve capacity for a batch of `len` inputs and reset any state
    /// left over from a previous batch, including undrained outputs.
    pub fn client_infer_begin(client: *mut client, len: usize) -> c_int;

    /// Feed one WAV byte buffer. Buffers are decoded engine-side; the
    /// bytes are copied before return.
    pub fn client_infer_feed(client: *mut client, bytes: *const c_char, len: usize) -> c_int;

    /// Run the whole batch against the backend servers. Blocks until all
    /// transcriptions arrived, an error occurred (−1), or the wait was
    /// interrupted by a signal (1).
    pub fn client_infer_perform(client: *mut client) -> c_int;

    /// Pull the next transcription as a NUL-terminated UTF-8 string, or
    /// NULL once all outputs of the current batch were consumed. The
    /// returned pointer is owned by the handle and valid until the next
    /// infer call.
    pub fn client_infer_output(client: *mut client) -> *const c_char;

    /// Message describing the most recent −1 return. Owned by the handle.
    pub fn client_last_error(client: *mut client) -> *const c_char;

    /// Free the handle and all associated resources.
    pub fn client_destroy(client: *mut client);
}
