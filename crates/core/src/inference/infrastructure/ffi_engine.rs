//! Safe wrapper around the kaldi-client-sys FFI bindings.
//!
//! `FfiEngine` owns one C client handle, pushes the session configuration
//! into it on construction, and frees it exactly once in `Drop`.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use crate::inference::domain::inference_engine::{EngineError, InferenceEngine, PerformStatus};
use crate::inference::domain::session_config::{ConfigError, SessionConfig};

/// Return code of `client_infer_perform` when the wait was cut short by a
/// signal.
const PERFORM_INTERRUPTED: c_int = 1;

pub struct FfiEngine {
    handle: *mut kaldi_client_sys::client,
}

// SAFETY: the C library ties all state to the handle and performs no
// thread-local tricks; the handle may move between threads as long as it
// is used from one thread at a time, which the &mut receivers enforce.
unsafe impl Send for FfiEngine {}

impl FfiEngine {
    /// Allocate a client handle and configure it from `config`.
    ///
    /// The handle is freed before returning on any configuration failure.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        let handle = unsafe { kaldi_client_sys::client_alloc() };
        if handle.is_null() {
            return Err(ConfigError::Engine(
                "failed to allocate client handle".to_string(),
            ));
        }
        let engine = Self { handle };

        let servers_cstr: Vec<CString> = config
            .servers()
            .iter()
            .map(|s| CString::new(s.as_str()))
            .collect::<Result<_, _>>()
            .map_err(|_| ConfigError::MalformedServer("embedded NUL".to_string()))?;

        // NULL-terminated array, as the C side iterates until NULL.
        let mut servers_ptrs: Vec<*const c_char> =
            servers_cstr.iter().map(|s| s.as_ptr()).collect();
        servers_ptrs.push(std::ptr::null());

        let model_name = CString::new(config.model_name())
            .map_err(|_| ConfigError::EmptyModelName)?;

        let code = unsafe {
            kaldi_client_sys::client_set_config(
                engine.handle,
                config.samp_freq(),
                servers_ptrs.as_ptr(),
                model_name.as_ptr(),
                config.ncontextes(),
                config.chunk_length(),
                config.verbose(),
            )
        };
        // Engine teardown on this path is handled by Drop when `engine`
        // goes out of scope.
        engine
            .check(code)
            .map_err(|e| ConfigError::Engine(e.message))?;

        log::info!(
            "configured engine for {} server(s), model '{}'",
            config.servers().len(),
            config.model_name()
        );
        Ok(engine)
    }

    /// Map an engine status code to a result, reading the last-error
    /// channel on −1. Zero and positive codes are normal values.
    fn check(&self, code: c_int) -> Result<c_int, EngineError> {
        if code >= 0 {
            return Ok(code);
        }
        Err(EngineError::new(self.last_error()))
    }

    fn last_error(&self) -> String {
        let msg = unsafe { kaldi_client_sys::client_last_error(self.handle) };
        if msg.is_null() {
            return "engine reported an error without a message".to_string();
        }
        unsafe { CStr::from_ptr(msg) }
            .to_string_lossy()
            .into_owned()
    }
}

impl InferenceEngine for FfiEngine {
    fn begin(&mut self, capacity: usize) -> Result<(), EngineError> {
        let code = unsafe { kaldi_client_sys::client_infer_begin(self.handle, capacity) };
        self.check(code).map(|_| ())
    }

    fn feed(&mut self, waveform: &[u8]) -> Result<(), EngineError> {
        let code = unsafe {
            kaldi_client_sys::client_infer_feed(
                self.handle,
                waveform.as_ptr() as *const c_char,
                waveform.len(),
            )
        };
        self.check(code).map(|_| ())
    }

    fn perform(&mut self) -> Result<PerformStatus, EngineError> {
        let code = unsafe { kaldi_client_sys::client_infer_perform(self.handle) };
        match self.check(code)? {
            PERFORM_INTERRUPTED => Ok(PerformStatus::Interrupted),
            _ => Ok(PerformStatus::Completed),
        }
    }

    fn next_output(&mut self) -> Result<Option<String>, EngineError> {
        let text = unsafe { kaldi_client_sys::client_infer_output(self.handle) };
        if text.is_null() {
            return Ok(None);
        }
        let text = unsafe { CStr::from_ptr(text) }
            .to_string_lossy()
            .into_owned();
        Ok(Some(text))
    }
}

impl Drop for FfiEngine {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                kaldi_client_sys::client_destroy(self.handle);
            }
            log::debug!("client handle freed");
        }
    }
}
