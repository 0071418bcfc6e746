#[cfg(feature = "ffi-engine")]
pub mod ffi_engine;
