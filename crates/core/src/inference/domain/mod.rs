pub mod batch_session;
pub mod inference_engine;
pub mod session_config;
