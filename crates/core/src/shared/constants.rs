pub const DEFAULT_SERVER: &str = "localhost:8001";
pub const DEFAULT_MODEL_NAME: &str = "kaldi_online";

/// Inference contexts opened per backend server.
pub const DEFAULT_NCONTEXTES: i32 = 10;

/// Chunk length in samples; 8160 matches the Triton Kaldi backend's
/// streaming window.
pub const DEFAULT_CHUNK_LENGTH: i32 = 8160;

pub const DEFAULT_RESTART_HOST: &str = "localhost";
pub const DEFAULT_RESTART_PORT: u16 = 5555;
