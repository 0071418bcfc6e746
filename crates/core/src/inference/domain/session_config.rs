use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_CHUNK_LENGTH, DEFAULT_MODEL_NAME, DEFAULT_NCONTEXTES, DEFAULT_SERVER,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("sample frequency must be positive, got {0}")]
    InvalidSampleFrequency(f32),
    #[error("no server addresses passed")]
    NoServers,
    #[error("malformed server address '{0}', expected host:port")]
    MalformedServer(String),
    #[error("model name must not be empty")]
    EmptyModelName,
    #[error("ncontextes must be positive, got {0}")]
    InvalidNcontextes(i32),
    #[error("chunk length must be positive, got {0}")]
    InvalidChunkLength(i32),
    #[error("engine rejected configuration: {0}")]
    Engine(String),
}

/// Immutable per-session configuration.
///
/// Constructed once via [`SessionConfig::new`], which validates every field
/// before any engine call is made. Defaults mirror the stock deployment:
/// one server on `localhost:8001` serving the `kaldi_online` model.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    samp_freq: f32,
    servers: Vec<String>,
    model_name: String,
    ncontextes: i32,
    chunk_length: i32,
    verbose: bool,
}

impl SessionConfig {
    pub fn new(samp_freq: f32, servers: Vec<String>) -> Result<Self, ConfigError> {
        let config = Self {
            samp_freq,
            servers,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            ncontextes: DEFAULT_NCONTEXTES,
            chunk_length: DEFAULT_CHUNK_LENGTH,
            verbose: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration for a single default server, `localhost:8001`.
    pub fn with_default_server(samp_freq: f32) -> Result<Self, ConfigError> {
        Self::new(samp_freq, vec![DEFAULT_SERVER.to_string()])
    }

    pub fn with_model_name(mut self, model_name: &str) -> Result<Self, ConfigError> {
        if model_name.is_empty() {
            return Err(ConfigError::EmptyModelName);
        }
        self.model_name = model_name.to_string();
        Ok(self)
    }

    pub fn with_ncontextes(mut self, ncontextes: i32) -> Result<Self, ConfigError> {
        if ncontextes <= 0 {
            return Err(ConfigError::InvalidNcontextes(ncontextes));
        }
        self.ncontextes = ncontextes;
        Ok(self)
    }

    pub fn with_chunk_length(mut self, chunk_length: i32) -> Result<Self, ConfigError> {
        if chunk_length <= 0 {
            return Err(ConfigError::InvalidChunkLength(chunk_length));
        }
        self.chunk_length = chunk_length;
        Ok(self)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.samp_freq > 0.0) {
            return Err(ConfigError::InvalidSampleFrequency(self.samp_freq));
        }
        if self.servers.is_empty() {
            return Err(ConfigError::NoServers);
        }
        for server in &self.servers {
            parse_host_port(server)?;
        }
        if self.model_name.is_empty() {
            return Err(ConfigError::EmptyModelName);
        }
        if self.ncontextes <= 0 {
            return Err(ConfigError::InvalidNcontextes(self.ncontextes));
        }
        if self.chunk_length <= 0 {
            return Err(ConfigError::InvalidChunkLength(self.chunk_length));
        }
        Ok(())
    }

    pub fn samp_freq(&self) -> f32 {
        self.samp_freq
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn ncontextes(&self) -> i32 {
        self.ncontextes
    }

    pub fn chunk_length(&self) -> i32 {
        self.chunk_length
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Split `host:port` into its parts, requiring a non-empty host and a
/// numeric port.
pub fn parse_host_port(server: &str) -> Result<(&str, u16), ConfigError> {
    let malformed = || ConfigError::MalformedServer(server.to_string());

    let (host, port) = server.rsplit_once(':').ok_or_else(malformed)?;
    if host.is_empty() {
        return Err(malformed());
    }
    let port: u16 = port.parse().map_err(|_| malformed())?;
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_accepts_valid_config() {
        let config = SessionConfig::new(
            16000.0,
            vec!["localhost:8001".to_string(), "localhost:8002".to_string()],
        )
        .unwrap();
        assert_eq!(config.samp_freq(), 16000.0);
        assert_eq!(config.servers().len(), 2);
        assert_eq!(config.model_name(), "kaldi_online");
        assert_eq!(config.ncontextes(), 10);
        assert_eq!(config.chunk_length(), 8160);
        assert!(!config.verbose());
    }

    #[test]
    fn test_empty_server_list_is_rejected() {
        let result = SessionConfig::new(16000.0, Vec::new());
        assert!(matches!(result, Err(ConfigError::NoServers)));
    }

    #[rstest]
    #[case("localhost")]
    #[case("localhost:")]
    #[case(":8001")]
    #[case("localhost:abc")]
    #[case("localhost:99999")]
    fn test_malformed_server_is_rejected(#[case] server: &str) {
        let result = SessionConfig::new(16000.0, vec![server.to_string()]);
        assert!(
            matches!(result, Err(ConfigError::MalformedServer(ref s)) if s == server),
            "expected MalformedServer for '{server}', got {result:?}"
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-16000.0)]
    #[case(f32::NAN)]
    fn test_nonpositive_sample_frequency_is_rejected(#[case] samp_freq: f32) {
        let result = SessionConfig::with_default_server(samp_freq);
        assert!(matches!(result, Err(ConfigError::InvalidSampleFrequency(_))));
    }

    #[test]
    fn test_empty_model_name_is_rejected() {
        let result = SessionConfig::with_default_server(16000.0)
            .unwrap()
            .with_model_name("");
        assert!(matches!(result, Err(ConfigError::EmptyModelName)));
    }

    #[test]
    fn test_nonpositive_tuning_values_are_rejected() {
        let config = SessionConfig::with_default_server(16000.0).unwrap();
        assert!(matches!(
            config.clone().with_ncontextes(0),
            Err(ConfigError::InvalidNcontextes(0))
        ));
        assert!(matches!(
            config.with_chunk_length(-1),
            Err(ConfigError::InvalidChunkLength(-1))
        ));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = SessionConfig::with_default_server(22050.0)
            .unwrap()
            .with_model_name("kaldi_offline")
            .unwrap()
            .with_ncontextes(4)
            .unwrap()
            .with_chunk_length(4080)
            .unwrap()
            .with_verbose(true);
        assert_eq!(config.model_name(), "kaldi_offline");
        assert_eq!(config.ncontextes(), 4);
        assert_eq!(config.chunk_length(), 4080);
        assert!(config.verbose());
    }

    #[test]
    fn test_parse_host_port() {
        assert_eq!(
            parse_host_port("localhost:9001").unwrap(),
            ("localhost", 9001)
        );
        assert_eq!(parse_host_port("10.0.0.2:80").unwrap(), ("10.0.0.2", 80));
        assert!(parse_host_port("bare-host").is_err());
    }
}
