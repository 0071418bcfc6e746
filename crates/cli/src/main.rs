use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use kaldi_client_core::inference::domain::session_config::SessionConfig;
use kaldi_client_core::restart::restart_coordinator::RestartCoordinator;
use kaldi_client_core::shared::constants::{
    DEFAULT_CHUNK_LENGTH, DEFAULT_MODEL_NAME, DEFAULT_NCONTEXTES, DEFAULT_RESTART_HOST,
    DEFAULT_RESTART_PORT, DEFAULT_SERVER,
};

/// Batch speech transcription against Triton Kaldi inference servers.
#[derive(Parser)]
#[command(name = "kaldi-client")]
struct Cli {
    /// WAV files to transcribe, one transcription per file.
    wavs: Vec<PathBuf>,

    /// Sample frequency of the WAV files in Hz.
    #[arg(long, default_value = "16000")]
    samp_freq: f32,

    /// Inference server addresses (comma-separated host:port).
    #[arg(long = "server", value_delimiter = ',', default_value = DEFAULT_SERVER)]
    servers: Vec<String>,

    /// Model name served by the backend.
    #[arg(long, default_value = DEFAULT_MODEL_NAME)]
    model_name: String,

    /// Inference contexts per server.
    #[arg(long, default_value_t = DEFAULT_NCONTEXTES)]
    ncontextes: i32,

    /// Chunk length in samples.
    #[arg(long, default_value_t = DEFAULT_CHUNK_LENGTH)]
    chunk_length: i32,

    /// Enable verbose engine output.
    #[arg(long)]
    verbose: bool,

    /// Ask the restart daemon to restart the target servers first.
    #[arg(long)]
    restart: bool,

    /// Restart daemon host.
    #[arg(long, default_value = DEFAULT_RESTART_HOST)]
    restart_host: String,

    /// Restart daemon port.
    #[arg(long, default_value_t = DEFAULT_RESTART_PORT)]
    restart_port: u16,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.wavs.is_empty() {
        return Err("no WAV files specified".into());
    }

    let config = SessionConfig::new(cli.samp_freq, cli.servers.clone())?
        .with_model_name(&cli.model_name)?
        .with_ncontextes(cli.ncontextes)?
        .with_chunk_length(cli.chunk_length)?
        .with_verbose(cli.verbose);

    if cli.restart {
        log::info!("restarting {} server(s) before inference", cli.servers.len());
        RestartCoordinator::new(&cli.restart_host, cli.restart_port)
            .restart(&cli.servers)?;
    }

    let mut wavs = Vec::with_capacity(cli.wavs.len());
    for path in &cli.wavs {
        let bytes = fs::read(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        wavs.push(bytes);
    }

    let transcriptions = transcribe(&config, &wavs)?;

    for (path, transcription) in cli.wavs.iter().zip(&transcriptions) {
        println!("Inference for {}: {transcription}", path.display());
    }

    Ok(())
}

#[cfg(feature = "ffi-engine")]
fn transcribe(
    config: &SessionConfig,
    wavs: &[Vec<u8>],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use kaldi_client_core::inference::domain::batch_session::BatchSession;

    let mut session = BatchSession::connect(config)?;
    Ok(session.infer(wavs)?)
}

#[cfg(not(feature = "ffi-engine"))]
fn transcribe(
    _config: &SessionConfig,
    _wavs: &[Vec<u8>],
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    Err("this build has no engine backend; rebuild with --features ffi-engine \
         and KALDI_CLIENT_LIB_DIR pointing at libkaldi-asr-parallel-client"
        .into())
}
