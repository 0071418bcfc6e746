//! Full-run scenario: restart the backend servers, then transcribe a
//! batch, exercising both protocol components through the public API.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use tempfile::TempDir;

use kaldi_client_core::inference::domain::batch_session::BatchSession;
use kaldi_client_core::inference::domain::inference_engine::{
    EngineError, InferenceEngine, PerformStatus,
};
use kaldi_client_core::inference::domain::session_config::SessionConfig;
use kaldi_client_core::restart::restart_coordinator::RestartCoordinator;

/// Engine stand-in that "transcribes" each fed buffer to its UTF-8 text.
#[derive(Default)]
struct EchoEngine {
    fed: Vec<Vec<u8>>,
    outputs: Vec<String>,
}

impl InferenceEngine for EchoEngine {
    fn begin(&mut self, capacity: usize) -> Result<(), EngineError> {
        self.fed = Vec::with_capacity(capacity);
        self.outputs.clear();
        Ok(())
    }

    fn feed(&mut self, waveform: &[u8]) -> Result<(), EngineError> {
        self.fed.push(waveform.to_vec());
        Ok(())
    }

    fn perform(&mut self) -> Result<PerformStatus, EngineError> {
        self.outputs = self
            .fed
            .iter()
            .map(|wav| String::from_utf8_lossy(wav).into_owned())
            .collect();
        Ok(PerformStatus::Completed)
    }

    fn next_output(&mut self) -> Result<Option<String>, EngineError> {
        if self.outputs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.outputs.remove(0)))
        }
    }
}

fn spawn_restart_daemon() -> (u16, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        tx.send(line).unwrap();
        reader.get_ref().write_all(b"0").unwrap();
    });

    (port, rx)
}

#[test]
fn test_restart_then_infer_batch_of_three() {
    let servers = vec!["localhost:9001".to_string(), "localhost:9002".to_string()];

    // Session configuration for two servers validates up front.
    let config = SessionConfig::new(16000.0, servers.clone()).unwrap();
    assert_eq!(config.servers().len(), 2);

    // Restart both servers and wait for the acknowledgement.
    let (daemon_port, requests) = spawn_restart_daemon();
    RestartCoordinator::new("127.0.0.1", daemon_port)
        .restart(&servers)
        .unwrap();
    assert_eq!(requests.recv().unwrap(), "9001,9002\n");

    // Load three waveforms from disk, as a caller would.
    let dir = TempDir::new().unwrap();
    let mut wavs = Vec::new();
    for name in ["utterance-a", "utterance-b", "utterance-c"] {
        let path = dir.path().join(format!("{name}.wav"));
        fs::write(&path, name.as_bytes()).unwrap();
        wavs.push(fs::read(&path).unwrap());
    }

    let mut session = BatchSession::new(Box::<EchoEngine>::default());
    let transcriptions = session.infer(&wavs).unwrap();

    assert_eq!(transcriptions.len(), 3);
    assert!(transcriptions.iter().all(|t| !t.is_empty()));
    assert_eq!(
        transcriptions,
        vec!["utterance-a", "utterance-b", "utterance-c"]
    );
}
