use std::process::Stdio;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("failed to fetch audio clip: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("audio clip is not ready: {0}")]
    NotReady(String),
    #[error("failed to start audio player `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("audio player i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads, plays and releases pronunciation clips.
#[async_trait]
pub trait AudioPlayer: Send + Sync + 'static {
    type Handle: Send + Sync + 'static;

    /// Resolves only once the clip is ready to play.
    async fn load(&self, uri: &str) -> Result<Self::Handle, PlaybackError>;

    async fn play(&self, handle: &Self::Handle) -> Result<(), PlaybackError>;

    async fn release(&self, handle: Self::Handle);
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub program: String,
    /// The clip is piped into stdin, so these must make the player read from it.
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: "ffplay".to_owned(),
            args: ["-nodisp", "-autoexit", "-loglevel", "quiet", "pipe:0"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Downloads clips over http and pipes them into an external player process.
pub struct CommandPlayer {
    client: reqwest::Client,
    config: PlayerConfig,
}

pub struct Clip {
    uri: String,
    bytes: Vec<u8>,
    process: Mutex<Option<Child>>,
}

impl CommandPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    type Handle = Clip;

    async fn load(&self, uri: &str) -> Result<Clip, PlaybackError> {
        let response = self.client.get(uri).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlaybackError::NotReady(format!("{uri} answered {status}")));
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(PlaybackError::NotReady(format!("{uri} is empty")));
        }
        tracing::debug!(uri, size = bytes.len(), "clip loaded");
        Ok(Clip {
            uri: uri.to_owned(),
            bytes: bytes.to_vec(),
            process: Mutex::new(None),
        })
    }

    async fn play(&self, clip: &Clip) -> Result<(), PlaybackError> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PlaybackError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&clip.bytes).await?;
            stdin.shutdown().await?;
        }
        *clip.process.lock() = Some(child);
        Ok(())
    }

    async fn release(&self, clip: Clip) {
        let child = clip.process.lock().take();
        if let Some(mut child) = child {
            if let Ok(None) = child.try_wait() {
                if let Err(error) = child.start_kill() {
                    tracing::debug!(uri = %clip.uri, "player already gone: {error}");
                }
            }
            if let Err(error) = child.wait().await {
                tracing::warn!(uri = %clip.uri, "failed to reap audio player: {error}");
            }
        }
        tracing::debug!(uri = %clip.uri, "clip released");
    }
}
