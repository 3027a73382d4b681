use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::playback::AudioPlayer;
use crate::service::DictionaryService;
use crate::state::{LookupError, LookupResult, LookupState, Screen};

#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// How long a failed lookup stays on screen before reverting to empty.
    pub error_display: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            error_display: Duration::from_secs(3),
        }
    }
}

/// Owns the query, the outcome of the latest lookup and the loaded clip.
///
/// Clones share the same state, so the screen can hand one to a spawned
/// lookup while it keeps taking input.
pub struct LookupController<S, A: AudioPlayer> {
    inner: Arc<Inner<S, A>>,
}

impl<S, A: AudioPlayer> Clone for LookupController<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S, A: AudioPlayer> {
    service: S,
    player: A,
    config: LookupConfig,
    screen: Mutex<ScreenState>,
    playback: tokio::sync::Mutex<Option<A::Handle>>,
    changes: watch::Sender<u64>,
}

#[derive(Default)]
struct ScreenState {
    query: String,
    state: LookupState,
    /// Ticket of the most recent lookup; older tickets resolve into nothing.
    issued: u64,
    /// Bumped on every state transition.
    version: u64,
    auto_clear: Option<CancellationToken>,
}

impl ScreenState {
    fn transition(&mut self, state: LookupState, changes: &watch::Sender<u64>) {
        self.state = state;
        self.version += 1;
        if let Some(token) = self.auto_clear.take() {
            token.cancel();
        }
        changes.send_replace(self.version);
    }
}

impl<S, A> LookupController<S, A>
where
    S: DictionaryService,
    A: AudioPlayer,
{
    pub fn new(service: S, player: A, config: LookupConfig) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                service,
                player,
                config,
                screen: Mutex::new(ScreenState::default()),
                playback: tokio::sync::Mutex::new(None),
                changes,
            }),
        }
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.inner.screen.lock().query = text.into();
    }

    pub fn query(&self) -> String {
        self.inner.screen.lock().query.clone()
    }

    pub fn state(&self) -> LookupState {
        self.inner.screen.lock().state.clone()
    }

    pub fn screen(&self) -> Screen {
        let screen = self.inner.screen.lock();
        Screen {
            query: screen.query.clone(),
            state: screen.state.clone(),
        }
    }

    /// Yields the state version after every transition.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    pub async fn has_playback(&self) -> bool {
        self.inner.playback.lock().await.is_some()
    }

    /// Looks up the current query. Only the most recently issued lookup may
    /// change the state when it resolves.
    pub async fn perform_lookup(&self) {
        let (ticket, query) = {
            let mut screen = self.inner.screen.lock();
            screen.issued += 1;
            screen.transition(LookupState::Loading, &self.inner.changes);
            (screen.issued, screen.query.clone())
        };
        tracing::debug!(ticket, %query, "lookup issued");

        let outcome = self.inner.service.lookup(&query).await;

        let mut screen = self.inner.screen.lock();
        if screen.issued != ticket {
            tracing::debug!(ticket, latest = screen.issued, "discarding superseded lookup");
            return;
        }
        match outcome {
            Ok(word) => {
                let result = LookupResult::from_word(&word);
                tracing::info!(word = %result.word, "definition found");
                screen.transition(LookupState::Success(result), &self.inner.changes);
            }
            Err(error) => {
                tracing::info!(%query, "lookup failed: {error}");
                let error = LookupError::from(&error);
                screen.transition(LookupState::Failed(error), &self.inner.changes);
                self.schedule_auto_clear(&mut screen);
            }
        }
    }

    fn schedule_auto_clear(&self, screen: &mut ScreenState) {
        let token = CancellationToken::new();
        screen.auto_clear = Some(token.clone());
        let version = screen.version;
        let delay = self.inner.config.error_display;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut screen = inner.screen.lock();
                    // a late timer must not clear a newer state
                    if screen.version == version {
                        tracing::debug!(version, "error expired");
                        screen.transition(LookupState::Empty, &inner.changes);
                    }
                }
            }
        });
    }

    /// Plays the pronunciation of the displayed word, if it has one. Failures
    /// are logged and otherwise ignored.
    pub async fn request_playback(&self) {
        // read the clip under the playback lock so a `clear` that finished
        // while this call was queued is observed
        let mut playback = self.inner.playback.lock().await;
        let uri = self
            .inner
            .screen
            .lock()
            .state
            .result()
            .and_then(|result| result.audio_uri.clone())
            .filter(|uri| !uri.is_empty());
        let Some(uri) = uri else {
            tracing::debug!("no pronunciation to play");
            return;
        };

        if let Some(previous) = playback.take() {
            self.inner.player.release(previous).await;
        }
        let handle = match self.inner.player.load(&uri).await {
            Ok(handle) => handle,
            Err(error) => {
                tracing::warn!(%uri, "failed to load pronunciation: {error}");
                return;
            }
        };
        match self.inner.player.play(&handle).await {
            Ok(()) => *playback = Some(handle),
            Err(error) => {
                tracing::warn!(%uri, "failed to play pronunciation: {error}");
                self.inner.player.release(handle).await;
            }
        }
    }

    /// Back to the initial screen. Lookups still in flight are forgotten.
    pub async fn clear(&self) {
        {
            let mut screen = self.inner.screen.lock();
            screen.query.clear();
            screen.issued += 1;
            if screen.state != LookupState::Empty || screen.auto_clear.is_some() {
                screen.transition(LookupState::Empty, &self.inner.changes);
            }
        }
        let mut playback = self.inner.playback.lock().await;
        if let Some(handle) = playback.take() {
            self.inner.player.release(handle).await;
        }
    }
}
