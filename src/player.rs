//! Audio player port
//!
//! The session hands resolved clip URLs to an [`AudioPlayer`]. Playback itself,
//! and whether it succeeds, is the player's business.

use async_trait::async_trait;

/// Errors that can occur during clip playback.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The player could not start or continue the clip.
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No audio output device available.
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Plays voice clips.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Start playing the clip at `url`.
    async fn play(&mut self, url: &str) -> Result<(), PlaybackError>;

    /// Stop the clip currently playing, if any.
    async fn stop(&mut self) -> Result<(), PlaybackError>;

    /// Drop everything queued behind the current clip.
    async fn clear_queue(&mut self) -> Result<(), PlaybackError>;
}

/// Turns a spot's clip reference into a playable URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipResolver {
    base_url: String,
}

impl ClipResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Prefix the clip with the base URL as-is. The base carries its own
    /// trailing `/` (or `?file=` and the like); nothing is inserted.
    pub fn resolve(&self, clip: &str) -> String {
        format!("{}{}", self.base_url, clip)
    }
}

/// Player that only logs what it would play. Used by the replay tool.
#[derive(Debug, Default)]
pub struct LogPlayer {
    now_playing: Option<String>,
}

impl LogPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }
}

#[async_trait]
impl AudioPlayer for LogPlayer {
    async fn play(&mut self, url: &str) -> Result<(), PlaybackError> {
        log::info!("play {url}");
        self.now_playing = Some(url.to_string());
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), PlaybackError> {
        if let Some(url) = self.now_playing.take() {
            log::info!("stop {url}");
        }
        Ok(())
    }

    async fn clear_queue(&mut self) -> Result<(), PlaybackError> {
        log::debug!("clear queue");
        Ok(())
    }
}
