//! Video player state machine
//!
//! One [`VideoPlayer`] backs one rendered player. It starts in
//! [`PlayerState::Loading`], and ends in either [`PlayerState::Loaded`] or
//! [`PlayerState::Errored`] depending on the frame's load signal. Absent or
//! non-playable sources go straight to `Errored`.

use crate::embeds::{EmbedDescriptor, EmbedError};
use crate::reference::{VideoPlatform, VideoReference};
use thiserror::Error;

/// Message shown in place of a player that cannot be displayed
pub const FALLBACK_MESSAGE: &str = "Unable to load video — check the video URL format";

/// Reasons a player ends up errored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// No video reference was supplied
    #[error("No video source")]
    MissingSource,

    /// The platform has no iframe player
    #[error("Playback not supported for {0}")]
    UnsupportedPlatform(VideoPlatform),

    /// The embedded frame reported a load failure
    #[error("Embedded frame failed to load")]
    FrameLoadFailed,
}

impl From<EmbedError> for PlayerError {
    fn from(err: EmbedError) -> Self {
        match err {
            EmbedError::MissingReference => PlayerError::MissingSource,
            EmbedError::UnsupportedPlaybackPlatform(platform) => {
                PlayerError::UnsupportedPlatform(platform)
            }
        }
    }
}

/// Player state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerState {
    /// Waiting for the embedded frame to signal
    Loading,
    /// The frame loaded successfully
    Loaded,
    /// Nothing can be played
    Errored(PlayerError),
}

impl PlayerState {
    /// Whether the state accepts no further frame events
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PlayerState::Loading)
    }
}

/// What the rendering layer should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerView {
    /// Spinner over a frame that is still loading
    Spinner {
        /// Frame URL to load behind the spinner
        embed_url: String,
    },
    /// Loaded player frame
    Frame {
        /// Frame URL
        embed_url: String,
        /// Poster image, if known
        thumbnail_url: Option<String>,
    },
    /// Fallback message, never a blank frame
    Fallback {
        /// Message to display
        message: &'static str,
    },
}

/// Per-instance player state machine
#[derive(Debug, Clone)]
pub struct VideoPlayer {
    source: Option<VideoReference>,
    descriptor: Option<EmbedDescriptor>,
    state: PlayerState,
}

impl VideoPlayer {
    /// Create a player for a source that may be absent
    pub fn new(source: Option<VideoReference>) -> Self {
        let mut player = Self {
            source: None,
            descriptor: None,
            state: PlayerState::Errored(PlayerError::MissingSource),
        };
        player.reset(source);
        player
    }

    /// Get the current state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Get the current source
    pub fn source(&self) -> Option<&VideoReference> {
        self.source.as_ref()
    }

    /// Get the embed descriptor, if the source is playable
    pub fn descriptor(&self) -> Option<&EmbedDescriptor> {
        self.descriptor.as_ref()
    }

    /// Point the player at a (possibly) new source
    ///
    /// An identical `(platform, id)` pair leaves the state untouched. Returns
    /// whether the machine was reset.
    pub fn set_source(&mut self, source: Option<VideoReference>) -> bool {
        if source == self.source {
            return false;
        }
        self.reset(source);
        true
    }

    /// The embedded frame signalled a successful load
    pub fn frame_loaded(&mut self) -> bool {
        self.transition(PlayerState::Loaded)
    }

    /// The embedded frame signalled a load failure
    pub fn frame_failed(&mut self) -> bool {
        self.transition(PlayerState::Errored(PlayerError::FrameLoadFailed))
    }

    /// Current view for the rendering layer
    pub fn view(&self) -> PlayerView {
        match (&self.state, &self.descriptor) {
            (PlayerState::Loading, Some(descriptor)) => PlayerView::Spinner {
                embed_url: descriptor.embed_url.clone(),
            },
            (PlayerState::Loaded, Some(descriptor)) => PlayerView::Frame {
                embed_url: descriptor.embed_url.clone(),
                thumbnail_url: descriptor.thumbnail_url.clone(),
            },
            _ => PlayerView::Fallback {
                message: FALLBACK_MESSAGE,
            },
        }
    }

    fn reset(&mut self, source: Option<VideoReference>) {
        match EmbedDescriptor::for_optional(source.as_ref()) {
            Ok(descriptor) => {
                self.descriptor = Some(descriptor);
                self.state = PlayerState::Loading;
            }
            Err(err) => {
                tracing::debug!(error = %err, "player cannot display source");
                self.descriptor = None;
                self.state = PlayerState::Errored(err.into());
            }
        }
        self.source = source;
    }

    // Frame events only apply while loading.
    fn transition(&mut self, next: PlayerState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = next;
        true
    }
}
