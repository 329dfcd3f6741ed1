use crate::{PlaybackState, Section, TransportStatus};

use uuid::Uuid;

/// A playable resource plus the duration label to show before the engine
/// resolves a numeric duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSource {
    /// URL handed to the transport.
    pub url: String,
    /// Human-readable total time, e.g. the section playtime from the catalog.
    pub nominal_duration: Option<String>,
}

impl PlaybackSource {
    /// Source without a nominal duration.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            nominal_duration: None,
        }
    }

    /// Attach the label shown as total time until the real duration is known.
    pub fn with_nominal_duration(mut self, nominal: impl Into<String>) -> Self {
        let nominal = nominal.into();
        self.nominal_duration = (!nominal.trim().is_empty()).then_some(nominal);
        self
    }
}

impl From<&Section> for PlaybackSource {
    fn from(section: &Section) -> Self {
        PlaybackSource::new(section.listen_url.clone()).with_nominal_duration(section.playtime.clone())
    }
}

/// One bound resource and its live transport state.
///
/// Status snapshots are clamped on ingest so that
/// `0 <= current_time <= duration` holds whenever the duration is known.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    id: Uuid,
    source_url: String,
    nominal_duration: Option<String>,
    pub(crate) is_loaded: bool,
    pub(crate) is_buffering: bool,
    pub(crate) is_playing: bool,
    pub(crate) did_just_finish: bool,
    pub(crate) current_time: f64,
    pub(crate) duration: Option<f64>,
}

impl PlaybackSession {
    pub(crate) fn new(source: PlaybackSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source.url,
            nominal_duration: source.nominal_duration,
            is_loaded: false,
            is_buffering: false,
            is_playing: false,
            did_just_finish: false,
            current_time: 0.0,
            duration: None,
        }
    }

    /// Session ID for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// URL bound for the lifetime of this session.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fallback total-time label.
    pub fn nominal_duration(&self) -> Option<&str> {
        self.nominal_duration.as_deref()
    }

    /// Whether the engine accepts transport commands.
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Whether playback is stalled on data.
    pub fn is_buffering(&self) -> bool {
        self.is_buffering
    }

    /// Whether the position is advancing.
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the track just reached its natural end.
    pub fn did_just_finish(&self) -> bool {
        self.did_just_finish
    }

    /// Position in seconds, always `>= 0`.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration in seconds when known.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub(crate) fn state(&self) -> PlaybackState {
        if !self.is_loaded {
            PlaybackState::Loading
        } else if self.is_playing {
            PlaybackState::Playing
        } else if self.did_just_finish {
            PlaybackState::Finished
        } else if self.current_time > 0.0 {
            PlaybackState::Paused
        } else {
            PlaybackState::Ready
        }
    }

    pub(crate) fn apply(&mut self, status: &TransportStatus) {
        self.is_loaded = status.is_loaded;
        self.is_buffering = status.is_buffering;
        self.is_playing = status.is_playing;
        self.did_just_finish = status.did_just_finish;
        self.duration = status.duration.filter(|d| d.is_finite() && *d >= 0.0);
        self.current_time = self.clamp_position(status.current_time);
    }

    /// Record a seek that was just issued. Last write wins.
    pub(crate) fn mark_seeked(&mut self, target: f64) {
        self.did_just_finish = false;
        self.current_time = self.clamp_position(target);
    }

    pub(crate) fn mark_playing(&mut self) {
        self.did_just_finish = false;
        self.is_playing = true;
    }

    pub(crate) fn mark_paused(&mut self) {
        self.is_playing = false;
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }
}
