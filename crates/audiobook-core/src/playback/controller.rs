//! Playback position and seek control.
//!
//! Translates user intent (play/pause toggle, relative skips, taps on a
//! progress track) into [`Transport`] commands, and transport status into
//! display-ready values.

use crate::{
    PlaybackSession, PlaybackSource, PlaybackState, Transport, TransportStatus, format_time,
    time_format::ZERO_TIME,
};

use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Controller for a single player instance.
///
/// All operations run on the caller's thread and never fail. Anything that
/// cannot be honored (nothing loaded, layout not measured, duration unknown)
/// is ignored.
///
/// # Status updates
///
/// The transport publishes [`TransportStatus`] snapshots on a `watch`
/// channel. Every operation first calls [`refresh`](Self::refresh), which
/// ingests the newest snapshot if one arrived. Renderers that want to react
/// to engine progress should await [`status_receiver`](Self::status_receiver)
/// and call `refresh` when it changes.
pub struct PlaybackController<T: Transport> {
    transport: T,
    status_rx: watch::Receiver<TransportStatus>,
    session: Option<PlaybackSession>,
    track_width: f64,
}

impl<T: Transport> PlaybackController<T> {
    /// Create an idle controller over `transport`.
    pub fn new(transport: T) -> Self {
        let status_rx = transport.subscribe();
        Self {
            transport,
            status_rx,
            session: None,
            track_width: 0.0,
        }
    }

    /// Bind `source`, starting a new session.
    ///
    /// Loading the URL of the live session is a no-op. Any other URL releases
    /// the previous resource first.
    #[instrument(skip(self, source), fields(url = %source.url))]
    pub fn load(&mut self, source: PlaybackSource) {
        if self
            .session
            .as_ref()
            .is_some_and(|s| s.source_url() == source.url)
        {
            return;
        }

        if let Some(previous) = self.session.take() {
            self.transport.release();
            debug!(session_id = %previous.id(), "Previous session released");
        }

        // Snapshots describing the released resource must not leak into the new session.
        self.status_rx.mark_unchanged();
        self.transport.load(&source.url);

        let session = PlaybackSession::new(source);
        info!(session_id = %session.id(), "Playback session started");
        self.session = Some(session);
    }

    /// Release the bound resource and return to idle.
    #[instrument(skip(self))]
    pub fn unload(&mut self) {
        if let Some(session) = self.session.take() {
            self.transport.release();
            info!(session_id = %session.id(), "Playback session ended");
        }
    }

    /// Ingest the newest transport status, if one arrived since the last call.
    pub fn refresh(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if matches!(self.status_rx.has_changed(), Ok(true)) {
            let status = *self.status_rx.borrow_and_update();
            session.apply(&status);
        }
    }

    /// Pause when playing, otherwise play.
    ///
    /// A track that just finished restarts from zero instead of resuming at
    /// the end: the seek is issued before `play`.
    #[instrument(skip(self))]
    pub fn toggle_play_pause(&mut self) {
        self.refresh();
        let Some(session) = self.session.as_mut().filter(|s| s.is_loaded()) else {
            debug!("Toggle ignored, nothing loaded");
            return;
        };

        if session.is_playing() {
            self.transport.pause();
            session.mark_paused();
            return;
        }

        if session.did_just_finish() {
            self.transport.seek_to(0.0);
            session.mark_seeked(0.0);
            debug!(session_id = %session.id(), "Restarting finished track");
        }

        self.transport.play();
        session.mark_playing();
    }

    /// Pause if currently playing. Used when another surface takes focus.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        self.refresh();
        if let Some(session) = self
            .session
            .as_mut()
            .filter(|s| s.is_loaded() && s.is_playing())
        {
            self.transport.pause();
            session.mark_paused();
        }
    }

    /// Skip by `delta_seconds`, never before zero.
    ///
    /// No clamp against the duration: the engine clamps to end-of-track and
    /// reports completion itself.
    #[instrument(skip(self))]
    pub fn seek_relative(&mut self, delta_seconds: f64) {
        self.refresh();
        let Some(session) = self.session.as_mut().filter(|s| s.is_loaded()) else {
            debug!("Relative seek ignored, nothing loaded");
            return;
        };

        // f64::max drops NaN, so check the raw sum first.
        let raw_target = session.current_time() + delta_seconds;
        if !raw_target.is_finite() {
            debug!(delta_seconds, "Relative seek ignored, target not finite");
            return;
        }
        let target = raw_target.max(0.0);

        self.transport.seek_to(target);
        session.mark_seeked(target);
    }

    /// Record the measured width of the progress track.
    pub fn set_track_width(&mut self, width_pixels: f64) {
        self.track_width = width_pixels;
    }

    /// Measured width of the progress track, `0.0` before layout.
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Seek to a tap on the progress track using the measured width.
    pub fn seek_to_tap(&mut self, tap_offset_pixels: f64) {
        self.seek_to_gesture(self.track_width, tap_offset_pixels);
    }

    /// Seek to the time under a tap at `tap_offset_pixels` on a track
    /// `track_width_pixels` wide.
    ///
    /// Ignored while nothing is loaded, before the track is measured, or
    /// while the duration is unknown, non-finite or not positive.
    #[instrument(skip(self))]
    pub fn seek_to_gesture(&mut self, track_width_pixels: f64, tap_offset_pixels: f64) {
        self.refresh();
        let Some(session) = self.session.as_mut().filter(|s| s.is_loaded()) else {
            debug!("Gesture seek ignored, nothing loaded");
            return;
        };

        let Some(duration) = session.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            debug!("Gesture seek ignored, duration unknown");
            return;
        };

        if track_width_pixels == 0.0 || !track_width_pixels.is_finite() {
            debug!("Gesture seek ignored, track not measured");
            return;
        }

        let fraction = tap_offset_pixels / track_width_pixels;
        let target = fraction * duration;
        if !target.is_finite() {
            debug!(target, "Gesture seek ignored, target not finite");
            return;
        }

        let target = target.clamp(0.0, duration);
        self.transport.seek_to(target);
        session.mark_seeked(target);
    }

    /// Fraction of the track played, in `[0, 1]`. Display only.
    pub fn progress_fraction(&self) -> f64 {
        self.session
            .as_ref()
            .and_then(|s| {
                s.duration()
                    .filter(|d| *d > 0.0)
                    .map(|d| s.current_time() / d)
            })
            .unwrap_or(0.0)
    }

    /// Elapsed time as `M:SS`.
    pub fn formatted_elapsed(&self) -> String {
        match self.session.as_ref().filter(|s| s.is_loaded()) {
            Some(session) => format_time(session.current_time()),
            None => ZERO_TIME.to_string(),
        }
    }

    /// Total time as `M:SS`, falling back to the nominal duration label
    /// until the engine resolves a duration. Never blank.
    pub fn formatted_total(&self) -> String {
        let Some(session) = self.session.as_ref() else {
            return ZERO_TIME.to_string();
        };

        match session.duration().filter(|_| session.is_loaded()) {
            Some(duration) => format_time(duration),
            None => session
                .nominal_duration()
                .map(str::to_string)
                .unwrap_or_else(|| ZERO_TIME.to_string()),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.session
            .as_ref()
            .map(PlaybackSession::state)
            .unwrap_or(PlaybackState::Idle)
    }

    /// Whether transport controls are enabled.
    pub fn is_loaded(&self) -> bool {
        self.session.as_ref().is_some_and(PlaybackSession::is_loaded)
    }

    /// Whether playback is advancing.
    pub fn is_playing(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(PlaybackSession::is_playing)
    }

    /// Whether to show a spinner instead of the play/pause glyph.
    pub fn is_busy(&self) -> bool {
        self.session
            .as_ref()
            .is_none_or(|s| !s.is_loaded() || s.is_buffering())
    }

    /// Whether the track just reached its natural end.
    pub fn did_just_finish(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(PlaybackSession::did_just_finish)
    }

    /// The live session, if any.
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// A receiver that wakes whenever the transport publishes a new status.
    pub fn status_receiver(&self) -> watch::Receiver<TransportStatus> {
        self.status_rx.clone()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> Drop for PlaybackController<T> {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.transport.release();
        }
    }
}
