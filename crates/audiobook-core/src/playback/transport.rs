use tokio::sync::watch;

/// Status snapshot reported by a [`Transport`].
///
/// Delivered through a `watch` channel: consumers only ever observe the
/// latest snapshot, never a backlog.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransportStatus {
    /// Resource is decoded far enough to accept transport commands.
    pub is_loaded: bool,
    /// Playback is stalled waiting for data.
    pub is_buffering: bool,
    /// Position is advancing.
    pub is_playing: bool,
    /// Set once when playback reaches the natural end of the track.
    pub did_just_finish: bool,
    /// Current position in seconds.
    pub current_time: f64,
    /// Track length in seconds, `None` until the engine resolves it.
    pub duration: Option<f64>,
}

/// Capability interface over an audio decoding/playback engine.
///
/// The engine owns at most one resource at a time. Commands never fail from
/// the caller's point of view; problems show up as `is_loaded == false` in the
/// next status snapshot.
pub trait Transport {
    /// Bind a new resource, replacing any previous one.
    fn load(&mut self, url: &str);

    /// Start or resume playback.
    fn play(&mut self);

    /// Pause playback, keeping the position.
    fn pause(&mut self);

    /// Move the playhead. The engine clamps to end-of-track.
    fn seek_to(&mut self, seconds: f64);

    /// Release the bound resource.
    fn release(&mut self);

    /// Subscribe to status snapshots.
    fn subscribe(&self) -> watch::Receiver<TransportStatus>;
}
