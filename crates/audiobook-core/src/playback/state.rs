/// Lifecycle state of the player, derived from the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No source bound.
    Idle,
    /// Source bound, engine has not reported loaded.
    Loading,
    /// Loaded and not advancing with the position at 0s.
    ///
    /// Derived from position alone: pausing at exactly 0s (for example right
    /// after a restart-from-end seek) also reports `Ready`.
    Ready,
    /// Loaded and advancing.
    Playing,
    /// Loaded, not advancing.
    Paused,
    /// Reached the natural end; behaves like `Paused` at end of track.
    Finished,
}
