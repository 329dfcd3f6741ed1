mod controller;
mod session;
mod state;
mod transport;

pub use {
    controller::PlaybackController,
    session::{PlaybackSession, PlaybackSource},
    state::PlaybackState,
    transport::{Transport, TransportStatus},
};
