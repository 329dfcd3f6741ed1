use crate::{
    PlaybackSession, PlaybackSource, PlaybackState, Reader, Section, TransportStatus,
    tests::playback::TRACK_URL,
};

/// WHAT: A catalog section becomes a source with its playtime as label
/// WHY: The player is created straight from the selected section
#[test]
fn given_section_when_converting_then_url_and_playtime_carried() {
    // Given: A section with a playtime
    let section = Section {
        id: "1-1".to_string(),
        title: "A Scandal in Bohemia".to_string(),
        listen_url: "https://example.com/audio/1-1.mp3".to_string(),
        playtime: "01:04:12".to_string(),
        readers: vec![Reader {
            reader_id: "7".to_string(),
            display_name: "Mark".to_string(),
        }],
        ..Section::default()
    };

    // When: Converting
    let source = PlaybackSource::from(&section);

    // Then: URL and nominal duration are set
    assert_eq!(source.url, "https://example.com/audio/1-1.mp3");
    assert_eq!(source.nominal_duration.as_deref(), Some("01:04:12"));
}

/// WHAT: An empty playtime yields no nominal label
/// WHY: Blank labels would render an empty total
#[test]
fn given_section_without_playtime_when_converting_then_no_label() {
    let section = Section {
        listen_url: "https://example.com/audio/x.mp3".to_string(),
        ..Section::default()
    };

    let source = PlaybackSource::from(&section);

    assert_eq!(source.nominal_duration, None);
}

/// WHAT: A loaded, stopped session reports Ready only at exactly 0s
/// WHY: Ready and Paused are told apart by position alone
#[test]
fn given_stopped_session_when_deriving_state_then_position_decides_ready_or_paused() {
    for (current_time, expected) in [(0.0, PlaybackState::Ready), (0.5, PlaybackState::Paused)] {
        // Given: A loaded session that is not advancing
        let mut session = PlaybackSession::new(PlaybackSource::new(TRACK_URL));
        session.apply(&TransportStatus {
            is_loaded: true,
            current_time,
            duration: Some(120.0),
            ..TransportStatus::default()
        });

        // When/Then: State follows the position
        assert_eq!(session.state(), expected, "position {current_time}");
    }
}
