mod common;

use std::collections::HashMap;

use common::{legacy_icon, marker_icon, mock_factory};
use motif_element::{
    BackendEvent, Direction, IconError, PlaybackOptions, Player, PlayerEvent, Segment,
};

#[test]
fn test_connect_twice_is_a_programming_error() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    player.connect().unwrap();
    assert!(matches!(player.connect(), Err(IconError::AlreadyConnected)));
}

#[test]
fn test_disconnect_without_connect_is_a_programming_error() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    assert!(matches!(player.disconnect(), Err(IconError::NotConnected)));
}

#[test]
fn test_control_calls_require_a_connection() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    assert!(matches!(player.play(), Err(IconError::NotConnected)));
    assert!(matches!(player.pause(), Err(IconError::NotConnected)));
    assert!(matches!(
        player.set_state(Some("in-reveal")),
        Err(IconError::NotConnected)
    ));
}

#[test]
fn test_ready_fires_on_connect_when_engine_is_loaded() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    player.connect().unwrap();

    assert!(player.is_ready());
    assert_eq!(player.take_events(), vec![PlayerEvent::Ready]);
}

#[test]
fn test_ready_waits_for_config_ready_when_loading_is_progressive() {
    let (factory, shared) = mock_factory();
    shared.borrow_mut().loaded = false;
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    player.connect().unwrap();
    assert!(!player.is_ready());
    assert!(player.take_events().is_empty());

    shared.borrow_mut().queued.push(BackendEvent::ConfigReady);
    player.pump();

    assert!(player.is_ready());
    assert_eq!(player.take_events(), vec![PlayerEvent::Ready]);
}

#[test]
fn test_ready_is_emitted_at_most_once() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    player.connect().unwrap();
    player.take_events();

    shared.borrow_mut().queued.push(BackendEvent::ConfigReady);
    player.pump();
    assert!(player.take_events().is_empty());
}

#[test]
fn test_default_flagged_state_is_selected_on_construction() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    let names: Vec<&str> = player.states().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["in-reveal", "loop-spin"]);
    assert_eq!(player.state(), Some("loop-spin"));

    player.connect().unwrap();
    assert_eq!(
        shared.borrow().initial_segment,
        Some(Segment::new(30.0, 61.0))
    );
}

#[test]
fn test_frame_extents_are_clamped_to_the_state_catalog() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    let state = shared.borrow();
    let document = state.config_document.as_ref().unwrap();
    assert_eq!(document["ip"].as_f64(), Some(0.0));
    assert_eq!(document["op"].as_f64(), Some(61.0));
}

#[test]
fn test_set_state_restricts_the_playback_window() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.set_state(Some("in-reveal")).unwrap();

    assert_eq!(player.state(), Some("in-reveal"));
    let state = shared.borrow();
    assert_eq!(state.segment, Some(Segment::new(0.0, 31.0)));
    assert_eq!(state.current_frame, 0.0);
}

#[test]
fn test_unknown_state_falls_back_to_the_default() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.set_state(Some("in-reveal")).unwrap();
    player.set_state(Some("missing")).unwrap();

    assert_eq!(player.state(), Some("loop-spin"));
}

#[test]
fn test_set_state_restarts_playback_in_progress() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.play().unwrap();
    assert!(player.is_playing());

    player.set_state(Some("in-reveal")).unwrap();
    assert!(player.is_playing());
    assert!(shared.borrow().play_calls >= 2);
}

#[test]
fn test_play_from_beginning_uses_the_state_window() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.play_from_beginning().unwrap();

    let state = shared.borrow();
    assert!(state.playing);
    assert_eq!(state.segment, Some(Segment::new(30.0, 61.0)));
    assert_eq!(state.current_frame, 30.0);
    assert_eq!(state.direction, Direction::Forward);
}

#[test]
fn test_color_override_and_reset() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    assert_eq!(player.color("primary").as_deref(), Some("#ff0000"));

    let mut palette = HashMap::new();
    palette.insert("PRIMARY".to_string(), "#00ff00".to_string());
    player.set_colors(Some(&palette)).unwrap();
    assert_eq!(player.color("primary").as_deref(), Some("#00ff00"));

    player.set_colors(None).unwrap();
    assert_eq!(player.color("primary").as_deref(), Some("#ff0000"));
}

#[test]
fn test_single_color_setter_is_case_insensitive() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.set_color("Primary", Some("#0000ff")).unwrap();
    assert_eq!(player.color("PRIMARY").as_deref(), Some("#0000ff"));

    player.set_color("primary", None).unwrap();
    assert_eq!(player.color("primary").as_deref(), Some("#ff0000"));
}

#[test]
fn test_color_rewrite_forces_a_render_refresh() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();
    player.take_events();

    let before = shared.borrow().render_calls;
    player.set_color("primary", Some("#123456")).unwrap();

    assert!(shared.borrow().render_calls > before);
    assert_eq!(player.take_events(), vec![PlayerEvent::Refresh]);
}

#[test]
fn test_initial_colors_land_before_first_frame() {
    let (factory, _shared) = mock_factory();
    let mut palette = HashMap::new();
    palette.insert("primary".to_string(), "#336699".to_string());
    let options = PlaybackOptions {
        colors: Some(palette),
        ..Default::default()
    };
    let mut player = Player::new(factory, marker_icon(), options);
    player.connect().unwrap();

    assert_eq!(player.color("primary").as_deref(), Some("#336699"));
}

#[test]
fn test_stroke_override_and_reset() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    assert_eq!(player.stroke(), Some(2.0));

    player.set_stroke(Some(3.0)).unwrap();
    assert_eq!(player.stroke(), Some(3.0));

    player.set_stroke(None).unwrap();
    assert_eq!(player.stroke(), Some(2.0));
}

#[test]
fn test_out_of_range_initial_stroke_is_dropped_for_marker_documents() {
    let (factory, _shared) = mock_factory();
    let options = PlaybackOptions {
        stroke: Some(7.0),
        ..Default::default()
    };
    let mut player = Player::new(factory, marker_icon(), options);
    player.connect().unwrap();

    assert_eq!(player.stroke(), Some(2.0));
}

#[test]
fn test_set_frame_clamps_to_the_valid_range() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.set_frame(999.0).unwrap();
    assert_eq!(shared.borrow().current_frame, 59.0);

    player.set_frame(-4.0).unwrap();
    assert_eq!(shared.borrow().current_frame, 0.0);
}

#[test]
fn test_speed_and_direction_survive_reconnects() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());

    player.set_speed(2.0);
    player.set_direction(Direction::Backward);

    player.connect().unwrap();
    assert_eq!(shared.borrow().speed, 2.0);
    assert_eq!(shared.borrow().direction, Direction::Backward);

    player.disconnect().unwrap();
    player.connect().unwrap();
    assert_eq!(shared.borrow().speed, 2.0);
    assert_eq!(shared.borrow().direction, Direction::Backward);
}

#[test]
fn test_duration_follows_the_engine_frame_rate() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    assert_eq!(player.duration(), 0.0);
    assert_eq!(player.frames(), 0.0);

    player.connect().unwrap();
    shared.borrow_mut().total_frames = 90.0;

    approx::assert_relative_eq!(player.duration(), 1.5);
    approx::assert_relative_eq!(player.frames(), 89.0);
}

#[test]
fn test_disconnect_destroys_the_engine_instance() {
    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    player.disconnect().unwrap();

    assert!(shared.borrow().destroyed);
    assert!(!player.is_connected());
    assert!(!player.is_ready());
}

#[test]
fn test_listener_receives_republished_engine_events() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let (factory, shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    let completions = Rc::new(RefCell::new(0));
    let counter = completions.clone();
    player.add_event_listener(PlayerEvent::Complete, move |_| {
        *counter.borrow_mut() += 1;
    });

    shared.borrow_mut().queued.push(BackendEvent::Complete);
    shared.borrow_mut().queued.push(BackendEvent::LoopComplete);
    player.pump();

    assert_eq!(*completions.borrow(), 2);
}

#[test]
fn test_properties_snapshot_reflects_the_document_surface() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, marker_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    let properties = player.properties();
    let colors = properties.colors.unwrap();
    assert_eq!(colors.get("primary").map(String::as_str), Some("#ff0000"));
    assert_eq!(properties.stroke, Some(2.0));
    assert_eq!(properties.state.as_deref(), Some("loop-spin"));
}

#[test]
fn test_legacy_document_bakes_customization_before_connect() {
    let (factory, shared) = mock_factory();
    let options = PlaybackOptions {
        stroke: Some(100.0),
        state: Some("hover".to_string()),
        scale: Some(100.0),
        axis_x: Some(25.0),
        axis_y: Some(75.0),
        ..Default::default()
    };
    let mut player = Player::new(factory, legacy_icon(), options);
    player.connect().unwrap();

    let state = shared.borrow();
    let layers = &state.config_document.as_ref().unwrap()["layers"];
    assert_eq!(layers[0]["v"]["k"].as_f64(), Some(100.0)); // scale
    assert_eq!(layers[1]["v"]["k"][0].as_f64(), Some(25.0)); // axis x
    assert_eq!(layers[1]["v"]["k"][1].as_f64(), Some(75.0)); // axis y
    assert_eq!(layers[2]["v"]["k"].as_f64(), Some(100.0)); // stroke
    assert_eq!(layers[3]["v"]["k"].as_f64(), Some(1.0)); // state-hover
    assert_eq!(layers[4]["v"]["k"].as_f64(), Some(0.0)); // state-rest
}

#[test]
fn test_legacy_document_keeps_only_the_palette_live() {
    let (factory, _shared) = mock_factory();
    let mut player = Player::new(factory, legacy_icon(), PlaybackOptions::default());
    player.connect().unwrap();

    assert_eq!(player.stroke(), None);
    assert_eq!(player.color_names(), vec!["primary".to_string()]);
    assert!(player.states().is_empty());
}
