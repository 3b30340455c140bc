//! Shared test harness: a scripted in-memory engine behind the backend
//! contract, plus document fixtures.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use motif_element::{
    AnimationBackend, BackendConfig, BackendEvent, BackendFactory, Direction, Element, IconData,
    ManualScheduler, Segment,
};

/// Observable engine state, shared between the test and the live backend
/// instance through one `Rc<RefCell<..>>` handle.
pub struct MockState {
    pub config_document: Option<IconData>,
    pub initial_segment: Option<Segment>,
    pub playing: bool,
    pub current_frame: f64,
    pub direction: Direction,
    pub speed: f64,
    pub segment: Option<Segment>,
    pub total_frames: f64,
    pub loaded: bool,
    pub render_calls: usize,
    pub play_calls: usize,
    pub factory_calls: usize,
    pub destroyed: bool,
    pub queued: Vec<BackendEvent>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            config_document: None,
            initial_segment: None,
            playing: false,
            current_frame: 0.0,
            direction: Direction::Forward,
            speed: 1.0,
            segment: None,
            total_frames: 60.0,
            loaded: true,
            render_calls: 0,
            play_calls: 0,
            factory_calls: 0,
            destroyed: false,
            queued: Vec::new(),
        }
    }
}

pub struct MockBackend {
    document: IconData,
    state: Rc<RefCell<MockState>>,
}

impl AnimationBackend for MockBackend {
    fn play(&mut self) {
        let mut state = self.state.borrow_mut();
        state.playing = true;
        state.play_calls += 1;
    }

    fn pause(&mut self) {
        self.state.borrow_mut().playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.playing = false;
        state.current_frame = 0.0;
    }

    fn go_to_and_play(&mut self, frame: f64) {
        let mut state = self.state.borrow_mut();
        state.current_frame = frame;
        state.playing = true;
        state.play_calls += 1;
    }

    fn go_to_and_stop(&mut self, frame: f64) {
        let mut state = self.state.borrow_mut();
        state.current_frame = frame;
        state.playing = false;
    }

    fn set_direction(&mut self, direction: Direction) {
        self.state.borrow_mut().direction = direction;
    }

    fn set_speed(&mut self, speed: f64) {
        self.state.borrow_mut().speed = speed;
    }

    fn set_segment(&mut self, segment: Segment) {
        self.state.borrow_mut().segment = Some(segment);
    }

    fn reset_segments(&mut self) {
        self.state.borrow_mut().segment = None;
    }

    fn play_segments(&mut self, segment: Segment, force: bool) {
        let mut state = self.state.borrow_mut();
        state.segment = Some(segment);
        if force {
            state.current_frame = segment.start;
        }
        state.playing = true;
        state.play_calls += 1;
    }

    fn total_frames(&self) -> f64 {
        self.state.borrow().total_frames
    }

    fn duration_seconds(&self) -> f64 {
        self.state.borrow().total_frames / 60.0
    }

    fn current_frame(&self) -> f64 {
        self.state.borrow().current_frame
    }

    fn is_paused(&self) -> bool {
        !self.state.borrow().playing
    }

    fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    fn render_frame(&mut self) {
        self.state.borrow_mut().render_calls += 1;
    }

    fn document(&self) -> &IconData {
        &self.document
    }

    fn document_mut(&mut self) -> &mut IconData {
        &mut self.document
    }

    fn take_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.state.borrow_mut().queued)
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().destroyed = true;
    }
}

/// A factory whose every instance reports into the returned shared state.
pub fn mock_factory() -> (BackendFactory, Rc<RefCell<MockState>>) {
    let shared = Rc::new(RefCell::new(MockState::default()));
    let handle = shared.clone();

    let factory: BackendFactory = Rc::new(move |config: BackendConfig| {
        let mut state = handle.borrow_mut();
        state.factory_calls += 1;
        state.destroyed = false;
        state.initial_segment = config.initial_segment;
        state.segment = config.initial_segment;
        state.config_document = Some(config.animation_data.clone());
        Ok(Box::new(MockBackend {
            document: config.animation_data,
            state: handle.clone(),
        }) as Box<dyn AnimationBackend>)
    });

    (factory, shared)
}

/// A marker document with two states (`in-reveal`, default `loop-spin`), one
/// `primary` color effect and a grouped stroke-width control.
pub fn marker_icon() -> IconData {
    json!({
        "v": "5.7.4",
        "fr": 60,
        "ip": 0,
        "op": 60,
        "markers": [
            { "cm": "intro:in-reveal", "tm": 0, "dr": 30 },
            { "cm": "default:loop-spin", "tm": 30, "dr": 30 }
        ],
        "layers": [
            {
                "nm": "fill",
                "ef": [{
                    "ef": [{
                        "v": {
                            "x": "var cl = effect('primary')('Color');",
                            "k": [1.0, 0.0, 0.0, 1.0]
                        }
                    }]
                }]
            },
            {
                "nm": "stroke-layers",
                "v": { "k": 2.0 }
            }
        ]
    })
}

/// A marker-less document carrying the legacy customization controls.
pub fn legacy_icon() -> IconData {
    json!({
        "v": "5.5.2",
        "fr": 60,
        "ip": 0,
        "op": 60,
        "layers": [
            { "nm": "scale", "v": { "k": 50.0 } },
            { "nm": "axis", "v": { "k": [50.0, 50.0] } },
            { "nm": "stroke", "v": { "k": 50.0 } },
            { "nm": "state-hover", "v": { "k": 0.0 } },
            { "nm": "state-rest", "v": { "k": 1.0 } },
            {
                "nm": "fill",
                "ef": [{
                    "ef": [{
                        "v": {
                            "x": "var cl = effect('primary')('Color');",
                            "k": [0.0, 0.0, 1.0, 1.0]
                        }
                    }]
                }]
            }
        ]
    })
}

/// An element wired to a fresh mock engine and a manual scheduler, holding
/// the marker fixture as assigned data.
pub fn element_with_trigger(
    trigger: &str,
) -> (Element, Rc<RefCell<MockState>>, ManualScheduler) {
    let (factory, shared) = mock_factory();
    let scheduler = ManualScheduler::new();

    let mut element = Element::new(factory);
    element.set_scheduler(Box::new(scheduler.clone()));
    element
        .set_icon_data(Some(marker_icon()))
        .unwrap();
    element.set_attribute("trigger", Some(trigger)).unwrap();

    (element, shared, scheduler)
}

/// Fire one pending manual-scheduler timer into the element.
pub fn fire_timer(
    element: &mut Element,
    scheduler: &ManualScheduler,
    handle: motif_element::TimerHandle,
) {
    assert!(scheduler.consume(handle), "timer was not armed");
    element
        .dispatch(motif_element::InteractionEvent::TimerFired(handle))
        .unwrap();
}

/// Simulate one engine completion (which leaves the engine paused at the
/// run's end) and pump it through the element.
pub fn complete_run(element: &mut Element, shared: &Rc<RefCell<MockState>>) {
    {
        let mut state = shared.borrow_mut();
        state.playing = false;
        state.queued.push(BackendEvent::Complete);
    }
    element.pump().unwrap();
}
