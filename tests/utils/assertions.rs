//! Test assertion helpers - fluent API for verifying what observers received
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use duelhub::{GameSession, ServerEvent};

use super::mocks::MockObserver;
use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct ObserverAssertion<'a> {
    observers: Vec<&'a MockObserver>,
}

impl<'a> ObserverAssertion<'a> {
    /// Create an assertion for every observer that is not broken
    pub fn for_healthy_observers(setup: &'a TestSetup) -> Self {
        let observers = setup
            .observers
            .iter()
            .map(|(_, observer)| observer)
            .filter(|observer| !observer.is_broken())
            .collect();
        Self { observers }
    }

    pub fn for_observers(observers: Vec<&'a MockObserver>) -> Self {
        Self { observers }
    }

    /// Assert that every observer received exactly `count` frames
    pub fn received_count(self, count: usize) -> Self {
        for observer in &self.observers {
            assert_eq!(
                observer.received_count(),
                count,
                "observer received {:?}",
                observer.received()
            );
        }
        self
    }

    /// Assert that every observer saw the same frames in the same order
    pub fn received_identical_sequences(self) -> Self {
        if let Some(first) = self.observers.first() {
            let expected = first.received();
            for observer in &self.observers[1..] {
                assert_eq!(observer.received(), expected);
            }
        }
        self
    }

    /// Decode the game updates received by the first observer
    pub fn updates(&self) -> Vec<GameSession> {
        self.observers
            .first()
            .map(|observer| observer.received())
            .unwrap_or_default()
            .iter()
            .map(|frame| decode_update(frame))
            .collect()
    }
}

pub fn decode_update(frame: &str) -> GameSession {
    let event: ServerEvent = serde_json::from_str(frame).expect("frame is a server event");
    match event {
        ServerEvent::GameUpdate { session } => session,
    }
}

pub fn frame_type(frame: &str) -> String {
    let value: Value = serde_json::from_str(frame).expect("frame is JSON");
    value["type"].as_str().unwrap_or_default().to_string()
}
