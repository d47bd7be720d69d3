#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use duelhub::{ObserverSink, SocketError};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Observer that records every frame the hub writes to it.
/// Clones share state, so the test keeps one handle and the hub owns the other.
#[derive(Clone, Default)]
pub struct MockObserver {
    received: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    broken: Arc<AtomicBool>,
}

impl MockObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer whose writes always fail
    pub fn broken() -> Self {
        let observer = Self::default();
        observer.broken.store(true, Ordering::SeqCst);
        observer
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn is_broken(&self) -> bool {
        self.broken.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObserverSink for MockObserver {
    async fn send_text(&mut self, message: String) -> Result<(), SocketError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(SocketError::SendFailed("observer went away".to_string()));
        }
        self.received.lock().unwrap().push(message);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
