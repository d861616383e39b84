// Keyshow Label Manager
// Owns the engine behind a mutex and the capture session lifecycle

use std::sync::Arc;

use parking_lot::Mutex;

use crate::capture::{CaptureError, CaptureSession, EventSender};
use crate::engine::LabelEngine;

/// Thread-safe front door for the engine.
///
/// The engine mutex is the single serialization point: event handling on the
/// capture-session thread and the timer/config calls below all take it, so
/// transcript mutation and rendering never overlap.
pub struct DisplayManager {
    engine: Arc<Mutex<LabelEngine>>,
    session: Option<CaptureSession>,
}

impl DisplayManager {
    pub fn new(engine: LabelEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            session: None,
        }
    }

    /// Start a capture session, replacing any previous one, and return the
    /// sender the capture collaborator feeds events into.
    pub fn start(&mut self) -> Result<EventSender, CaptureError> {
        self.stop();
        let (session, sender) = CaptureSession::spawn(Arc::clone(&self.engine))?;
        self.session = Some(session);
        log::debug!("capture session started");
        Ok(sender)
    }

    /// Stop the current capture session, blocking until its thread has
    /// exited. Idempotent.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown();
            log::debug!("capture session stopped");
        }
    }

    /// Empty the transcript (external inactivity timeout).
    pub fn clear(&self) {
        self.engine.lock().clear();
    }

    /// Force a synthetic render, used by the recency-underline timer.
    pub fn queue_refresh(&self) {
        self.engine.lock().queue_refresh();
    }

    /// Rebuild the resolved replacement tables after a display-mode or font
    /// inventory change.
    pub fn update_replacement_tables(&self) {
        self.engine.lock().update_replacement_tables();
    }

    /// Replace the options and rebuild the resolved tables.
    pub fn set_options(&self, opts: crate::settings::Options) {
        self.engine.lock().set_options(opts);
    }

    /// Direct access to the engine, for callers that drive events
    /// synchronously (tests, replay tools).
    pub fn engine(&self) -> Arc<Mutex<LabelEngine>> {
        Arc::clone(&self.engine)
    }
}

impl Drop for DisplayManager {
    fn drop(&mut self) {
        self.stop();
    }
}
