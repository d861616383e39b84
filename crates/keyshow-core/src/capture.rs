// Keyshow Capture Session
// Bounded channel from the external capture collaborator to the single
// consumer thread that drives the engine

use std::sync::mpsc::{self, SyncSender};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::engine::LabelEngine;
use crate::event::CaptureEvent;

/// Errors from the capture boundary.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("capture session is closed")]
    Closed,

    #[error("failed to spawn event thread: {0}")]
    Spawn(#[from] std::io::Error),
}

enum Message {
    Event(CaptureEvent),
    Shutdown,
}

/// Handle given to the capture collaborator. Cloneable; events sent here are
/// consumed in order on the session's dedicated thread. Sending blocks when
/// the queue is full, which bounds how far capture can run ahead of display.
#[derive(Clone)]
pub struct EventSender {
    tx: SyncSender<Message>,
}

impl EventSender {
    pub fn send(&self, event: CaptureEvent) -> Result<(), CaptureError> {
        self.tx
            .send(Message::Event(event))
            .map_err(|_| CaptureError::Closed)
    }
}

/// One running capture session: the consumer thread plus the shutdown side
/// of its channel. Dropped (and joined) by `DisplayManager::stop`.
pub(crate) struct CaptureSession {
    tx: SyncSender<Message>,
    handle: JoinHandle<()>,
}

impl CaptureSession {
    const QUEUE_DEPTH: usize = 256;

    pub(crate) fn spawn(
        engine: Arc<Mutex<LabelEngine>>,
    ) -> Result<(Self, EventSender), CaptureError> {
        let (tx, rx) = mpsc::sync_channel(Self::QUEUE_DEPTH);
        let handle = std::thread::Builder::new()
            .name("keyshow-events".to_string())
            .spawn(move || {
                while let Ok(msg) = rx.recv() {
                    match msg {
                        Message::Event(event) => engine.lock().handle(event),
                        Message::Shutdown => break,
                    }
                }
            })?;
        let sender = EventSender { tx: tx.clone() };
        Ok((Self { tx, handle }, sender))
    }

    /// Signal the consumer thread and block until it has exited. No listener
    /// callback fires after this returns.
    pub(crate) fn shutdown(self) {
        // the thread may already be gone if every sender was dropped
        let _ = self.tx.send(Message::Shutdown);
        if self.handle.join().is_err() {
            log::warn!("event thread panicked during shutdown");
        }
    }
}
