// Keyshow Transcript Buffer
// Ordered buffer of rendered key records, append/pop-at-tail only

use std::time::Instant;

/// One rendered key in the transcript. The markup is fully resolved at
/// insertion time; the flags carry everything the render pass needs for
/// spacing and erasure decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedKey {
    pub stamp: Instant,
    /// Record is a modifier chord (prefix+key)
    pub chord: bool,
    pub erase_stop: bool,
    pub erase_stop_always: bool,
    pub wide_spacing: bool,
    pub markup: String,
}

/// Append/pop-only sequence of rendered keys. Order equals the temporal
/// order of accepted key events; there is no random-access mutation.
#[derive(Debug, Default)]
pub struct Transcript {
    keys: Vec<RenderedKey>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: RenderedKey) {
        self.keys.push(key);
    }

    pub fn pop(&mut self) -> Option<RenderedKey> {
        self.keys.pop()
    }

    pub fn last(&self) -> Option<&RenderedKey> {
        self.keys.last()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Read-only view for the render pass.
    pub fn keys(&self) -> &[RenderedKey] {
        &self.keys
    }
}
