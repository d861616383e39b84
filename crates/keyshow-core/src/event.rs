// Keyshow Event Model
// Input events delivered by the capture collaborator, and the button signal
// forwarded to the image listener

use std::time::Instant;

use crate::modifier::Modifier;

/// Snapshot of the modifier and lock state carried by a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub super_: bool,
    pub hyper: bool,
    pub alt_gr: bool,
    pub caps_lock: bool,
    pub num_lock: bool,
}

impl ModState {
    pub fn active(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Super => self.super_,
            Modifier::Hyper => self.hyper,
            Modifier::AltGr => self.alt_gr,
        }
    }
}

/// One keyboard event from the capture collaborator.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub stamp: Instant,
    /// Raw keysym code, for diagnostics only
    pub keysym: u32,
    /// Symbolic key name; a missing symbol marks a malformed event
    pub symbol: Option<String>,
    /// Translated/composed string, when input translation produced one
    pub string: Option<String>,
    pub pressed: bool,
    pub repeated: bool,
    /// The input translation layer consumed this event (compose in progress)
    pub filtered: bool,
    pub mods: ModState,
    /// Raw modifier bitmask, for diagnostics only
    pub mods_mask: u32,
}

/// One mouse button event from the capture collaborator.
#[derive(Debug, Clone, Copy)]
pub struct ButtonEvent {
    pub stamp: Instant,
    /// 1 = left, 2 = middle, 3 = right, 4-7 = wheel, 8+ = extra buttons
    pub button: u8,
    pub pressed: bool,
}

/// Button visual state forwarded to the image listener. Slots 1-7 are the
/// physical mouse buttons; 8, 9 and 10 are the ctrl/alt/shift proxies.
#[derive(Debug, Clone, Copy)]
pub struct ButtonState {
    pub stamp: Instant,
    pub button: u8,
    pub pressed: bool,
}

/// What the capture collaborator delivers: key events, button events, or the
/// sentinel signalling that the source can no longer produce events.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    Key(KeyEvent),
    Button(ButtonEvent),
    Failed,
}

impl KeyEvent {
    /// Convenience constructor for a plain press with no translation.
    pub fn press(stamp: Instant, symbol: &str) -> Self {
        Self {
            stamp,
            keysym: 0,
            symbol: Some(symbol.to_string()),
            string: None,
            pressed: true,
            repeated: false,
            filtered: false,
            mods: ModState::default(),
            mods_mask: 0,
        }
    }
}
