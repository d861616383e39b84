// Keyshow Label Engine
// Turns the capture event stream into transcript mutations and label updates

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexMap;

use crate::catalog::{ReplacementCatalog, ResolvedRepl};
use crate::event::{ButtonEvent, ButtonState, CaptureEvent, KeyEvent};
use crate::markup::{self, FontInventory, MarkupEncoder};
use crate::modifier::{Modifier, ALL_MODS, STEALTH_MODS, VISIBLE_MODS};
use crate::render::{render_label, RenderSettings};
use crate::settings::{BackspaceMode, KeyMode, ModsMode, Options};
use crate::transcript::{RenderedKey, Transcript};

/// Receives every rebuilt label markup. `None` signals an unrecoverable
/// capture failure; the `bool` marks synthetic (timer-driven) renders.
pub type LabelListener = Box<dyn FnMut(Option<&str>, bool) + Send>;

/// Receives button visual-state updates. `None` means clear all slots.
pub type ImageListener = Box<dyn FnMut(Option<ButtonState>) + Send>;

/// Modifiers mirrored into button slots, with their slot indices.
/// Physical mouse buttons occupy slots 1-7.
const TRACKED_BUTTONS: [(Modifier, u8); 3] =
    [(Modifier::Ctrl, 8), (Modifier::Alt, 9), (Modifier::Shift, 10)];

/// The event-to-markup engine. Owns the transcript and the resolved
/// replacement tables; not internally synchronized — the caller serializes
/// event handling and render invocations (see `DisplayManager`).
pub struct LabelEngine {
    opts: Options,
    catalog: ReplacementCatalog,
    fonts: Box<dyn FontInventory + Send>,
    resolved_syms: IndexMap<&'static str, ResolvedRepl>,
    resolved_mods: HashMap<Modifier, String>,
    transcript: Transcript,
    enabled: bool,
    on_label: LabelListener,
    on_image: ImageListener,
}

impl LabelEngine {
    pub fn new(
        opts: Options,
        fonts: Box<dyn FontInventory + Send>,
        on_label: LabelListener,
        on_image: ImageListener,
    ) -> Self {
        let enabled = opts.enabled;
        let mut engine = Self {
            opts,
            catalog: ReplacementCatalog::builtin(),
            fonts,
            resolved_syms: IndexMap::new(),
            resolved_mods: HashMap::new(),
            transcript: Transcript::new(),
            enabled,
            on_label,
            on_image,
        };
        engine.update_replacement_tables();
        engine
    }

    /// Recompute the resolved markup for every catalog entry and modifier
    /// prefix. Must be called whenever the mods mode or the font inventory
    /// changes; never runs per keystroke.
    pub fn update_replacement_tables(&mut self) {
        let encoder = MarkupEncoder::new(self.fonts.font_families());
        self.resolved_syms = self
            .catalog
            .entries()
            .map(|(sym, r)| {
                (
                    sym,
                    ResolvedRepl {
                        erase_stop: r.erase_stop,
                        erase_stop_always: r.erase_stop_always,
                        wide_spacing: r.wide_spacing,
                        markup: encoder.resolve(&r.text),
                    },
                )
            })
            .collect();
        self.resolved_mods = ALL_MODS
            .into_iter()
            .map(|m| (m, encoder.resolve(&m.prefix(self.opts.mods_mode))))
            .collect();
    }

    /// Replace the options and rebuild the resolved tables.
    pub fn set_options(&mut self, opts: Options) {
        self.opts = opts;
        self.update_replacement_tables();
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Read-only view of the transcript.
    pub fn transcript(&self) -> &[RenderedKey] {
        self.transcript.keys()
    }

    /// Empty the transcript (external inactivity timeout).
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Re-render without any new event, to let the recency underline expire.
    pub fn queue_refresh(&mut self) {
        self.update_label(Instant::now(), true);
    }

    /// Entry point for the capture stream.
    pub fn handle(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Key(ev) => self.key_event(&ev),
            CaptureEvent::Button(ev) => self.button_event(&ev),
            CaptureEvent::Failed => {
                log::debug!("capture source failed");
                (self.on_label)(None, false);
            }
        }
    }

    fn key_event(&mut self, ev: &KeyEvent) {
        let Some(symbol) = ev.symbol.as_deref() else {
            log::debug!("key event without symbol dropped");
            return;
        };

        if self.enabled {
            for (m, slot) in TRACKED_BUTTONS {
                if m.keysyms().contains(&symbol) {
                    (self.on_image)(Some(ButtonState {
                        stamp: ev.stamp,
                        button: slot,
                        pressed: ev.pressed,
                    }));
                }
            }
        }

        if !ev.pressed {
            log::debug!("key released {:5}(ks): {}", ev.keysym, symbol);
            return;
        }
        if self.opts.ignore.contains(symbol) {
            log::debug!("key ignored  {:5}(ks): {}", ev.keysym, symbol);
            return;
        }
        if ev.filtered {
            log::debug!("key filtered {:5}(ks): {}", ev.keysym, symbol);
        } else {
            let state = if ev.repeated { "repeated" } else { "pressed" };
            log::debug!(
                "key {:8} {:5}(ks): {:?} ({}, mask: {:08b})",
                state,
                ev.keysym,
                ev.string,
                symbol,
                ev.mods_mask
            );
        }

        // stealth enable/disable gesture: a bare self-press of a modifier
        for m in STEALTH_MODS {
            if !ev.repeated && ev.mods.active(m) && m.keysyms().contains(&symbol) {
                self.enabled = !self.enabled;
                if !self.enabled {
                    (self.on_image)(None);
                }
                log::info!(
                    "{m}+{m} detected: display {}",
                    if self.enabled { "enabled" } else { "disabled" }
                );
            }
        }
        if !self.enabled {
            return;
        }

        // keep the overlay alive while the user is composing a chord
        let mod_pressed = Modifier::from_keysym(symbol).is_some();
        let mut update = !self.transcript.is_empty() && (ev.filtered || mod_pressed);

        if !ev.filtered {
            update |= match self.opts.key_mode {
                KeyMode::Composed | KeyMode::Translated => self.key_translated(ev, symbol),
                KeyMode::Raw => self.key_raw(ev, symbol),
                KeyMode::Keysyms => self.key_keysyms(ev, symbol),
            };
        }
        if update {
            self.update_label(ev.stamp, false);
        }
    }

    fn key_translated(&mut self, ev: &KeyEvent, symbol: &str) -> bool {
        // visible modifiers
        let mut mod_prefix = String::new();
        for m in VISIBLE_MODS {
            if ev.mods.active(m) {
                mod_prefix.push_str(self.mod_markup(m));
            }
        }

        // backspace handling
        if symbol == "BackSpace" && !self.opts.mods_only && mod_prefix.is_empty() && !ev.mods.shift
        {
            if let Some(repl) = self.resolved_syms.get("BackSpace").cloned() {
                if self.opts.bak_mode == BackspaceMode::Normal {
                    let markup = repl.markup.clone();
                    self.push_key(ev.stamp, false, &repl, markup);
                } else {
                    let pop = match self.transcript.last() {
                        None => false,
                        Some(last) if last.chord => false,
                        Some(last) => match self.opts.bak_mode {
                            BackspaceMode::Baked => !last.erase_stop,
                            _ => !last.erase_stop_always,
                        },
                    };
                    if pop {
                        self.transcript.pop();
                    } else {
                        let markup = repl.markup.clone();
                        self.push_key(ev.stamp, false, &repl, markup);
                    }
                }
                return true;
            }
        }

        // regular keys
        let entry = self.resolved_syms.get(symbol).cloned();
        let replaced = entry.is_some();
        let mut repl = match entry {
            Some(r) => r,
            None => {
                if Modifier::from_keysym(symbol).is_some() {
                    return false;
                }
                Self::literal_repl(ev.string.as_deref(), symbol, false)
            }
        };

        if ev.mods.shift
            && (replaced
                || (!mod_prefix.is_empty()
                    && self.opts.vis_shift
                    && self.opts.mods_mode != ModsMode::Emacs))
        {
            // add back the shift the translation layer consumed
            mod_prefix.push_str(self.mod_markup(Modifier::Shift));
        }

        // whitespace handling
        if !self.opts.vis_space && mod_prefix.is_empty() && self.catalog.is_whitespace(symbol) {
            if symbol != "Return" && symbol != "KP_Enter" {
                repl.markup = ev.string.clone().unwrap_or_default();
            } else if self.opts.multiline {
                repl.markup = String::new();
            }
        }

        // multiline
        if (symbol == "Return" || symbol == "KP_Enter") && self.opts.multiline {
            repl.markup.push('\n');
        }

        if mod_prefix.is_empty() {
            if !self.opts.mods_only {
                let mut text = repl.markup.clone();
                Self::lock_suffix(ev, symbol, &mut text);
                self.push_key(ev.stamp, false, &repl, text);
                return true;
            }
            false
        } else {
            let text = self.chord_text(&mod_prefix, &repl.markup);
            self.push_key(ev.stamp, true, &repl, text);
            true
        }
    }

    fn key_raw(&mut self, ev: &KeyEvent, symbol: &str) -> bool {
        // every active modifier is shown
        let mut mod_prefix = String::new();
        for m in ALL_MODS {
            if ev.mods.active(m) {
                mod_prefix.push_str(self.mod_markup(m));
            }
        }

        // keycaps
        let repl = match self.resolved_syms.get(symbol).cloned() {
            Some(r) => r,
            None => {
                if Modifier::from_keysym(symbol).is_some() {
                    return false;
                }
                Self::literal_repl(ev.string.as_deref(), symbol, true)
            }
        };

        if mod_prefix.is_empty() {
            let mut text = repl.markup.clone();
            Self::lock_suffix(ev, symbol, &mut text);
            self.push_key(ev.stamp, false, &repl, text);
        } else {
            let text = self.chord_text(&mod_prefix, &repl.markup);
            self.push_key(ev.stamp, true, &repl, text);
        }
        true
    }

    fn key_keysyms(&mut self, ev: &KeyEvent, symbol: &str) -> bool {
        let value = if self.catalog.contains(symbol) {
            symbol.to_string()
        } else {
            ev.string
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(symbol)
                .to_string()
        };
        self.transcript.push(RenderedKey {
            stamp: ev.stamp,
            chord: true,
            erase_stop: true,
            erase_stop_always: true,
            wide_spacing: true,
            markup: value,
        });
        true
    }

    fn button_event(&mut self, ev: &ButtonEvent) {
        if !self.enabled {
            return;
        }
        log::debug!(
            "mouse button {} {}",
            ev.button,
            if ev.pressed { "pressed" } else { "released" }
        );

        // Buttons 1-7 (left/middle/right and the wheel directions) go to the
        // image; extra buttons only have a textual rendition, press only.
        if ev.button > 7 {
            if !ev.pressed {
                return;
            }
            // what is usually called "Mouse 4" arrives as button 8
            let markup = markup::escape(&format!("M{}", ev.button - 4));
            self.transcript.push(RenderedKey {
                stamp: ev.stamp,
                chord: false,
                erase_stop: true,
                erase_stop_always: true,
                wide_spacing: true,
                markup,
            });
            self.update_label(ev.stamp, false);
        } else {
            (self.on_image)(Some(ButtonState {
                stamp: ev.stamp,
                button: ev.button,
                pressed: ev.pressed,
            }));
        }
    }

    fn update_label(&mut self, now: Instant, synthetic: bool) {
        let settings = RenderSettings {
            recent_thr: Duration::from_secs_f64(self.opts.recent_thr.max(0.0)),
            compr_cnt: self.opts.compr_cnt,
            vis_space: self.opts.vis_space,
        };
        let return_markup = self
            .resolved_syms
            .get("Return")
            .map(|r| r.markup.clone())
            .unwrap_or_default();
        let markup = render_label(self.transcript.keys(), now, &settings, &return_markup);
        log::debug!("label updated: {markup:?}");
        (self.on_label)(Some(&markup), synthetic);
    }

    fn push_key(&mut self, stamp: Instant, chord: bool, repl: &ResolvedRepl, markup: String) {
        self.transcript.push(RenderedKey {
            stamp,
            chord,
            erase_stop: repl.erase_stop,
            erase_stop_always: repl.erase_stop_always,
            wide_spacing: repl.wide_spacing,
            markup,
        });
    }

    fn mod_markup(&self, m: Modifier) -> &str {
        self.resolved_mods.get(&m).map_or("", String::as_str)
    }

    /// Chord text, guarding against an ambiguous glyph run when the
    /// replacement starts with the same character the prefix ends with.
    fn chord_text(&self, mod_prefix: &str, repl_markup: &str) -> String {
        if self.opts.mods_mode == ModsMode::Emacs
            || repl_markup.chars().next() != mod_prefix.chars().last()
        {
            format!("{mod_prefix}{repl_markup}")
        } else {
            format!("{mod_prefix}‟{repl_markup}”")
        }
    }

    /// Fallback entry for a symbol without catalog data.
    fn literal_repl(string: Option<&str>, symbol: &str, uppercase: bool) -> ResolvedRepl {
        let text = match string.filter(|s| !s.is_empty()) {
            Some(s) if uppercase => s.to_uppercase(),
            Some(s) => s.to_string(),
            None => symbol.to_string(),
        };
        ResolvedRepl {
            erase_stop: false,
            erase_stop_always: false,
            wide_spacing: text.chars().count() > 1,
            markup: markup::escape(&text),
        }
    }

    fn lock_suffix(ev: &KeyEvent, symbol: &str, text: &mut String) {
        let lamp = match symbol {
            "Caps_Lock" => Some(ev.mods.caps_lock),
            "Num_Lock" => Some(ev.mods.num_lock),
            _ => None,
        };
        if let Some(on) = lamp {
            // the lamp state at press time is the state being left
            text.push_str(if on { "(off)" } else { "(on)" });
        }
    }
}
