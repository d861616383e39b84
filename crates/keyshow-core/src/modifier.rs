// Keyshow Modifier Model
// Maps modifiers to their keysym sets and display prefixes

use strum_macros::Display;

use crate::catalog::{GlyphAlt, ReplText};
use crate::settings::ModsMode;

/// A modifier tracked for chord prefixes and the stealth toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Super,
    Hyper,
    AltGr,
}

/// Prefix priority for translated/composed chords. Shift is handled
/// separately by the re-attachment rule.
pub const VISIBLE_MODS: [Modifier; 4] =
    [Modifier::Ctrl, Modifier::Alt, Modifier::Super, Modifier::Hyper];

/// Prefix order in raw mode: every active modifier is shown.
pub const ALL_MODS: [Modifier; 6] = [
    Modifier::Shift,
    Modifier::Ctrl,
    Modifier::Alt,
    Modifier::Super,
    Modifier::Hyper,
    Modifier::AltGr,
];

/// Modifiers that participate in the stealth enable/disable gesture.
pub const STEALTH_MODS: [Modifier; 3] = [Modifier::Shift, Modifier::Ctrl, Modifier::Alt];

const FA5: &str = "Font Awesome 5 Free";
const FA4: &str = "FontAwesome";

const WIN_PREFIX: &[GlyphAlt] = &[
    GlyphAlt { text: "\u{f17a}", font: Some(FA5), suffix: Some("+") },
    GlyphAlt { text: "\u{f17a}", font: Some(FA4), suffix: Some("+") },
    GlyphAlt { text: "Win", font: None, suffix: Some("+") },
];

const TUX_PREFIX: &[GlyphAlt] = &[
    GlyphAlt { text: "\u{f17c}", font: Some(FA5), suffix: Some("+") },
    GlyphAlt { text: "\u{f17c}", font: Some(FA4), suffix: Some("+") },
    GlyphAlt { text: "Super", font: None, suffix: Some("+") },
];

impl Modifier {
    /// Keysyms that *are* this modifier.
    pub fn keysyms(self) -> &'static [&'static str] {
        match self {
            Modifier::Shift => &["Shift_L", "Shift_R"],
            Modifier::Ctrl => &["Control_L", "Control_R"],
            Modifier::Alt => &["Alt_L", "Alt_R", "Meta_L", "Meta_R"],
            Modifier::Super => &["Super_L", "Super_R"],
            Modifier::Hyper => &["Hyper_L", "Hyper_R"],
            Modifier::AltGr => &["ISO_Level3_Shift"],
        }
    }

    /// The modifier a keysym belongs to, if any.
    pub fn from_keysym(sym: &str) -> Option<Modifier> {
        ALL_MODS.into_iter().find(|m| m.keysyms().contains(&sym))
    }

    /// Display prefix for the given mode. Modes without a dedicated entry
    /// fall back to the normal prefix.
    pub fn prefix(self, mode: ModsMode) -> ReplText {
        use ReplText::{Glyphs, Plain};
        match (self, mode) {
            (Modifier::Shift, ModsMode::Emacs) => Plain("S-"),
            (Modifier::Shift, ModsMode::Mac) => Plain("⇧+"),
            (Modifier::Shift, _) => Plain("Shift+"),

            (Modifier::Ctrl, ModsMode::Emacs) => Plain("C-"),
            (Modifier::Ctrl, ModsMode::Mac) => Plain("⌘+"),
            (Modifier::Ctrl, _) => Plain("Ctrl+"),

            (Modifier::Alt, ModsMode::Emacs) => Plain("M-"),
            (Modifier::Alt, ModsMode::Mac) => Plain("⌥+"),
            (Modifier::Alt, _) => Plain("Alt+"),

            (Modifier::Super, ModsMode::Emacs) => Plain("s-"),
            (Modifier::Super, ModsMode::Win) => Glyphs(WIN_PREFIX),
            (Modifier::Super, ModsMode::Tux) => Glyphs(TUX_PREFIX),
            (Modifier::Super, _) => Plain("Super+"),

            (Modifier::Hyper, ModsMode::Emacs) => Plain("H-"),
            (Modifier::Hyper, _) => Plain("Hyper+"),

            (Modifier::AltGr, ModsMode::Emacs) => Plain("AltGr-"),
            (Modifier::AltGr, _) => Plain("AltGr+"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keysym_lookup() {
        assert_eq!(Modifier::from_keysym("Shift_L"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_keysym("Shift_R"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_keysym("Meta_R"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_keysym("ISO_Level3_Shift"), Some(Modifier::AltGr));
        assert_eq!(Modifier::from_keysym("a"), None);
        assert_eq!(Modifier::from_keysym("BackSpace"), None);
    }

    #[test]
    fn prefixes_fall_back_to_normal() {
        // hyper has no mac entry
        assert_eq!(Modifier::Hyper.prefix(ModsMode::Mac), ReplText::Plain("Hyper+"));
        assert_eq!(Modifier::Hyper.prefix(ModsMode::Emacs), ReplText::Plain("H-"));
        // shift has no win entry
        assert_eq!(Modifier::Shift.prefix(ModsMode::Win), ReplText::Plain("Shift+"));
    }

    #[test]
    fn super_logo_prefixes_end_in_plain_fallback() {
        for mode in [ModsMode::Win, ModsMode::Tux] {
            match Modifier::Super.prefix(mode) {
                ReplText::Glyphs(alts) => {
                    assert_eq!(alts.last().unwrap().font, None);
                    assert_eq!(alts.last().unwrap().suffix, Some("+"));
                }
                ReplText::Plain(_) => panic!("expected glyph chain for {mode}"),
            }
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Modifier::Shift.to_string(), "Shift");
        assert_eq!(Modifier::AltGr.to_string(), "AltGr");
    }
}
