// Keyshow Replacement Catalog
// Static display data for keysyms: text, glyph fallbacks, spacing/erasure flags

use indexmap::IndexMap;

// Flag semantics:
//
// erase_stop:        stops backspace erasure in baked mode, but not full mode.
//                    These keys generally move the caret, and are also padded
//                    with a thin space.
// erase_stop_always: stops backspace erasure in both baked and full mode.
//                    These keys do not emit output in the text.
// wide_spacing:      strong spacing is required around the symbol.

/// One alternative in a glyph fallback chain.
///
/// `font: None` marks a plain-text fallback that always applies; otherwise
/// the alternative only applies when the named font family is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphAlt {
    pub text: &'static str,
    pub font: Option<&'static str>,
    pub suffix: Option<&'static str>,
}

/// Display data for a symbol: a plain string or an ordered fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplText {
    Plain(&'static str),
    Glyphs(&'static [GlyphAlt]),
}

/// Catalog entry for a keysym.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    pub erase_stop: bool,
    pub erase_stop_always: bool,
    pub wide_spacing: bool,
    pub text: ReplText,
}

/// A catalog entry with its markup fully resolved against the current font
/// inventory. Carries every flag needed downstream so the render pass never
/// consults the catalog again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepl {
    pub erase_stop: bool,
    pub erase_stop_always: bool,
    pub wide_spacing: bool,
    pub markup: String,
}

const FA5: &str = "Font Awesome 5 Free";
const FA4: &str = "FontAwesome";

/// Icon chain: Font Awesome 5, legacy Font Awesome, then plain text.
macro_rules! fa_chain {
    ($glyph:literal, $plain:literal) => {
        &[
            GlyphAlt { text: $glyph, font: Some(FA5), suffix: None },
            GlyphAlt { text: $glyph, font: Some(FA4), suffix: None },
            GlyphAlt { text: $plain, font: None, suffix: None },
        ]
    };
    ($glyph:literal, $plain:literal, $suffix:literal) => {
        &[
            GlyphAlt { text: $glyph, font: Some(FA5), suffix: Some($suffix) },
            GlyphAlt { text: $glyph, font: Some(FA4), suffix: Some($suffix) },
            GlyphAlt { text: $plain, font: None, suffix: Some($suffix) },
        ]
    };
}

/// Symbols that count as whitespace for the elision option.
pub const WHITESPACE_SYMS: &[&str] = &["Tab", "ISO_Left_Tab", "Return", "space", "KP_Enter"];

/// Immutable keysym -> display table, constructed once at startup and then
/// only read. Definition order is kept (it drives resolved-table rebuilds).
#[derive(Debug, Clone)]
pub struct ReplacementCatalog {
    syms: IndexMap<&'static str, Replacement>,
}

impl ReplacementCatalog {
    /// Build the builtin catalog.
    pub fn builtin() -> Self {
        let mut syms = IndexMap::new();
        let mut put = |sym, erase_stop, erase_stop_always, wide_spacing, text| {
            syms.insert(
                sym,
                Replacement {
                    erase_stop,
                    erase_stop_always,
                    wide_spacing,
                    text,
                },
            );
        };
        use ReplText::{Glyphs, Plain};

        // Regular keys
        put("Escape", true, true, true, Plain("Esc"));
        put("Tab", true, false, false, Plain("Tab "));
        put("ISO_Left_Tab", true, false, false, Plain("Tab "));
        put("Return", true, false, false, Plain("Return "));
        put("space", false, false, false, Plain("Space "));
        put("BackSpace", true, true, false, Plain("BackSpace"));
        put("Shift_L", true, true, false, Plain("Shift "));
        put("Control_L", true, true, false, Plain("Control "));
        put("Alt_L", true, true, false, Plain("Alt "));
        put("Caps_Lock", true, true, true, Plain("Caps"));
        put("F1", true, true, true, Plain("F1"));
        put("F2", true, true, true, Plain("F2"));
        put("F3", true, true, true, Plain("F3"));
        put("F4", true, true, true, Plain("F4"));
        put("F5", true, true, true, Plain("F5"));
        put("F6", true, true, true, Plain("F6"));
        put("F7", true, true, true, Plain("F7"));
        put("F8", true, true, true, Plain("F8"));
        put("F9", true, true, true, Plain("F9"));
        put("F10", true, true, true, Plain("F10"));
        put("F11", true, true, true, Plain("F11"));
        put("F12", true, true, true, Plain("F12"));
        put("Up", true, true, false, Plain("↑"));
        put("Left", true, true, false, Plain("←"));
        put("Right", true, true, false, Plain("→"));
        put("Down", true, true, false, Plain("↓"));
        put("Prior", true, true, true, Plain("PgUp"));
        put("Next", true, true, true, Plain("PgDn"));
        put("Home", true, true, true, Plain("Home"));
        put("End", true, true, true, Plain("End"));
        put("Insert", false, true, true, Plain("Ins"));
        put("Delete", true, false, true, Plain("Del"));
        put("KP_End", false, false, true, Plain("1ᴷᴾ"));
        put("KP_Down", false, false, true, Plain("2ᴷᴾ"));
        put("KP_Next", false, false, true, Plain("3ᴷᴾ"));
        put("KP_Left", false, false, true, Plain("4ᴷᴾ"));
        put("KP_Begin", false, false, true, Plain("5ᴷᴾ"));
        put("KP_Right", false, false, true, Plain("6ᴷᴾ"));
        put("KP_Home", false, false, true, Plain("7ᴷᴾ"));
        put("KP_Up", false, false, true, Plain("8ᴷᴾ"));
        put("KP_Prior", false, false, true, Plain("9ᴷᴾ"));
        put("KP_Insert", false, false, true, Plain("0ᴷᴾ"));
        put("KP_Delete", false, false, true, Plain("(.)"));
        put("KP_Add", false, false, true, Plain("(+)"));
        put("KP_Subtract", false, false, true, Plain("(-)"));
        put("KP_Multiply", false, false, true, Plain("(*)"));
        put("KP_Divide", false, false, true, Plain("(/)"));
        put("KP_Enter", true, false, false, Plain("⏎"));
        put("KP_1", false, false, true, Plain("1ᴷᴾ"));
        put("KP_2", false, false, true, Plain("2ᴷᴾ"));
        put("KP_3", false, false, true, Plain("3ᴷᴾ"));
        put("KP_4", false, false, true, Plain("4ᴷᴾ"));
        put("KP_5", false, false, true, Plain("5ᴷᴾ"));
        put("KP_6", false, false, true, Plain("6ᴷᴾ"));
        put("KP_7", false, false, true, Plain("7ᴷᴾ"));
        put("KP_8", false, false, true, Plain("8ᴷᴾ"));
        put("KP_9", false, false, true, Plain("9ᴷᴾ"));
        put("KP_0", false, false, true, Plain("0ᴷᴾ"));
        put("Num_Lock", false, true, true, Plain("NumLck"));
        put("Scroll_Lock", false, true, true, Plain("ScrLck"));
        put("Pause", false, true, true, Plain("Pause"));
        put("Break", false, true, true, Plain("Break"));
        put("Print", false, true, true, Plain("Print"));
        put("Multi_key", false, true, true, Plain("Compose"));

        // Multimedia keys
        put("XF86AudioMute", true, true, true, Glyphs(fa_chain!("\u{f026}", "Mute")));
        put("XF86AudioMicMute", true, true, true, Glyphs(fa_chain!("\u{f131}", "Rec")));
        put(
            "XF86AudioRaiseVolume",
            true,
            true,
            true,
            Glyphs(&[
                GlyphAlt { text: "\u{f028}", font: Some(FA5), suffix: None },
                GlyphAlt { text: "\u{f028}", font: Some(FA4), suffix: None },
                GlyphAlt { text: "Vol", font: None, suffix: Some("+") },
            ]),
        );
        put(
            "XF86AudioLowerVolume",
            true,
            true,
            true,
            Glyphs(&[
                GlyphAlt { text: "\u{f027}", font: Some(FA5), suffix: None },
                GlyphAlt { text: "\u{f027}", font: Some(FA4), suffix: None },
                GlyphAlt { text: "Vol", font: None, suffix: Some("-") },
            ]),
        );
        put("XF86AudioPrev", true, true, true, Glyphs(fa_chain!("\u{f048}", "Prev")));
        put("XF86AudioNext", true, true, true, Glyphs(fa_chain!("\u{f051}", "Next")));
        put("XF86AudioPlay", true, true, true, Glyphs(fa_chain!("\u{f04b}", "▶")));
        put("XF86AudioStop", true, true, true, Glyphs(fa_chain!("\u{f04d}", "⬛")));
        put("XF86Eject", true, true, true, Glyphs(fa_chain!("\u{f052}", "Eject")));
        put(
            "XF86MonBrightnessDown",
            true,
            true,
            true,
            Glyphs(fa_chain!("\u{f185}", "Bright", "-")),
        );
        put(
            "XF86MonBrightnessUp",
            true,
            true,
            true,
            Glyphs(fa_chain!("\u{f185}", "Bright", "+")),
        );
        put("XF86Display", true, true, true, Glyphs(fa_chain!("\u{f108}", "Display")));
        put("XF86WLAN", true, true, true, Glyphs(fa_chain!("\u{f1eb}", "WLAN")));
        put("XF86Search", true, true, true, Glyphs(fa_chain!("\u{f002}", "Search")));
        put("XF86Bluetooth", true, true, true, Glyphs(fa_chain!("\u{f294}", "Bluetooth")));
        put(
            "XF86Tools",
            true,
            true,
            true,
            Glyphs(&[
                GlyphAlt { text: "\u{f7d9}", font: Some(FA5), suffix: None },
                GlyphAlt { text: "🛠", font: None, suffix: None },
            ]),
        );
        put("XF86Favorites", true, true, true, Glyphs(fa_chain!("\u{f005}", "🟊")));
        put("XF86HomePage", true, true, true, Glyphs(fa_chain!("\u{f015}", "⌂")));
        put("XF86Mail", true, true, true, Glyphs(fa_chain!("\u{f0e0}", "📧")));
        put("XF86Calculator", true, true, true, Glyphs(fa_chain!("\u{f1ec}", "🖩")));

        Self { syms }
    }

    pub fn lookup(&self, sym: &str) -> Option<&Replacement> {
        self.syms.get(sym)
    }

    pub fn contains(&self, sym: &str) -> bool {
        self.syms.contains_key(sym)
    }

    /// Iterate entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Replacement)> + '_ {
        self.syms.iter().map(|(k, v)| (*k, v))
    }

    pub fn is_whitespace(&self, sym: &str) -> bool {
        WHITESPACE_SYMS.contains(&sym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_is_silent_and_spaced() {
        let cat = ReplacementCatalog::builtin();
        let esc = cat.lookup("Escape").unwrap();
        assert!(esc.erase_stop);
        assert!(esc.erase_stop_always);
        assert!(esc.wide_spacing);
        assert_eq!(esc.text, ReplText::Plain("Esc"));
    }

    #[test]
    fn arrows_stop_baked_erase_only() {
        let cat = ReplacementCatalog::builtin();
        let up = cat.lookup("Up").unwrap();
        assert!(up.erase_stop);
        assert!(up.erase_stop_always);
        // Delete is erased through in full mode but not baked
        let del = cat.lookup("Delete").unwrap();
        assert!(del.erase_stop);
        assert!(!del.erase_stop_always);
    }

    #[test]
    fn keypad_digits_do_not_block_erasure() {
        let cat = ReplacementCatalog::builtin();
        let kp5 = cat.lookup("KP_5").unwrap();
        assert!(!kp5.erase_stop);
        assert!(!kp5.erase_stop_always);
        assert!(kp5.wide_spacing);
    }

    #[test]
    fn multimedia_keys_carry_fallback_chains() {
        let cat = ReplacementCatalog::builtin();
        match cat.lookup("XF86AudioRaiseVolume").unwrap().text {
            ReplText::Glyphs(alts) => {
                assert_eq!(alts.len(), 3);
                assert_eq!(alts[0].font, Some(FA5));
                assert_eq!(alts[2].font, None);
                assert_eq!(alts[2].suffix, Some("+"));
            }
            ReplText::Plain(_) => panic!("expected a glyph chain"),
        }
    }

    #[test]
    fn whitespace_set() {
        let cat = ReplacementCatalog::builtin();
        for sym in ["Tab", "ISO_Left_Tab", "Return", "space", "KP_Enter"] {
            assert!(cat.is_whitespace(sym), "{sym} should be whitespace");
        }
        assert!(!cat.is_whitespace("BackSpace"));
    }
}
