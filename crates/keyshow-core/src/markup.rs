// Keyshow Markup Encoder
// Resolves catalog display data into escaped Pango markup fragments

use std::collections::HashSet;

use crate::catalog::{GlyphAlt, ReplText};

/// Escape a string for inclusion in Pango markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Source of the font family names installed on the rendering system.
///
/// Queried once at construction and again on every replacement-table rebuild,
/// never per keystroke.
pub trait FontInventory {
    fn font_families(&self) -> HashSet<String>;
}

impl FontInventory for HashSet<String> {
    fn font_families(&self) -> HashSet<String> {
        self.clone()
    }
}

/// Fixed font list, mainly for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct StaticFonts(pub HashSet<String>);

impl StaticFonts {
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(families.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl FontInventory for StaticFonts {
    fn font_families(&self) -> HashSet<String> {
        self.0.clone()
    }
}

/// Turns display data into a single escaped markup fragment, picking the
/// first glyph alternative whose font family is actually installed.
#[derive(Debug, Clone)]
pub struct MarkupEncoder {
    families: HashSet<String>,
}

impl MarkupEncoder {
    pub fn new(families: HashSet<String>) -> Self {
        Self { families }
    }

    pub fn resolve(&self, text: &ReplText) -> String {
        match text {
            ReplText::Plain(t) => escape(t),
            ReplText::Glyphs(alts) => {
                for alt in alts.iter() {
                    match alt.font {
                        None => return Self::plain_alt(alt),
                        Some(font) if self.families.contains(font) => {
                            let mut out = String::new();
                            out.push_str("<span font_family=\"");
                            out.push_str(font);
                            out.push_str("\" font_weight=\"regular\">");
                            out.push_str(&escape(alt.text));
                            out.push_str("</span>");
                            out.push_str(&escape(alt.suffix.unwrap_or("")));
                            return out;
                        }
                        Some(_) => {}
                    }
                }
                // chains normally end in a plain alternative; if every entry
                // named a missing font, render the last one unstyled
                alts.last().map(Self::plain_alt).unwrap_or_default()
            }
        }
    }

    fn plain_alt(alt: &GlyphAlt) -> String {
        let mut out = escape(alt.text);
        out.push_str(&escape(alt.suffix.unwrap_or("")));
        out
    }
}
