// Keyshow Render Pass
// Rebuilds the single label markup string from the transcript buffer

use std::time::{Duration, Instant};

use crate::transcript::RenderedKey;

/// Tunables consumed by the render pass.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Keys younger than this are underlined
    pub recent_thr: Duration,
    /// Repeat count that triggers …N× compression, 0 disables
    pub compr_cnt: usize,
    /// Whitespace keys are shown as glyphs
    pub vis_space: bool,
}

const THIN_SPACE: &str = "<span font_family=\"sans\">\u{2009}</span>";

fn is_single_combining_mark(markup: &str) -> bool {
    let mut chars = markup.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if ('\u{0300}'..='\u{036f}').contains(&c)
    )
}

/// Rebuild the label markup from the current transcript.
///
/// Pure with respect to the buffer: may be re-run at any time with a newer
/// `now` to refresh the recency underline. `return_markup` is the resolved
/// Return glyph appended when a trailing newline would otherwise leave the
/// last line without any visible return marker.
pub fn render_label(
    keys: &[RenderedKey],
    now: Instant,
    cfg: &RenderSettings,
    return_markup: &str,
) -> String {
    let mut markup = String::new();
    let mut recent = false;
    let mut repeats: usize = 0;

    for (i, key) in keys.iter().enumerate() {
        if i != 0 {
            let last = &keys[i - 1];

            // compress repeats
            if cfg.compr_cnt > 0 && key.markup == last.markup {
                repeats += 1;
                if repeats < cfg.compr_cnt {
                    // run still short enough to print literally
                } else if i == keys.len() - 1 || key.markup != keys[i + 1].markup {
                    // run ends here: emit one compact annotation for it
                    if !recent && now.saturating_duration_since(key.stamp) < cfg.recent_thr {
                        markup.push_str("<u>");
                        recent = true;
                    }
                    markup.push_str("<sub><small>…");
                    markup.push_str(&(repeats + 1).to_string());
                    markup.push_str("×</small></sub>");
                    if key.markup.ends_with('\n') {
                        markup.push('\n');
                    }
                    continue;
                } else {
                    // run still extending, suppress this repeat
                    continue;
                }
            }

            // character block spacing
            if last.markup.ends_with('\n') {
                // no spacing after a line break
            } else if key.chord || last.chord || key.wide_spacing || last.wide_spacing {
                markup.push(' ');
            } else if key.erase_stop || last.erase_stop || repeats > cfg.compr_cnt {
                markup.push_str(THIN_SPACE);
            }
            if key.markup != last.markup {
                repeats = 0;
            }
        }

        let underline_here = !recent && now.saturating_duration_since(key.stamp) < cfg.recent_thr;
        if underline_here {
            recent = true;
        }

        if is_single_combining_mark(&key.markup) {
            // Pango mishandles ZWNJ around combining marks; bracket with
            // Mongolian vowel separator and hair space instead
            markup.push('\u{180e}');
            if underline_here {
                markup.push_str("<u>");
            }
            markup.push_str(&key.markup);
            markup.push('\u{200a}');
        } else if underline_here || !key.markup.is_empty() {
            markup.push('\u{200c}');
            if underline_here {
                markup.push_str("<u>");
            }
            markup.push_str(&key.markup);
        }
    }

    if markup.ends_with('\n') {
        while markup.ends_with('\n') {
            markup.pop();
        }
        let last_chord = keys.last().is_some_and(|k| k.chord);
        if !cfg.vis_space && !last_chord {
            // always show some return symbol on the last line
            markup.push_str(return_markup);
        }
    }
    if recent {
        markup.push_str("</u>");
    }
    markup
}
