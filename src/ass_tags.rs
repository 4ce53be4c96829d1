/*!
 * Extraction of inline ASS override tags.
 *
 * Only the small subset of tags that CineCanvas can represent is recognized:
 * bold/italic runs, font name and size, primary and outline colors, primary
 * alpha, and fade timing. Everything else inside `{...}` blocks is dropped.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::{parse_rgba_hex, Rgb};
use crate::subtitle_document::Style;

/// Regex for `\fn<name>`, capturing up to the next tag or closing brace
static FONT_NAME_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\fn([^\\}]+)").expect("Invalid font name tag regex"));

/// Regex for `\fs<size>`
static FONT_SIZE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\fs(\d+)").expect("Invalid font size tag regex"));

/// Regex for `\1c&H<BBGGRR>&` or `\c&H<BBGGRR>&`
static PRIMARY_COLOR_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\1?c&H([0-9A-Fa-f]{6})&?").expect("Invalid primary color tag regex"));

/// Regex for `\3c&H<BBGGRR>&`
static OUTLINE_COLOR_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\3c&H([0-9A-Fa-f]{6})&?").expect("Invalid outline color tag regex"));

/// Regex for `\1a&H<AA>&` or `\a&H<AA>&`
static PRIMARY_ALPHA_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\1?a&H([0-9A-Fa-f]{2})&?").expect("Invalid alpha tag regex"));

/// A run of dialogue text with a uniform bold/italic state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

/// Effective font properties for one dialogue line
///
/// Produced by layering override tags on top of the line's style; consumed
/// by the XML writer and rebuilt from Font attributes by the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct FontProps {
    pub font_name: String,
    pub font_size: i32,
    pub bold: bool,
    pub italic: bool,
    pub primary_color: Rgb,
    /// ASS alpha (0 = opaque)
    pub primary_alpha: u8,
    pub outline_color: Rgb,
    pub outline_alpha: u8,
    pub outline_width: f64,
}

impl Default for FontProps {
    fn default() -> Self {
        FontProps {
            font_name: "Arial".to_string(),
            font_size: 42,
            bold: false,
            italic: false,
            primary_color: Rgb::WHITE,
            primary_alpha: 0,
            outline_color: Rgb::BLACK,
            outline_alpha: 0,
            outline_width: 2.0,
        }
    }
}

/// Split one physical line of dialogue into styled segments
///
/// Scans left to right. A `{...}` block flushes the accumulated text with
/// the state active *before* the block, then applies any `\b`/`\i` codes it
/// contains (the last occurrence wins). A `{` without a matching `}` is
/// stepped over and the rest of the line is treated as plain text.
pub fn parse_styled_segments(
    text: &str,
    default_bold: bool,
    default_italic: bool,
) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut bold = default_bold;
    let mut italic = default_italic;
    let mut current = String::new();

    let mut pos = 0;
    while pos < text.len() {
        if text[pos..].starts_with('{') {
            if !current.is_empty() {
                segments.push(StyledSegment {
                    text: std::mem::take(&mut current),
                    bold,
                    italic,
                });
            }

            match text[pos..].find('}') {
                Some(close) => {
                    apply_tag_block(&text[pos + 1..pos + close], &mut bold, &mut italic);
                    pos += close + 1;
                }
                None => {
                    // Unterminated block: skip the brace, rescan as text
                    pos += 1;
                }
            }
        } else {
            let ch = text[pos..].chars().next().expect("in-bounds char");
            current.push(ch);
            pos += ch.len_utf8();
        }
    }

    if !current.is_empty() {
        segments.push(StyledSegment {
            text: current,
            bold,
            italic,
        });
    }

    segments
}

/// Apply every `\b0`/`\b1`/`\i0`/`\i1` code in a tag block body
fn apply_tag_block(block: &str, bold: &mut bool, italic: &mut bool) {
    scan_boolean_code(block, "\\b", bold);
    scan_boolean_code(block, "\\i", italic);
}

fn scan_boolean_code(block: &str, code: &str, state: &mut bool) {
    let mut search = 0;
    while let Some(found) = block[search..].find(code) {
        let value_pos = search + found + code.len();
        match block[value_pos..].chars().next() {
            Some('0') => *state = false,
            Some('1') => *state = true,
            _ => {}
        }
        search = search + found + code.len();
    }
}

/// Compute the effective font properties for a dialogue line
///
/// Style values form the base; `\fn`, `\fs`, `\1c`/`\c`, `\3c` and
/// `\1a`/`\a` tags override them with document-order last-match-wins
/// semantics. Bold and italic are not resolved here since they vary
/// per segment.
pub fn effective_font_props(text: &str, style: Option<&Style>) -> FontProps {
    let mut props = FontProps::default();

    if let Some(style) = style {
        props.font_name = style.font_family.clone();
        props.font_size = style.font_size as i32;
        props.bold = style.bold;
        props.italic = style.italic;
        props.primary_color = style.primary_color;
        props.outline_color = style.outline_color;
        props.outline_width = style.outline_width;
    }

    if let Some(caps) = FONT_NAME_TAG.captures_iter(text).last() {
        props.font_name = caps[1].to_string();
    }

    if let Some(caps) = FONT_SIZE_TAG.captures_iter(text).last() {
        if let Ok(size) = caps[1].parse() {
            props.font_size = size;
        }
    }

    if let Some(caps) = PRIMARY_COLOR_TAG.captures_iter(text).last() {
        props.primary_color = bgr_to_rgb(&caps[1]);
    }

    if let Some(caps) = OUTLINE_COLOR_TAG.captures_iter(text).last() {
        props.outline_color = bgr_to_rgb(&caps[1]);
    }

    if let Some(caps) = PRIMARY_ALPHA_TAG.captures_iter(text).last() {
        if let Ok(alpha) = u8::from_str_radix(&caps[1], 16) {
            props.primary_alpha = alpha;
        }
    }

    props
}

/// ASS inline colors are `&HBBGGRR&`; swap to RGB order
fn bgr_to_rgb(hex: &str) -> Rgb {
    let (bgr, _) = parse_rgba_hex(hex);
    Rgb::new(bgr.b, bgr.g, bgr.r)
}

/// Extract `\fad(up,down)` / `\fade(up,down)` timing from a line
///
/// Only the first occurrence counts. A single argument applies to both
/// directions; a missing or malformed tag yields (0, 0).
pub fn fade_times(text: &str) -> (i64, i64) {
    let tag_pos = text.find("\\fad(").or_else(|| text.find("\\fade("));
    let Some(tag_pos) = tag_pos else {
        return (0, 0);
    };

    let Some(open) = text[tag_pos..].find('(') else {
        return (0, 0);
    };
    let args_start = tag_pos + open + 1;
    let Some(close) = text[args_start..].find(')') else {
        return (0, 0);
    };

    let args: Vec<&str> = text[args_start..args_start + close].split(',').collect();
    match args.as_slice() {
        [fade_in, fade_out, ..] => {
            match (fade_in.trim().parse(), fade_out.trim().parse()) {
                (Ok(up), Ok(down)) => (up, down),
                (Ok(up), Err(_)) => (up, up),
                _ => (0, 0),
            }
        }
        [single] => match single.trim().parse() {
            Ok(both) => (both, both),
            _ => (0, 0),
        },
        [] => (0, 0),
    }
}
