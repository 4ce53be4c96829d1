/*!
 * In-memory model of an ASS subtitle document.
 *
 * Holds the named styles, dialogue events and script-info metadata of one
 * script, along with the preprocessing operations the CineCanvas writer
 * relies on (sorting, comment stripping, overlap and duplicate merging).
 * Reading and writing of `.ass` files lives here as well so the converter
 * can run standalone.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::Rgb;
use crate::errors::DocumentError;

/// Regex for Dialogue/Comment lines in the [Events] section
static EVENT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<Type>Comment|Dialogue):\s*",
        r"(?P<Layer>\d+)\s*,",
        r"(?P<Start>\d+:\d{2}:\d{2}\.\d{2})\s*,",
        r"(?P<End>\d+:\d{2}:\d{2}\.\d{2})\s*,",
        r"(?P<Style>[^,]*?)\s*,",
        r"(?P<Actor>[^,]*?)\s*,",
        r"[^,]*,[^,]*,[^,]*,",
        r"(?P<Effect>[^,]*?)\s*,",
        r"(?P<Text>.*?)\s*$"
    ))
    .expect("Invalid event line regex")
});

/// Regex for ASS timestamps (H:MM:SS.CS)
static ASS_TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{2}):(\d{2})\.(\d{2})$").expect("Invalid ASS time regex"));

/// Regex for override tag blocks, used when stripping tags
static OVERRIDE_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]*\}").expect("Invalid override block regex"));

/// A named subtitle style
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub name: String,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
    pub primary_color: Rgb,
    pub outline_color: Rgb,
    pub outline_width: f64,
    /// Numpad-style alignment code (2 = bottom center)
    pub alignment: u8,
    /// Left, right and vertical margins
    pub margins: [u32; 3],
}

impl Default for Style {
    fn default() -> Self {
        Style {
            name: "Default".to_string(),
            font_family: "Arial".to_string(),
            font_size: 48.0,
            bold: false,
            italic: false,
            primary_color: Rgb::WHITE,
            outline_color: Rgb::BLACK,
            outline_width: 2.0,
            alignment: 2,
            margins: [10, 10, 10],
        }
    }
}

/// A single timed dialogue event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialogueLine {
    /// Comment lines are kept in the document but never exported
    pub comment: bool,
    pub start_ms: u64,
    pub end_ms: u64,
    /// Name of the style this line references
    pub style: String,
    /// Raw dialogue text, override tags and `\N` markers included
    pub text: String,
}

/// An ordered subtitle document: metadata, styles and events
#[derive(Debug, Clone, Default)]
pub struct SubtitleDocument {
    /// Script-info key/value pairs, in file order
    pub script_info: Vec<(String, String)>,
    pub styles: Vec<Style>,
    pub events: Vec<DialogueLine>,
}

impl SubtitleDocument {
    /// Create an empty document with no styles or events
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a minimal default script: one Default style, one blank line
    pub fn load_default(&mut self) {
        self.script_info = vec![("ScriptType".to_string(), "v4.00+".to_string())];
        self.styles = vec![Style::default()];
        self.events = vec![DialogueLine {
            end_ms: 5_000,
            style: "Default".to_string(),
            ..DialogueLine::default()
        }];
    }

    /// Look up a style by name
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// Set a script-info value, replacing any existing entry for the key
    pub fn set_script_info(&mut self, key: &str, value: &str) {
        match self.script_info.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.script_info.push((key.to_string(), value.to_string())),
        }
    }

    /// Get a script-info value
    pub fn script_info(&self, key: &str) -> Option<&str> {
        self.script_info
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Stable-sort events by start time, then end time
    pub fn sort_events(&mut self) {
        self.events
            .sort_by_key(|line| (line.start_ms, line.end_ms));
    }

    /// Remove all comment lines
    pub fn strip_comments(&mut self) {
        self.events.retain(|line| !line.comment);
    }

    /// Merge time-overlapping events that carry identical text
    ///
    /// Events must already be sorted. The surviving event spans the union
    /// of the merged ranges.
    pub fn recombine_overlaps(&mut self) {
        let mut merged: Vec<DialogueLine> = Vec::with_capacity(self.events.len());
        for line in self.events.drain(..) {
            if let Some(prev) = merged.last_mut() {
                if !prev.comment
                    && !line.comment
                    && prev.text == line.text
                    && line.start_ms <= prev.end_ms
                {
                    prev.end_ms = prev.end_ms.max(line.end_ms);
                    continue;
                }
            }
            merged.push(line);
        }
        self.events = merged;
    }

    /// Merge adjacent events with identical text and contiguous timing
    pub fn merge_identical(&mut self) {
        let mut merged: Vec<DialogueLine> = Vec::with_capacity(self.events.len());
        for line in self.events.drain(..) {
            if let Some(prev) = merged.last_mut() {
                if !prev.comment
                    && !line.comment
                    && prev.text == line.text
                    && prev.end_ms == line.start_ms
                {
                    prev.end_ms = line.end_ms;
                    continue;
                }
            }
            merged.push(line);
        }
        self.events = merged;
    }

    /// Remove every `{...}` override block from all dialogue text
    ///
    /// Not part of the export pipeline (tags must survive until fade and
    /// style extraction); exposed for library consumers.
    #[allow(dead_code)]
    pub fn strip_tags(&mut self) {
        for line in &mut self.events {
            line.text = OVERRIDE_BLOCK_REGEX.replace_all(&line.text, "").into_owned();
        }
    }

    /// Parse a complete `.ass` script from a string
    pub fn from_ass_str(content: &str) -> Result<Self, DocumentError> {
        let mut doc = SubtitleDocument::new();
        let mut section = Section::None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_num = index + 1;
            let line = raw_line.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                section = Section::classify(line);
                continue;
            }

            match section {
                Section::ScriptInfo => {
                    if let Some((key, value)) = line.split_once(':') {
                        doc.set_script_info(key.trim(), value.trim());
                    }
                }
                Section::Styles => {
                    if let Some(fields) = line.strip_prefix("Style:") {
                        if let Some(style) = parse_style_line(fields) {
                            doc.styles.push(style);
                        } else {
                            log::warn!("Line {}: skipping malformed style entry", line_num);
                        }
                    }
                }
                Section::Events => {
                    if line.starts_with("Dialogue:") || line.starts_with("Comment:") {
                        doc.events.push(parse_event_line(line, line_num)?);
                    }
                }
                Section::None | Section::Other => {}
            }
        }

        if doc.styles.is_empty() {
            doc.styles.push(Style::default());
        }

        Ok(doc)
    }

    /// Serialize the document as an `.ass` script
    pub fn to_ass_string(&self) -> String {
        let mut out = String::new();

        out.push_str("[Script Info]\n");
        if self.script_info("ScriptType").is_none() {
            out.push_str("ScriptType: v4.00+\n");
        }
        for (key, value) in &self.script_info {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');

        out.push_str("[V4+ Styles]\n");
        out.push_str(
            "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, \
             BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, \
             BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n",
        );
        for style in &self.styles {
            out.push_str(&format_style_line(style));
            out.push('\n');
        }
        out.push('\n');

        out.push_str("[Events]\n");
        out.push_str(
            "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        );
        for line in &self.events {
            let kind = if line.comment { "Comment" } else { "Dialogue" };
            out.push_str(&format!(
                "{}: 0,{},{},{},,0,0,0,,{}\n",
                kind,
                format_ass_time(line.start_ms),
                format_ass_time(line.end_ms),
                if line.style.is_empty() { "Default" } else { line.style.as_str() },
                line.text
            ));
        }

        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    ScriptInfo,
    Styles,
    Events,
    Other,
}

impl Section {
    fn classify(header: &str) -> Self {
        let name = header.trim_matches(['[', ']']).trim().to_lowercase();
        match name.as_str() {
            "script info" => Section::ScriptInfo,
            "v4+ styles" | "v4 styles" | "v4.00+ styles" => Section::Styles,
            "events" => Section::Events,
            _ => Section::Other,
        }
    }
}

/// Parse an ASS `H:MM:SS.CS` timestamp to milliseconds
pub fn parse_ass_time(value: &str, line_num: usize) -> Result<u64, DocumentError> {
    let caps = ASS_TIME_REGEX
        .captures(value.trim())
        .ok_or_else(|| DocumentError::InvalidTimestamp {
            line: line_num,
            value: value.to_string(),
        })?;

    let field = |index: usize| -> u64 { caps[index].parse().unwrap_or(0) };
    Ok(field(1) * 3_600_000 + field(2) * 60_000 + field(3) * 1_000 + field(4) * 10)
}

/// Format milliseconds as an ASS `H:MM:SS.CS` timestamp
pub fn format_ass_time(ms: u64) -> String {
    format!(
        "{}:{:02}:{:02}.{:02}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1_000,
        (ms % 1_000) / 10
    )
}

fn parse_event_line(line: &str, line_num: usize) -> Result<DialogueLine, DocumentError> {
    let caps = EVENT_LINE_REGEX
        .captures(line)
        .ok_or(DocumentError::MalformedDialogue { line: line_num })?;

    Ok(DialogueLine {
        comment: &caps["Type"] == "Comment",
        start_ms: parse_ass_time(&caps["Start"], line_num)?,
        end_ms: parse_ass_time(&caps["End"], line_num)?,
        style: caps["Style"].to_string(),
        text: caps["Text"].to_string(),
    })
}

/// Parse the comma-separated fields of a `Style:` line
///
/// Follows the standard V4+ field order; entries missing the alignment
/// field or later tolerate the truncation.
fn parse_style_line(fields: &str) -> Option<Style> {
    let parts: Vec<&str> = fields.split(',').map(str::trim).collect();
    if parts.len() < 9 {
        return None;
    }

    let mut style = Style {
        name: parts[0].to_string(),
        font_family: parts[1].to_string(),
        ..Style::default()
    };
    style.font_size = parts[2].parse().unwrap_or(style.font_size);
    style.primary_color = parse_ass_color(parts[3]);
    if let Some(outline) = parts.get(5) {
        style.outline_color = parse_ass_color(outline);
    }
    style.bold = matches!(*parts.get(7).unwrap_or(&"0"), "-1" | "1");
    style.italic = matches!(*parts.get(8).unwrap_or(&"0"), "-1" | "1");
    if let Some(width) = parts.get(16) {
        style.outline_width = width.parse().unwrap_or(style.outline_width);
    }
    if let Some(alignment) = parts.get(18) {
        style.alignment = alignment.parse().unwrap_or(style.alignment);
    }
    for (slot, field) in parts.iter().skip(19).take(3).enumerate() {
        style.margins[slot] = field.parse().unwrap_or(style.margins[slot]);
    }

    Some(style)
}

fn format_style_line(style: &Style) -> String {
    format!(
        "Style: {},{},{},{},{},{},{},{},{},0,0,100,100,0,0,1,{},0,{},{},{},{},1",
        style.name,
        style.font_family,
        style.font_size,
        format_ass_color(style.primary_color),
        format_ass_color(style.primary_color),
        format_ass_color(style.outline_color),
        format_ass_color(Rgb::BLACK),
        if style.bold { -1 } else { 0 },
        if style.italic { -1 } else { 0 },
        style.outline_width,
        style.alignment,
        style.margins[0],
        style.margins[1],
        style.margins[2],
    )
}

/// Parse an ASS `&HAABBGGRR&` / `&HBBGGRR&` style color
fn parse_ass_color(value: &str) -> Rgb {
    let hex = value
        .trim()
        .trim_start_matches("&H")
        .trim_start_matches("&h")
        .trim_end_matches('&');

    let Ok(packed) = u32::from_str_radix(hex, 16) else {
        return Rgb::WHITE;
    };

    // Stored as AABBGGRR; alpha byte ignored here
    Rgb::new(
        (packed & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        ((packed >> 16) & 0xFF) as u8,
    )
}

fn format_ass_color(color: Rgb) -> String {
    format!("&H00{:02X}{:02X}{:02X}&", color.b, color.g, color.r)
}
