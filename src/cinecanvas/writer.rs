/*!
 * Serialization of a subtitle document to CineCanvas XML.
 *
 * The writer operates on a working copy of the document so callers keep
 * their event list untouched: events are sorted, comments dropped and
 * duplicates merged before any XML is produced. Override tags survive the
 * preprocessing because fade timing and per-line font properties are
 * extracted from them during serialization.
 */

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::io::Cursor;
use std::path::Path;
use uuid::Uuid;

use crate::ass_tags::{effective_font_props, fade_times, parse_styled_segments, FontProps};
use crate::cinecanvas::{FORMAT_VERSION, ROOT_ELEMENT};
use crate::color::to_rgba_hex;
use crate::errors::CineCanvasError;
use crate::export_settings::ExportSettings;
use crate::subtitle_document::{DialogueLine, Style, SubtitleDocument};
use crate::timecode::to_timecode;

/// VPosition of the bottom-most text line, in schema units
const BASE_VPOSITION: f64 = 10.0;

/// Vertical increment between stacked text lines
const LINE_SPACING: f64 = 6.5;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Prepare a working copy of a document for CineCanvas export
///
/// Sorts events, drops comments and merges overlapping or back-to-back
/// duplicates. Override tags and `\N` markers are left in place: fade and
/// style extraction needs them during subtitle serialization.
pub fn prepare_document(doc: &mut SubtitleDocument) {
    doc.sort_events();
    doc.strip_comments();
    doc.recombine_overlaps();
    doc.merge_identical();
}

/// Serialize a subtitle document as a CineCanvas XML string
pub fn write_document(
    doc: &SubtitleDocument,
    settings: &ExportSettings,
) -> Result<String, CineCanvasError> {
    let mut copy = doc.clone();
    prepare_document(&mut copy);

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("Version", FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    write_header(&mut writer, settings)?;

    // One container font satisfies schema expectations; per-line Font
    // elements override it as needed
    let default_style = doc.style("Default").or_else(|| doc.styles.first());
    writer.write_event(Event::Start(container_font_element(default_style, settings)))?;

    let mut spot_number = 1;
    for line in &copy.events {
        if line.comment {
            continue;
        }
        let line_style = doc.style(&line.style).or(default_style);
        write_subtitle(&mut writer, line, line_style, spot_number, settings)?;
        spot_number += 1;
    }

    writer.write_event(Event::End(BytesEnd::new("Font")))?;
    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes).expect("writer produces valid UTF-8"))
}

/// Write the header metadata elements under the root
fn write_header(writer: &mut XmlWriter, settings: &ExportSettings) -> Result<(), CineCanvasError> {
    writer
        .create_element("SubtitleID")
        .write_text_content(BytesText::new(&format!("urn:uuid:{}", Uuid::new_v4())))?;

    writer
        .create_element("MovieTitle")
        .write_text_content(BytesText::new(&settings.movie_title))?;

    writer
        .create_element("ReelNumber")
        .write_text_content(BytesText::new(&settings.reel_number.to_string()))?;

    writer
        .create_element("Language")
        .write_text_content(BytesText::new(&settings.language_code))?;

    // LoadFont references the font by filename only; directory components
    // are meaningless inside a DCP
    let font_file = if settings.include_font_reference && !settings.font_uri.is_empty() {
        Path::new(&settings.font_uri)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        String::new()
    };
    writer
        .create_element("LoadFont")
        .with_attribute(("Id", "Font1"))
        .with_attribute(("URI", font_file.as_str()))
        .write_empty()?;

    Ok(())
}

/// Build the container Font element from the document's default style
fn container_font_element(style: Option<&Style>, settings: &ExportSettings) -> BytesStart<'static> {
    let mut font = BytesStart::new("Font");
    font.push_attribute(("Id", "Font1"));

    match style {
        Some(style) => {
            font.push_attribute(("Script", style.font_family.as_str()));
            font.push_attribute(("Size", (style.font_size as i32).to_string().as_str()));
            font.push_attribute(("Weight", if style.bold { "bold" } else { "normal" }));
            font.push_attribute(("Italic", if style.italic { "yes" } else { "no" }));
            font.push_attribute(("Color", to_rgba_hex(style.primary_color, 0).as_str()));
            if style.outline_width > 0.0 {
                font.push_attribute(("Effect", "border"));
                font.push_attribute(("EffectColor", to_rgba_hex(style.outline_color, 0).as_str()));
            } else {
                font.push_attribute(("Effect", "none"));
                font.push_attribute(("EffectColor", "FF000000"));
            }
        }
        None => {
            font.push_attribute(("Script", "Arial"));
            font.push_attribute(("Size", settings.font_size_pt.to_string().as_str()));
            font.push_attribute(("Weight", "normal"));
            font.push_attribute(("Italic", "no"));
            font.push_attribute(("Color", "FFFFFFFF"));
            font.push_attribute(("Effect", "border"));
            font.push_attribute(("EffectColor", "FF000000"));
        }
    }

    font
}

/// Build a per-line Font element from effective font properties
fn line_font_element(props: &FontProps, bold: bool, italic: bool) -> BytesStart<'static> {
    let mut font = BytesStart::new("Font");
    font.push_attribute(("Script", props.font_name.as_str()));
    font.push_attribute(("Size", props.font_size.to_string().as_str()));
    font.push_attribute(("Weight", if bold { "bold" } else { "normal" }));
    font.push_attribute(("Italic", if italic { "yes" } else { "no" }));
    font.push_attribute((
        "Color",
        to_rgba_hex(props.primary_color, props.primary_alpha).as_str(),
    ));
    if props.outline_width > 0.0 {
        font.push_attribute(("Effect", "border"));
        font.push_attribute(("EffectColor", to_rgba_hex(props.outline_color, 0).as_str()));
    } else {
        font.push_attribute(("Effect", "none"));
    }
    font
}

/// Build a Text element positioned at the given VPosition
fn text_element(vposition: f64) -> BytesStart<'static> {
    let mut text = BytesStart::new("Text");
    text.push_attribute(("VAlign", "bottom"));
    text.push_attribute(("HAlign", "center"));
    text.push_attribute(("VPosition", format!("{:.1}", vposition).as_str()));
    text.push_attribute(("HPosition", "0.0"));
    text.push_attribute(("Direction", "horizontal"));
    text
}

/// Split raw dialogue text on line-break markers
///
/// `\N` takes precedence; the soft-break `\n` form is only honored when no
/// hard break is present.
fn split_physical_lines(text: &str) -> Vec<&str> {
    if text.contains("\\N") {
        text.split("\\N").collect()
    } else {
        text.split("\\n").collect()
    }
}

fn trim_line(text: &str) -> &str {
    text.trim_matches([' ', '\t'])
}

/// Write one Subtitle element with its positioned text lines
fn write_subtitle(
    writer: &mut XmlWriter,
    line: &DialogueLine,
    style: Option<&Style>,
    spot_number: usize,
    settings: &ExportSettings,
) -> Result<(), CineCanvasError> {
    let props = effective_font_props(&line.text, style);
    let (fade_up, fade_down) = fade_times(&line.text);
    let rate = Some(settings.frame_rate);

    let mut subtitle = BytesStart::new("Subtitle");
    subtitle.push_attribute(("SpotNumber", spot_number.to_string().as_str()));
    subtitle.push_attribute(("TimeIn", to_timecode(line.start_ms, rate).as_str()));
    subtitle.push_attribute(("TimeOut", to_timecode(line.end_ms, rate).as_str()));
    subtitle.push_attribute(("FadeUpTime", fade_up.to_string().as_str()));
    subtitle.push_attribute(("FadeDownTime", fade_down.to_string().as_str()));
    writer.write_event(Event::Start(subtitle))?;

    let default_bold = style.is_some_and(|s| s.bold);
    let default_italic = style.is_some_and(|s| s.italic);
    let raw_lines = split_physical_lines(&line.text);

    // First pass: count the lines that will occupy a vertical slot
    let non_empty_lines = raw_lines
        .iter()
        .filter(|raw| {
            let segments = parse_styled_segments(raw, default_bold, default_italic);
            let joined: String = segments.iter().map(|seg| seg.text.as_str()).collect();
            !trim_line(&joined).is_empty()
        })
        .count()
        .max(1);

    // Second pass: emit Font/Text pairs, stacking lines bottom-up so the
    // first source line ends up highest
    let mut slot = 0;
    for raw_line in &raw_lines {
        let segments = parse_styled_segments(raw_line, default_bold, default_italic);
        let joined: String = segments.iter().map(|seg| seg.text.as_str()).collect();
        let line_text = trim_line(&joined);
        if line_text.is_empty() {
            continue;
        }

        let first_bold = segments.first().map_or(default_bold, |seg| seg.bold);
        let first_italic = segments.first().map_or(default_italic, |seg| seg.italic);
        let uniform = segments
            .iter()
            .all(|seg| seg.bold == first_bold && seg.italic == first_italic);

        let vposition = BASE_VPOSITION + (non_empty_lines - 1 - slot) as f64 * LINE_SPACING;
        slot += 1;

        if uniform {
            writer.write_event(Event::Start(line_font_element(&props, first_bold, first_italic)))?;
            writer.write_event(Event::Start(text_element(vposition)))?;
            writer.write_event(Event::Text(BytesText::new(line_text)))?;
            writer.write_event(Event::End(BytesEnd::new("Text")))?;
            writer.write_event(Event::End(BytesEnd::new("Font")))?;
        } else {
            // Mixed styling: line-level defaults plus inline Font elements
            // carrying only the differing attributes
            writer.write_event(Event::Start(line_font_element(&props, false, false)))?;
            writer.write_event(Event::Start(text_element(vposition)))?;
            for segment in &segments {
                if segment.text.is_empty() {
                    continue;
                }
                if segment.bold || segment.italic {
                    let mut inline = BytesStart::new("Font");
                    if segment.bold {
                        inline.push_attribute(("Weight", "bold"));
                    }
                    if segment.italic {
                        inline.push_attribute(("Italic", "yes"));
                    }
                    writer.write_event(Event::Start(inline))?;
                    writer.write_event(Event::Text(BytesText::new(&segment.text)))?;
                    writer.write_event(Event::End(BytesEnd::new("Font")))?;
                } else {
                    writer.write_event(Event::Text(BytesText::new(&segment.text)))?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("Text")))?;
            writer.write_event(Event::End(BytesEnd::new("Font")))?;
        }
    }

    // A subtitle with no renderable lines still emits a placeholder pair
    // rather than an empty Subtitle element
    if slot == 0 {
        writer.write_event(Event::Start(line_font_element(&props, false, false)))?;
        writer.write_event(Event::Start(text_element(BASE_VPOSITION)))?;
        writer.write_event(Event::End(BytesEnd::new("Text")))?;
        writer.write_event(Event::End(BytesEnd::new("Font")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Subtitle")))?;
    Ok(())
}
