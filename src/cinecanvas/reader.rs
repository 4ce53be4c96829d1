/*!
 * Parsing of CineCanvas XML into a subtitle document.
 *
 * The XML is first assembled into a small element tree, then walked the way
 * the schema is structured: root metadata, a container Font supplying style
 * defaults, and Subtitle cues whose Text lines are re-stacked into `\N`
 * separated dialogue text by descending VPosition.
 */

use quick_xml::events::Event;
use quick_xml::Reader;
use std::cmp::Ordering;

use crate::ass_tags::FontProps;
use crate::cinecanvas::ROOT_ELEMENT;
use crate::color::parse_rgba_hex;
use crate::errors::CineCanvasError;
use crate::subtitle_document::{DialogueLine, Style, SubtitleDocument};
use crate::timecode::from_timecode;

/// Style name installed for imported documents
const IMPORT_STYLE_NAME: &str = "CineCanvas";

/// A parsed XML element with its attributes and ordered content
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

/// Ordered element content: child elements interleaved with text runs
#[derive(Debug)]
enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlElement {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    fn first<'a>(&'a self, name: &'a str) -> Option<&'a XmlElement> {
        self.elements(name).next()
    }

    /// Concatenated text content, in document order, descending into
    /// child elements
    fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => out.push_str(&element.text()),
            }
        }
        out
    }
}

/// Assemble the root element tree from an XML string
fn parse_element_tree(xml: &str) -> Result<XmlElement, CineCanvasError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(CineCanvasError::Truncated)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::Element(element)),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    parent
                        .children
                        .push(XmlNode::Text(text.unescape()?.into_owned()));
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Text(
                        String::from_utf8_lossy(&cdata.into_inner()).into_owned(),
                    ));
                }
            }
            Event::Eof => return Err(CineCanvasError::Truncated),
            // Declarations, comments and processing instructions carry no content
            _ => {}
        }
    }
}

fn element_from_start(
    start: &quick_xml::events::BytesStart<'_>,
) -> Result<XmlElement, CineCanvasError> {
    let mut element = XmlElement {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..XmlElement::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute?;
        element.attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            attribute.unescape_value()?.into_owned(),
        ));
    }
    Ok(element)
}

/// Quick probe: is this XML a CineCanvas subtitle document?
///
/// Only the root element name is checked; the file extension is a
/// pre-filter, not authoritative.
pub fn is_cinecanvas(content: &str) -> bool {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start) | Event::Empty(start)) => {
                return start.name().as_ref() == ROOT_ELEMENT.as_bytes();
            }
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}

/// Parse font properties from a CineCanvas Font element's attributes
fn parse_font_props(font: &XmlElement) -> FontProps {
    let mut props = FontProps::default();

    if let Some(size) = font.attr("Size") {
        props.font_size = size.trim().parse().unwrap_or(props.font_size);
    }
    props.bold = font
        .attr("Weight")
        .is_some_and(|weight| weight.eq_ignore_ascii_case("bold"));
    props.italic = font
        .attr("Italic")
        .is_some_and(|italic| italic.eq_ignore_ascii_case("yes"));
    if let Some(color) = font.attr("Color") {
        let (rgb, alpha) = parse_rgba_hex(color);
        props.primary_color = rgb;
        props.primary_alpha = alpha;
    }

    match font.attr("Effect").unwrap_or("none").to_lowercase().as_str() {
        "border" => {
            props.outline_width = 2.0;
            let (rgb, alpha) = parse_rgba_hex(font.attr("EffectColor").unwrap_or("FF000000"));
            props.outline_color = rgb;
            props.outline_alpha = alpha;
        }
        // Shadow has no outline equivalent; anything unknown gets none
        _ => props.outline_width = 0.0,
    }

    props
}

fn style_from_props(props: &FontProps) -> Style {
    Style {
        name: IMPORT_STYLE_NAME.to_string(),
        font_family: props.font_name.clone(),
        font_size: props.font_size as f64,
        bold: props.bold,
        italic: props.italic,
        primary_color: props.primary_color,
        outline_color: props.outline_color,
        outline_width: props.outline_width,
        ..Style::default()
    }
}

/// Collect (VPosition, content) pairs from the Text children of an element
fn collect_text_lines(container: &XmlElement) -> Vec<(f64, String)> {
    container
        .elements("Text")
        .filter_map(|text| {
            let vposition = text
                .attr("VPosition")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(10.0);
            let content = text.text();
            if content.trim().is_empty() {
                None
            } else {
                Some((vposition, content))
            }
        })
        .collect()
}

/// Parse a CineCanvas XML string into a subtitle document
///
/// Fails only when the input is not a CineCanvas document at all; malformed
/// cues inside a valid document degrade to defaults or are skipped.
pub fn read_document(xml: &str) -> Result<SubtitleDocument, CineCanvasError> {
    let root = parse_element_tree(xml)?;
    if root.name != ROOT_ELEMENT {
        return Err(CineCanvasError::InvalidRoot);
    }

    let mut doc = SubtitleDocument::new();
    doc.load_default();
    doc.events.clear();

    if let Some(title) = root.first("MovieTitle") {
        let title = title.text();
        if !title.trim().is_empty() {
            doc.set_script_info("Title", title.trim());
        }
    }
    if let Some(language) = root.first("Language") {
        let code = language.text();
        let code = code.trim();
        if !code.is_empty() {
            doc.set_script_info("Language", code);
            match crate::language_utils::get_language_name(code) {
                Ok(name) => log::debug!("Document language: {} ({})", code, name),
                Err(_) => log::debug!("Document language: {}", code),
            }
        }
    }

    // The first Font container supplies the default style for the whole
    // document; it replaces the Default style from load_default
    let container_props = root
        .first("Font")
        .map(parse_font_props)
        .unwrap_or_default();
    doc.styles.retain(|style| style.name != "Default");
    doc.styles.push(style_from_props(&container_props));

    for font in root.elements("Font") {
        for subtitle in font.elements("Subtitle") {
            let start_ms = from_timecode(subtitle.attr("TimeIn").unwrap_or("00:00:00:000"));
            let end_ms = from_timecode(subtitle.attr("TimeOut").unwrap_or("00:00:05:000"));
            let fade_up: i64 = subtitle
                .attr("FadeUpTime")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0);
            let fade_down: i64 = subtitle
                .attr("FadeDownTime")
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0);

            // Text lines live under nested Font elements when per-line
            // styling was written, directly under Subtitle otherwise
            let mut text_lines: Vec<(f64, String)> = subtitle
                .elements("Font")
                .flat_map(collect_text_lines)
                .collect();
            if text_lines.is_empty() {
                text_lines = collect_text_lines(subtitle);
            }

            // Higher VPosition renders higher on screen, so descending
            // order restores top-to-bottom source order
            text_lines.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

            let combined = text_lines
                .iter()
                .map(|(_, content)| content.as_str())
                .collect::<Vec<_>>()
                .join("\\N");
            if combined.is_empty() {
                continue;
            }

            let text = if fade_up > 0 || fade_down > 0 {
                format!("{{\\fad({},{})}}{}", fade_up, fade_down, combined)
            } else {
                combined
            };

            doc.events.push(DialogueLine {
                comment: false,
                start_ms,
                end_ms,
                style: IMPORT_STYLE_NAME.to_string(),
                text,
            });
        }
    }

    // A document always holds at least one line
    if doc.events.is_empty() {
        doc.events.push(DialogueLine {
            style: IMPORT_STYLE_NAME.to_string(),
            ..DialogueLine::default()
        });
    }

    Ok(doc)
}
