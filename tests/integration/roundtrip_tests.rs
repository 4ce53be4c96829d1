/*!
 * Export/import round-trip tests for the CineCanvas format
 */

use cinesub::cinecanvas::{read_document, write_document};
use cinesub::errors::CineCanvasError;
use cinesub::export_settings::ExportSettings;
use cinesub::subtitle_document::{DialogueLine, SubtitleDocument};
use crate::common;

fn doc_with_text(text: &str) -> SubtitleDocument {
    let mut doc = SubtitleDocument::new();
    doc.load_default();
    doc.events.clear();
    doc.events.push(DialogueLine {
        comment: false,
        start_ms: 1_000,
        end_ms: 4_000,
        style: "Default".to_string(),
        text: text.to_string(),
    });
    doc
}

/// Test that the exported XML carries the expected header metadata
#[test]
fn test_export_withDefaultSettings_shouldWriteHeader() {
    let xml = write_document(&doc_with_text("Hello"), &ExportSettings::default()).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<DCSubtitle Version=\"1.0\">"));
    assert!(xml.contains("<SubtitleID>urn:uuid:"));
    assert!(xml.contains("<MovieTitle>Untitled</MovieTitle>"));
    assert!(xml.contains("<ReelNumber>1</ReelNumber>"));
    assert!(xml.contains("<Language>en</Language>"));
    assert!(xml.contains("<LoadFont Id=\"Font1\" URI=\"\"/>"));
}

/// Test that export settings flow into the header
#[test]
fn test_export_withCustomSettings_shouldUseThem() {
    let settings = ExportSettings {
        movie_title: "Big Premiere".to_string(),
        reel_number: 2,
        language_code: "fr".to_string(),
        include_font_reference: true,
        font_uri: "/somewhere/fonts/CinemaSans.ttf".to_string(),
        ..ExportSettings::default()
    };

    let xml = write_document(&doc_with_text("Bonjour"), &settings).unwrap();

    assert!(xml.contains("<MovieTitle>Big Premiere</MovieTitle>"));
    assert!(xml.contains("<ReelNumber>2</ReelNumber>"));
    assert!(xml.contains("<Language>fr</Language>"));
    // LoadFont references the filename only, never the directory
    assert!(xml.contains("URI=\"CinemaSans.ttf\""));
}

/// Test frame quantization of cue times in the written XML
#[test]
fn test_export_withUnalignedTimes_shouldQuantizeTimecodes() {
    let mut doc = doc_with_text("Hi");
    doc.events[0].start_ms = 1_021;
    doc.events[0].end_ms = 4_000;

    let xml = write_document(&doc, &ExportSettings::default()).unwrap();

    assert!(xml.contains("TimeIn=\"00:00:01:042\""));
    assert!(xml.contains("TimeOut=\"00:00:04:000\""));
}

/// Test fade tag extraction into the Subtitle attributes
#[test]
fn test_export_withFadeTag_shouldWriteFadeAttributes() {
    let xml = write_document(&doc_with_text("{\\fad(500,300)}Hi"), &ExportSettings::default())
        .unwrap();

    assert!(xml.contains("FadeUpTime=\"500\""));
    assert!(xml.contains("FadeDownTime=\"300\""));
    assert!(xml.contains(">Hi</Text>"));
}

/// Test that lines without fade tags write zero fades
#[test]
fn test_export_withoutFadeTag_shouldWriteZeroFades() {
    let xml = write_document(&doc_with_text("Hi"), &ExportSettings::default()).unwrap();

    assert!(xml.contains("FadeUpTime=\"0\""));
    assert!(xml.contains("FadeDownTime=\"0\""));
}

/// Test mixed-style output: base Font plus nested inline Font
#[test]
fn test_export_withMixedStyles_shouldNestInlineFont() {
    let xml = write_document(
        &doc_with_text("{\\b1}Bold{\\b0} normal"),
        &ExportSettings::default(),
    )
    .unwrap();

    assert!(xml.contains("<Font Weight=\"bold\">Bold</Font>"));
    assert!(xml.contains(" normal"));
}

/// Test uniform styling: a single Font/Text pair for the line
#[test]
fn test_export_withUniformItalic_shouldUseLineLevelFont() {
    let xml = write_document(&doc_with_text("{\\i1}All italic"), &ExportSettings::default())
        .unwrap();

    assert!(xml.contains("Italic=\"yes\""));
    assert!(xml.contains(">All italic</Text>"));
    assert!(!xml.contains("<Font Italic=\"yes\">"));
}

/// Test bottom-up stacking of multi-line subtitles
#[test]
fn test_export_withTwoLines_shouldStackVPositions() {
    let xml = write_document(&doc_with_text("Hello\\NWorld"), &ExportSettings::default())
        .unwrap();

    // First source line sits above the second
    assert!(xml.contains("VPosition=\"16.5\""));
    assert!(xml.contains("VPosition=\"10.0\""));
    let hello_at = xml.find(">Hello</Text>").unwrap();
    let world_at = xml.find(">World</Text>").unwrap();
    assert!(hello_at < world_at);
}

/// Test that all-whitespace physical lines are dropped from the stack
#[test]
fn test_export_withBlankMiddleLine_shouldDropIt() {
    let xml = write_document(&doc_with_text("Top\\N   \\NBottom"), &ExportSettings::default())
        .unwrap();

    assert!(xml.contains("VPosition=\"16.5\""));
    assert!(xml.contains("VPosition=\"10.0\""));
    assert!(!xml.contains("VPosition=\"23.0\""));
}

/// Test the placeholder pair for an effectively empty subtitle
#[test]
fn test_export_withWhitespaceOnlyText_shouldEmitPlaceholder() {
    let xml = write_document(&doc_with_text("   "), &ExportSettings::default()).unwrap();

    assert!(xml.contains("<Subtitle"));
    assert!(xml.contains("></Text>"));
}

/// Test that comment lines never reach the XML
#[test]
fn test_export_withCommentLine_shouldSkipIt() {
    let mut doc = doc_with_text("Visible");
    doc.events.push(DialogueLine {
        comment: true,
        start_ms: 10_000,
        end_ms: 12_000,
        style: "Default".to_string(),
        text: "Hidden".to_string(),
    });

    let xml = write_document(&doc, &ExportSettings::default()).unwrap();

    assert!(xml.contains(">Visible</Text>"));
    assert!(!xml.contains("Hidden"));
}

/// Test the documented two-line round-trip property
#[test]
fn test_roundtrip_withTwoLineText_shouldPreserveLinesAndOrder() {
    let settings = ExportSettings::default();
    let xml = write_document(&doc_with_text("Hello\\NWorld"), &settings).unwrap();
    let imported = read_document(&xml).unwrap();

    assert_eq!(imported.events.len(), 1);
    assert_eq!(imported.events[0].text, "Hello\\NWorld");
    assert_eq!(imported.events[0].start_ms, 1_000);
    assert_eq!(imported.events[0].end_ms, 4_000);
    assert_eq!(imported.events[0].style, "CineCanvas");
}

/// Test that fades survive a round-trip as a fade tag
#[test]
fn test_roundtrip_withFades_shouldRestoreFadeTag() {
    let xml = write_document(&doc_with_text("{\\fad(500,300)}Hi"), &ExportSettings::default())
        .unwrap();
    let imported = read_document(&xml).unwrap();

    assert_eq!(imported.events[0].text, "{\\fad(500,300)}Hi");
}

/// Test import of the sample document
#[test]
fn test_import_withSampleDocument_shouldRecoverMetadataAndText() {
    let doc = read_document(common::SAMPLE_CINECANVAS).unwrap();

    assert_eq!(doc.script_info("Title"), Some("Test Movie"));
    assert_eq!(doc.script_info("Language"), Some("en"));
    assert_eq!(doc.events.len(), 1);
    assert_eq!(doc.events[0].text, "Hello from the cinema");
    assert_eq!(doc.events[0].start_ms, 1_000);
    assert_eq!(doc.events[0].end_ms, 4_000);
}

/// Test that the container font installs the CineCanvas style
#[test]
fn test_import_withStyledContainerFont_shouldInstallStyle() {
    let xml = r#"<DCSubtitle Version="1.0"><Font Size="36" Weight="bold" Italic="yes" Color="FF0000FF" Effect="border" EffectColor="000000FF"><Subtitle TimeIn="00:00:01:000" TimeOut="00:00:02:000"><Text VPosition="10.0">Hi</Text></Subtitle></Font></DCSubtitle>"#;
    let doc = read_document(xml).unwrap();

    assert!(doc.style("Default").is_none());
    let style = doc.style("CineCanvas").unwrap();
    assert_eq!(style.font_size, 36.0);
    assert!(style.bold);
    assert!(style.italic);
    assert_eq!(style.primary_color, cinesub::color::Rgb::new(255, 0, 0));
    assert_eq!(style.outline_width, 2.0);
}

/// Test descending VPosition ordering on import
#[test]
fn test_import_withShuffledTextLines_shouldSortByVPosition() {
    let xml = r#"<DCSubtitle Version="1.0"><Font Size="42"><Subtitle TimeIn="00:00:01:000" TimeOut="00:00:02:000"><Text VPosition="10.0">Bottom</Text><Text VPosition="16.5">Top</Text></Subtitle></Font></DCSubtitle>"#;
    let doc = read_document(xml).unwrap();

    assert_eq!(doc.events[0].text, "Top\\NBottom");
}

/// Test the placeholder event for documents with no usable cues
#[test]
fn test_import_withEmptyDocument_shouldCreatePlaceholderLine() {
    let doc = read_document(r#"<DCSubtitle Version="1.0"></DCSubtitle>"#).unwrap();

    assert_eq!(doc.events.len(), 1);
    assert_eq!(doc.events[0].text, "");
}

/// Test that empty Text content skips the cue entirely
#[test]
fn test_import_withEmptyTextContent_shouldSkipCue() {
    let xml = r#"<DCSubtitle Version="1.0"><Font Size="42"><Subtitle TimeIn="00:00:01:000" TimeOut="00:00:02:000"><Text VPosition="10.0"></Text></Subtitle></Font></DCSubtitle>"#;
    let doc = read_document(xml).unwrap();

    // Only the placeholder line remains
    assert_eq!(doc.events.len(), 1);
    assert_eq!(doc.events[0].text, "");
}

/// Test the fatal error for a foreign root element
#[test]
fn test_import_withWrongRoot_shouldFailWithInvalidRoot() {
    let result = read_document(r#"<Subtitles Version="1.0"></Subtitles>"#);
    assert!(matches!(result, Err(CineCanvasError::InvalidRoot)));
}

/// Test the fatal error for truncated XML
#[test]
fn test_import_withTruncatedXml_shouldFail() {
    assert!(read_document(r#"<DCSubtitle Version="1.0"><Font>"#).is_err());
}
