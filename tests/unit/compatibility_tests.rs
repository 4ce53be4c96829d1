/*!
 * Tests for DCP compatibility warnings
 */

use cinesub::export_settings::ExportSettings;
use cinesub::subtitle_document::{DialogueLine, SubtitleDocument};
use cinesub::validation::compatibility::{scan_document, validate_for_export};

fn doc_with_lines(texts: &[&str]) -> SubtitleDocument {
    let mut doc = SubtitleDocument::new();
    doc.load_default();
    doc.events.clear();
    for (index, text) in texts.iter().enumerate() {
        doc.events.push(DialogueLine {
            comment: false,
            start_ms: index as u64 * 2_000,
            end_ms: index as u64 * 2_000 + 1_500,
            style: "Default".to_string(),
            text: text.to_string(),
        });
    }
    doc
}

/// Test that the color-space note always fires
#[test]
fn test_validate_withCleanDocument_shouldOnlyEmitColorNote() {
    let doc = doc_with_lines(&["Hello"]);
    let report = validate_for_export(&doc, &ExportSettings::default());

    assert_eq!(report.lines().count(), 1);
    assert!(report.contains("XYZ color space"));
}

/// Test the capacity warning with the exact count
#[test]
fn test_validate_withOver500Lines_shouldWarnCapacity() {
    let texts: Vec<String> = (0..501).map(|i| format!("Line {}", i)).collect();
    let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
    let doc = doc_with_lines(&refs);

    let report = validate_for_export(&doc, &ExportSettings::default());
    assert!(report.contains("contains 501 subtitles"));
    assert!(report.contains("XYZ color space"));
}

/// Test that comment lines do not count toward capacity
#[test]
fn test_scan_withCommentLines_shouldIgnoreThem() {
    let mut doc = doc_with_lines(&["Visible"]);
    doc.events.push(DialogueLine {
        comment: true,
        text: "{\\blur3}hidden".to_string(),
        ..DialogueLine::default()
    });

    let scan = scan_document(&doc);
    assert_eq!(scan.subtitle_count, 1);
    assert!(!scan.has_complex_effects);
}

/// Test the animation-loss warning
#[test]
fn test_validate_withAnimationTags_shouldWarnAnimations() {
    let doc = doc_with_lines(&["{\\t(0,500,\\fs30)}moving", "{\\move(0,0,100,100)}sliding"]);
    let report = validate_for_export(&doc, &ExportSettings::default());
    assert!(report.contains("Animations"));
}

/// Test the effects-loss warning with a blur tag
#[test]
fn test_validate_withBlurTag_shouldWarnEffects() {
    let doc = doc_with_lines(&["{\\blur3}soft"]);
    let report = validate_for_export(&doc, &ExportSettings::default());
    assert!(report.contains("Complex effects"));
}

/// Test the drawing warning
#[test]
fn test_validate_withDrawingTag_shouldWarnDrawings() {
    let doc = doc_with_lines(&["{\\p1}m 0 0 l 100 0"]);
    let report = validate_for_export(&doc, &ExportSettings::default());
    assert!(report.contains("Vector drawings"));
}

/// Test the line-length warning
#[test]
fn test_validate_withVeryLongLine_shouldWarnLength() {
    let long_line = "a".repeat(81);
    let doc = doc_with_lines(&[long_line.as_str()]);
    let report = validate_for_export(&doc, &ExportSettings::default());
    assert!(report.contains("very long"));
}

/// Test the missing-font warning
#[test]
fn test_validate_withFontReferenceButNoFile_shouldWarnMissingFont() {
    let doc = doc_with_lines(&["Hello"]);
    let settings = ExportSettings {
        include_font_reference: true,
        ..ExportSettings::default()
    };

    let report = validate_for_export(&doc, &settings);
    assert!(report.contains("no font file selected"));

    let settings = ExportSettings {
        include_font_reference: true,
        font_uri: "/fonts/cinema.ttf".to_string(),
        ..ExportSettings::default()
    };
    let report = validate_for_export(&doc, &settings);
    assert!(!report.contains("no font file selected"));
}

/// Test warning ordering: capacity first, color note last
#[test]
fn test_validate_withManyIssues_shouldKeepOrder() {
    let mut texts: Vec<String> = (0..501).map(|i| format!("Line {}", i)).collect();
    texts.push("{\\blur3}{\\t(0,1,\\fs9)}x".to_string());
    let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
    let doc = doc_with_lines(&refs);

    let report = validate_for_export(&doc, &ExportSettings::default());
    let lines: Vec<&str> = report.lines().collect();

    assert!(lines.first().unwrap().contains("subtitles"));
    assert!(lines.last().unwrap().contains("XYZ color space"));
}
