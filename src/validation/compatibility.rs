/*!
 * DCP compatibility scan for ASS documents.
 *
 * Detects the ASS features that have no CineCanvas equivalent (animation,
 * blur and scale effects, vector drawings) plus capacity and line-length
 * limits, and turns the findings into human-readable warnings.
 */

use crate::export_settings::ExportSettings;
use crate::subtitle_document::SubtitleDocument;

/// Practical subtitle count limit per DCP reel
pub const MAX_SUBTITLES_PER_REEL: usize = 500;

/// Cinema subtitles beyond this raw length are flagged
pub const MAX_LINE_LENGTH: usize = 80;

/// Tags that animate over time
const ANIMATION_MARKERS: [&str; 2] = ["\\t", "\\move"];

/// Blur and scaling tags with no CineCanvas equivalent
const EFFECT_MARKERS: [&str; 4] = ["\\blur", "\\be", "\\fscx", "\\fscy"];

/// Vector drawing mode tag
const DRAWING_MARKER: &str = "\\p";

/// Findings of one document scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureScan {
    /// Number of non-comment subtitle events
    pub subtitle_count: usize,
    /// Longest raw dialogue text, tags included
    pub max_line_length: usize,
    pub has_animations: bool,
    pub has_complex_effects: bool,
    pub has_drawings: bool,
}

/// Scan every non-comment line for DCP-incompatible features
pub fn scan_document(doc: &SubtitleDocument) -> FeatureScan {
    let mut scan = FeatureScan::default();

    for line in &doc.events {
        if line.comment {
            continue;
        }

        scan.subtitle_count += 1;
        scan.max_line_length = scan.max_line_length.max(line.text.len());

        let text = line.text.as_str();
        if ANIMATION_MARKERS.iter().any(|marker| text.contains(marker)) {
            scan.has_animations = true;
        }
        if EFFECT_MARKERS.iter().any(|marker| text.contains(marker)) {
            scan.has_complex_effects = true;
        }
        if text.contains(DRAWING_MARKER) {
            scan.has_drawings = true;
        }
    }

    scan
}

/// Build the newline-joined warning report for an export
///
/// Each warning triggers independently; the closing color-space note is
/// unconditional, so the report is never empty.
pub fn validate_for_export(doc: &SubtitleDocument, settings: &ExportSettings) -> String {
    let scan = scan_document(doc);
    let mut warnings: Vec<String> = Vec::new();

    if scan.subtitle_count > MAX_SUBTITLES_PER_REEL {
        warnings.push(format!(
            "Warning: File contains {} subtitles. DCP typically limits to ~500 per reel.",
            scan.subtitle_count
        ));
    }

    if scan.has_animations {
        warnings.push("Warning: Animations (\\t, \\move) will be lost in export.".to_string());
    }

    if scan.has_complex_effects {
        warnings.push(
            "Warning: Complex effects (\\blur, \\be, scaling) will be lost in export.".to_string(),
        );
    }

    if scan.has_drawings {
        warnings
            .push("Warning: Vector drawings (\\p) are not supported and will be lost.".to_string());
    }

    if scan.max_line_length > MAX_LINE_LENGTH {
        warnings.push(
            "Warning: Some lines are very long. Cinema subtitles typically use 40-50 characters \
             per line."
                .to_string(),
        );
    }

    if settings.include_font_reference && settings.font_uri.is_empty() {
        warnings.push("Warning: Font reference enabled but no font file selected.".to_string());
    }

    warnings.push(
        "Note: DCP uses XYZ color space. Color appearance may differ from ASS preview.".to_string(),
    );

    warnings.join("\n")
}
