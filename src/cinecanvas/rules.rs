/*!
 * Validation of DCP export configuration values.
 *
 * Every validator substitutes a safe default for out-of-range or malformed
 * input instead of failing: export settings may come from stale preference
 * files or hand-edited JSON, and a bad value should never abort a
 * conversion.
 */

use crate::language_utils;

/// Frame rates a DCP subtitle reel may declare
pub const SUPPORTED_FRAME_RATES: [i32; 3] = [24, 25, 30];

/// Font size bounds (points)
pub const MIN_FONT_SIZE: i32 = 10;
pub const MAX_FONT_SIZE: i32 = 72;

/// Minimum reel number
pub const MIN_REEL_NUMBER: i32 = 1;

/// Minimum fade duration (milliseconds)
pub const MIN_FADE_DURATION: i32 = 0;

/// Default values
pub const DEFAULT_FRAME_RATE: i32 = 24;
pub const DEFAULT_MOVIE_TITLE: &str = "Untitled";
pub const DEFAULT_REEL_NUMBER: i32 = 1;
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_FONT_SIZE: i32 = 42;
pub const DEFAULT_FADE_DURATION: i32 = 20;

/// Validate a frame rate, falling back to the default when unsupported
pub fn validate_frame_rate(fps: i32) -> i32 {
    if SUPPORTED_FRAME_RATES.contains(&fps) {
        fps
    } else {
        DEFAULT_FRAME_RATE
    }
}

/// Validate a movie title: trimmed, never empty
pub fn validate_movie_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_MOVIE_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate a reel number, falling back to the default when below 1
pub fn validate_reel_number(reel: i32) -> i32 {
    if reel >= MIN_REEL_NUMBER {
        reel
    } else {
        DEFAULT_REEL_NUMBER
    }
}

/// Validate an ISO 639 language code
///
/// The code is lowercased. Known ISO 639 codes are accepted, as is any 2-3
/// letter alphabetic string (codes the table may not know about); anything
/// else falls back to "en".
pub fn validate_language_code(code: &str) -> String {
    let lowered = code.to_lowercase();
    if is_valid_language_code(&lowered) {
        lowered
    } else {
        DEFAULT_LANGUAGE_CODE.to_string()
    }
}

/// Validate a font size in points, falling back when outside [10, 72]
pub fn validate_font_size(size: i32) -> i32 {
    if (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        size
    } else {
        DEFAULT_FONT_SIZE
    }
}

/// Validate a fade duration in milliseconds, falling back when negative
pub fn validate_fade_duration(duration: i32) -> i32 {
    if duration >= MIN_FADE_DURATION {
        duration
    } else {
        DEFAULT_FADE_DURATION
    }
}

/// Check whether a (lowercase) language code is acceptable for DCP metadata
pub fn is_valid_language_code(code: &str) -> bool {
    if language_utils::validate_language_code(code).is_ok() {
        return true;
    }

    // Accept any 2-3 letter alphabetic code the ISO table may not cover
    (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic())
}
