/*!
 * Tests for ASS/CineCanvas color conversion
 */

use cinesub::color::{parse_rgba_hex, to_rgba_hex, Rgb};

/// Test formatting with the inverted alpha sense
#[test]
fn test_to_rgba_hex_withOpaqueColor_shouldInvertAlpha() {
    // ASS alpha 0 (opaque) becomes CineCanvas FF (opaque)
    assert_eq!(to_rgba_hex(Rgb::new(255, 0, 0), 0), "FF0000FF");
    assert_eq!(to_rgba_hex(Rgb::WHITE, 0), "FFFFFFFF");
    assert_eq!(to_rgba_hex(Rgb::BLACK, 255), "00000000");
    assert_eq!(to_rgba_hex(Rgb::new(0x12, 0x34, 0x56), 0x20), "123456DF");
}

/// Test parsing of full RRGGBBAA strings
#[test]
fn test_parse_rgba_hex_withFullString_shouldRecoverColorAndAlpha() {
    assert_eq!(parse_rgba_hex("FF0000FF"), (Rgb::new(255, 0, 0), 0));
    assert_eq!(parse_rgba_hex("00000000"), (Rgb::BLACK, 255));
    assert_eq!(parse_rgba_hex("123456DF"), (Rgb::new(0x12, 0x34, 0x56), 0x20));
}

/// Test parsing of six-character strings without an alpha field
#[test]
fn test_parse_rgba_hex_withSixChars_shouldDefaultOpaque() {
    assert_eq!(parse_rgba_hex("00FF00"), (Rgb::new(0, 255, 0), 0));
}

/// Test the white/opaque fallback for short or invalid strings
#[test]
fn test_parse_rgba_hex_withInvalidInput_shouldFallBackToWhite() {
    assert_eq!(parse_rgba_hex(""), (Rgb::WHITE, 0));
    assert_eq!(parse_rgba_hex("12345"), (Rgb::WHITE, 0));
    assert_eq!(parse_rgba_hex("GGGGGG"), (Rgb::WHITE, 0));
    assert_eq!(parse_rgba_hex("FFFFFFZZ"), (Rgb::WHITE, 0));
}

/// Test the round-trip property over a sample of colors and alphas
#[test]
fn test_color_roundtrip_withSampledValues_shouldBeExact() {
    for (r, g, b) in [(0, 0, 0), (255, 255, 255), (12, 200, 99), (1, 2, 3)] {
        for alpha in [0u8, 1, 127, 128, 254, 255] {
            let color = Rgb::new(r, g, b);
            let hex = to_rgba_hex(color, alpha);
            assert_eq!(parse_rgba_hex(&hex), (color, alpha), "failed for {}", hex);
        }
    }
}
