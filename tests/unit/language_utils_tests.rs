/*!
 * Tests for ISO language code utilities
 */

use cinesub::language_utils::{get_language_name, normalize_to_part2t, validate_language_code};

/// Test validation of ISO 639-1 and 639-2 codes
#[test]
fn test_validate_language_code_withIsoCodes_shouldAccept() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("fre").is_ok()); // bibliographic French
    assert!(validate_language_code(" DE ").is_ok()); // trimmed and lowercased
}

/// Test rejection of unknown codes
#[test]
fn test_validate_language_code_withUnknownCodes_shouldReject() {
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("x1").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization to the 639-2/T form
#[test]
fn test_normalize_to_part2t_withVariantForms_shouldNormalize() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("eng").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
}

/// Test language name resolution
#[test]
fn test_get_language_name_withValidCodes_shouldResolve() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("zz").is_err());
}
