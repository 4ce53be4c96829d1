/*!
 * Tests for error types and conversions
 */

use cinesub::errors::{AppError, CineCanvasError, DocumentError};

/// Test the fatal format error display
#[test]
fn test_cinecanvas_error_withInvalidRoot_shouldDescribeProblem() {
    let message = CineCanvasError::InvalidRoot.to_string();
    assert!(message.contains("DCSubtitle"));
}

/// Test document error display with positional context
#[test]
fn test_document_error_withLineNumbers_shouldIncludeThem() {
    let error = DocumentError::InvalidTimestamp {
        line: 12,
        value: "bogus".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("12"));
    assert!(message.contains("bogus"));

    let error = DocumentError::MalformedDialogue { line: 7 };
    assert!(error.to_string().contains("7"));
}

/// Test wrapping of domain errors into the application error
#[test]
fn test_app_error_withDomainErrors_shouldWrapThem() {
    let app: AppError = CineCanvasError::InvalidRoot.into();
    assert!(matches!(app, AppError::CineCanvas(_)));

    let app: AppError = DocumentError::MalformedDialogue { line: 1 }.into();
    assert!(matches!(app, AppError::Document(_)));
}

/// Test conversion from IO and anyhow errors
#[test]
fn test_app_error_withFoundationErrors_shouldConvert() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app: AppError = io_error.into();
    assert!(matches!(app, AppError::File(_)));
    assert!(app.to_string().contains("gone"));

    let app: AppError = anyhow::anyhow!("mystery").into();
    assert!(matches!(app, AppError::Unknown(_)));
}
