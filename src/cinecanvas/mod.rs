/*!
 * CineCanvas XML subtitle format support.
 *
 * CineCanvas is the XML subtitle schema used inside Digital Cinema Packages:
 * a `DCSubtitle` root carrying reel metadata, font declarations and timed
 * `Subtitle` cues with positioned `Text` lines.
 *
 * # Architecture
 *
 * - `rules`: validation and clamping of DCP export configuration values
 * - `writer`: ASS document → CineCanvas XML
 * - `reader`: CineCanvas XML → ASS document
 */

pub mod reader;
pub mod rules;
pub mod writer;

/// Root element name of a CineCanvas subtitle document
pub const ROOT_ELEMENT: &str = "DCSubtitle";

/// Schema version written into the root element
pub const FORMAT_VERSION: &str = "1.0";

// Re-export main entry points
pub use reader::{is_cinecanvas, read_document};
pub use writer::write_document;
