/*!
 * Validation of documents against DCP subtitle constraints.
 *
 * CineCanvas cannot represent everything an ASS script can; this module
 * scans a document before export and reports what will be lost or exceeds
 * DCP limits. Warnings are advisory and never block a conversion.
 *
 * # Architecture
 *
 * - `compatibility`: feature scan and warning generation
 */

pub mod compatibility;

// Re-export main entry points
pub use compatibility::{validate_for_export, FeatureScan};
