//! # Document Model
//!
//! An in-memory page-layout document: sections holding tables of cells,
//! cells holding paragraphs and nested tables, paragraphs holding runs.
//!
//! ## Modules
//!
//! - **`units`**: `Length`, stored in EMU
//! - **`model`**: `Document`, `Section`, `Table`, `Container`, `Paragraph`, `Run`
//! - **`host`**: `RichTextHost`, the seam the markup renderer writes through
//! - **`outline`**: a one-line-per-paragraph text view used by tests and the CLI
//!
//! Everything here derives `Serialize`, so a built document can be written out
//! as JSON for a downstream converter.

pub mod host;
pub mod model;
pub mod outline;
pub mod units;

pub use host::{ParagraphId, RichTextHost};
pub use model::*;
pub use outline::{document_outline, outline};
pub use units::Length;
