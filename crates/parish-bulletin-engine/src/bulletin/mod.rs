//! # Bulletin
//!
//! Turns the editor's JSON payload into a two-sheet landscape [`Document`].
//!
//! - **`model`**: `BulletinData` and friends, deserialized with serde
//! - **`layout`**: sheet geometry, cell-margin units, the mass-time grid
//! - **`builder`**: `build()`, which assembles tables and renders markup into them
//!
//! [`Document`]: crate::document::Document

pub mod builder;
pub mod layout;
pub mod model;

pub use builder::{BuildError, BuildOptions, build};
pub use layout::{MassGrid, SheetGeometry};
pub use model::{
    BulletinData, ContentBlock, FrontPage, InfoBlock, Reading, ReadingKind, ReadingOptions,
    ReadingText, ReadingsPage,
};
