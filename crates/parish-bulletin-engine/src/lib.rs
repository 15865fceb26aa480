pub mod bulletin;
pub mod document;
pub mod io;
pub mod markup;

// Re-export key types for easier usage
pub use bulletin::{BuildError, BuildOptions, BulletinData, build};
pub use document::{Document, Length, RichTextHost};
pub use io::*;
pub use markup::{RenderOptions, plain_text, render};
