//! # Bulletin Markup
//!
//! A small inline markup language rendered into styled paragraphs.
//!
//! ## Vocabulary
//!
//! `<b>`, `<i>`, `<u>`, `<s>` (superscript) and `<ul>` have close forms;
//! `<br>` and `<_tab>` do not. Anything else between angle brackets is
//! unrecognized and comes out as literal text, brackets included.
//!
//! ## Pipeline
//!
//! - **`preprocess`**: breaks next to list boundaries are absorbed and adjacent
//!   breaks are separated by a filler character
//! - **`lexer`**: `tokenize()`, a two-state (`InText`/`InTag`) single pass
//! - **`context`**: `StyleContext`, the ordered set of open tags
//! - **`render`**: `render()`, which drives a `RichTextHost` paragraph by paragraph
//!
//! ## Key Invariants
//!
//! - A `<` that does not start a recognized tag is never dropped
//! - Closing a tag removes its nearest open instance, not the top of the stack
//! - After a render the host holds no blank paragraph unless it is the only one

pub mod context;
pub mod lexer;
pub mod preprocess;
pub mod render;
pub mod tags;

pub use context::StyleContext;
pub use lexer::{MarkupToken, tokenize};
pub use preprocess::FILLER;
pub use render::{DEFAULT_FONT_FAMILY, RenderOptions, remove_blank_paragraphs, render};
pub use tags::{Tag, TagToken};

/// Text with every recognized tag removed and everything else kept, as it
/// would read once rendered (fillers included).
pub fn plain_text(raw: &str) -> String {
    tokenize(&preprocess::preprocess(raw))
        .into_iter()
        .filter_map(|token| match token {
            MarkupToken::Text(text) => Some(text),
            MarkupToken::Tag(TagToken::Unrecognized(name)) => {
                Some(TagToken::Unrecognized(name).source())
            }
            MarkupToken::Tag(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_only_recognized_tags() {
        assert_eq!(plain_text("<b>Hi</b> <xyz>there</br>"), "Hi <xyz>there</br>");
    }
}
