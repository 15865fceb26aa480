use crate::document::RunStyle;

use super::tags::Tag;

/// Tags currently open, in the order they were opened.
///
/// Closing removes the most recently opened instance of that tag wherever it
/// sits, so improperly interleaved tags close without disturbing the order of
/// the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleContext {
    open: Vec<Tag>,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: Tag) {
        self.open.push(tag);
    }

    /// Removes the nearest open instance of `tag`. Returns false when the
    /// tag was not open.
    pub fn close(&mut self, tag: Tag) -> bool {
        match self.open.iter().rposition(|t| *t == tag) {
            Some(pos) => {
                self.open.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the most recently opened tag, whatever it is.
    pub fn pop(&mut self) -> Option<Tag> {
        self.open.pop()
    }

    pub fn is_open(&self, tag: Tag) -> bool {
        self.open.contains(&tag)
    }

    /// The most recently opened tag still open.
    pub fn innermost(&self) -> Option<Tag> {
        self.open.last().copied()
    }

    /// True while a bullet list is the innermost open tag.
    pub fn in_list(&self) -> bool {
        self.innermost() == Some(Tag::List)
    }

    pub fn tags(&self) -> &[Tag] {
        &self.open
    }

    /// Character style for a run flushed right now.
    pub fn run_style(&self) -> RunStyle {
        RunStyle {
            bold: self.is_open(Tag::Bold),
            italic: self.is_open(Tag::Italic),
            underline: self.is_open(Tag::Underline),
            superscript: self.is_open(Tag::Superscript),
        }
    }
}
