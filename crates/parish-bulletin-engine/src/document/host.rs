use super::{
    model::{Alignment, Block, Container, Inline, Paragraph, ParagraphStyle, Run, TabStop},
    units::Length,
};

/// Position of a paragraph among the host's paragraphs (nested tables are
/// not counted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParagraphId(pub usize);

/// The operations the markup renderer needs from whatever it writes into.
///
/// Paragraph ids stay valid until a paragraph before them is removed.
pub trait RichTextHost {
    /// Appends a paragraph and returns its id.
    fn add_paragraph(&mut self, style: ParagraphStyle) -> ParagraphId;

    fn push_run(&mut self, id: ParagraphId, run: Run);

    fn set_alignment(&mut self, id: ParagraphId, alignment: Alignment);

    fn set_line_spacing(&mut self, id: ParagraphId, spacing: f64);

    fn set_space_before(&mut self, id: ParagraphId, space: Length);

    fn set_space_after(&mut self, id: ParagraphId, space: Length);

    /// Sets the body indent and the first-line indent (negative for a
    /// hanging first line).
    fn set_indent(&mut self, id: ParagraphId, left: Length, first_line: Length);

    fn add_tab_stop(&mut self, id: ParagraphId, stop: TabStop);

    fn paragraph_count(&self) -> usize;

    fn paragraph_text(&self, id: ParagraphId) -> String;

    fn paragraph_has_image(&self, id: ParagraphId) -> bool;

    fn remove_paragraph(&mut self, id: ParagraphId);
}

impl Container {
    pub fn paragraph(&self, id: ParagraphId) -> Option<&Paragraph> {
        self.paragraphs().nth(id.0)
    }

    pub fn paragraph_mut(&mut self, id: ParagraphId) -> Option<&mut Paragraph> {
        self.paragraphs_mut().nth(id.0)
    }

    fn with_paragraph(&mut self, id: ParagraphId, f: impl FnOnce(&mut Paragraph)) {
        match self.paragraph_mut(id) {
            Some(p) => f(p),
            None => log::warn!("paragraph {} does not exist in container", id.0),
        }
    }
}

impl RichTextHost for Container {
    fn add_paragraph(&mut self, style: ParagraphStyle) -> ParagraphId {
        let id = ParagraphId(self.paragraphs().count());
        self.blocks.push(Block::Paragraph(Paragraph::with_style(style)));
        id
    }

    fn push_run(&mut self, id: ParagraphId, run: Run) {
        self.with_paragraph(id, |p| p.content.push(Inline::Run(run)));
    }

    fn set_alignment(&mut self, id: ParagraphId, alignment: Alignment) {
        self.with_paragraph(id, |p| p.alignment = alignment);
    }

    fn set_line_spacing(&mut self, id: ParagraphId, spacing: f64) {
        self.with_paragraph(id, |p| p.line_spacing = spacing);
    }

    fn set_space_before(&mut self, id: ParagraphId, space: Length) {
        self.with_paragraph(id, |p| p.space_before = space);
    }

    fn set_space_after(&mut self, id: ParagraphId, space: Length) {
        self.with_paragraph(id, |p| p.space_after = space);
    }

    fn set_indent(&mut self, id: ParagraphId, left: Length, first_line: Length) {
        self.with_paragraph(id, |p| {
            p.left_indent = left;
            p.first_line_indent = first_line;
        });
    }

    fn add_tab_stop(&mut self, id: ParagraphId, stop: TabStop) {
        self.with_paragraph(id, |p| p.tab_stops.push(stop));
    }

    fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    fn paragraph_text(&self, id: ParagraphId) -> String {
        self.paragraph(id).map(Paragraph::text).unwrap_or_default()
    }

    fn paragraph_has_image(&self, id: ParagraphId) -> bool {
        self.paragraph(id).is_some_and(Paragraph::has_image)
    }

    fn remove_paragraph(&mut self, id: ParagraphId) {
        if let Some(index) = self.paragraph_block_index(id.0) {
            self.blocks.remove(index);
        }
    }
}
