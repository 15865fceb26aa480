use std::path::PathBuf;

use serde::Serialize;

use super::units::Length;

/// Horizontal paragraph alignment. `Inherit` defers to the document's
/// normal style (justified for bulletins).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Inherit,
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TabAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabStop {
    pub position: Length,
    pub alignment: TabAlignment,
}

impl TabStop {
    pub fn right(position: Length) -> Self {
        Self {
            position,
            alignment: TabAlignment::Right,
        }
    }
}

/// Named paragraph style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    ListBullet,
}

impl ParagraphStyle {
    pub fn name(self) -> &'static str {
        match self {
            ParagraphStyle::Normal => "Normal",
            ParagraphStyle::ListBullet => "List Bullet",
        }
    }
}

/// Independent character toggles applied to a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub superscript: bool,
}

impl RunStyle {
    pub fn is_plain(self) -> bool {
        self == RunStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub style: RunStyle,
}

impl Run {
    pub fn new(
        text: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
        style: RunStyle,
    ) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            style,
        }
    }
}

/// An embedded picture. Only the path is recorded; the file is read when the
/// document is serialized into its final format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub path: PathBuf,
    pub width: Length,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Inline {
    Run(Run),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub alignment: Alignment,
    pub line_spacing: f64,
    pub space_before: Length,
    pub space_after: Length,
    pub left_indent: Length,
    pub first_line_indent: Length,
    pub tab_stops: Vec<TabStop>,
    pub content: Vec<Inline>,
}

impl Default for Paragraph {
    fn default() -> Self {
        Self {
            style: ParagraphStyle::Normal,
            alignment: Alignment::Inherit,
            line_spacing: 1.0,
            space_before: Length::ZERO,
            space_after: Length::ZERO,
            left_indent: Length::ZERO,
            first_line_indent: Length::ZERO,
            tab_stops: Vec::new(),
            content: Vec::new(),
        }
    }
}

impl Paragraph {
    pub fn with_style(style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Concatenated text of every run, images contributing nothing.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|i| match i {
            Inline::Run(run) => Some(run),
            Inline::Image(_) => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.content.iter().any(|i| matches!(i, Inline::Image(_)))
    }

    /// Whitespace-only text and no image.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty() && !self.has_image()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Cell margins in twentieths of a point (dxa).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CellMargins {
    pub top: f64,
    pub start: f64,
    pub bottom: f64,
    pub end: f64,
}

impl CellMargins {
    pub fn new(top: f64, start: f64, bottom: f64, end: f64) -> Self {
        Self {
            top,
            start,
            bottom,
            end,
        }
    }
}

/// Vertical merge marker for a cell spanning several rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Merge {
    Restart,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Anything that holds blocks: a table cell or a page body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Container {
    pub width: Option<Length>,
    pub margins: Option<CellMargins>,
    pub vertical_alignment: VerticalAlignment,
    pub borders_hidden: bool,
    pub merge: Option<Merge>,
    pub blocks: Vec<Block>,
}

impl Container {
    /// An empty container with no blocks at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh table cell. Cells always begin with one empty paragraph.
    pub fn cell() -> Self {
        Self {
            blocks: vec![Block::Paragraph(Paragraph::default())],
            ..Self::default()
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    /// Appends a nested table. A cell must end with a paragraph, so an empty
    /// one follows the table.
    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
        self.blocks.push(Block::Paragraph(Paragraph::default()));
    }

    /// Drops the placeholder paragraph a cell starts with, optionally zeroes
    /// the cell margins, and resets spacing on whatever paragraphs remain.
    pub fn normalize(&mut self, zero_margins: bool) {
        if let Some(pos) = self
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Paragraph(_)))
        {
            self.blocks.remove(pos);
        }
        if zero_margins {
            self.margins = Some(CellMargins::default());
        }
        for p in self.paragraphs_mut() {
            p.space_before = Length::ZERO;
            p.space_after = Length::ZERO;
            p.line_spacing = 1.0;
        }
    }

    /// Index into `blocks` of the `n`th paragraph.
    pub(crate) fn paragraph_block_index(&self, n: usize) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| matches!(b, Block::Paragraph(_)))
            .nth(n)
            .map(|(i, _)| i)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HeightRule {
    #[default]
    Auto,
    Exactly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub height: Option<Length>,
    pub height_rule: HeightRule,
    pub cells: Vec<Container>,
}

impl Row {
    pub fn set_exact_height(&mut self, height: Length) {
        self.height = Some(height);
        self.height_rule = HeightRule::Exactly;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBorders {
    pub color: String,
    pub size: u32,
    pub outer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub autofit: bool,
    pub borders: Option<TableBorders>,
    pub rows: Vec<Row>,
}

impl Table {
    /// A `rows` × `cols` grid of fresh cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            autofit: true,
            borders: None,
            rows: (0..rows)
                .map(|_| Row {
                    cells: (0..cols).map(|_| Container::cell()).collect(),
                    ..Row::default()
                })
                .collect(),
        }
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Container> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Container> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Merges column `col` from `first` to `last` (inclusive) into one cell,
    /// returning the surviving top cell.
    pub fn merge_down(&mut self, col: usize, first: usize, last: usize) -> Option<&mut Container> {
        for row in first..=last {
            let cell = self.cell_mut(row, col)?;
            cell.merge = Some(if row == first {
                Merge::Restart
            } else {
                Merge::Continue
            });
        }
        self.cell_mut(first, col)
    }

    pub fn set_borders(&mut self, color: &str, size: u32, outer: bool) {
        self.borders = Some(TableBorders {
            color: color.to_string(),
            size,
            outer,
        });
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub top: Length,
    pub bottom: Length,
    pub left: Length,
    pub right: Length,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub orientation: Orientation,
    pub page_width: Length,
    pub page_height: Length,
    pub margins: PageMargins,
    pub body: Container,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Alignment of the normal style that `Alignment::Inherit` resolves to.
    pub normal_alignment: Alignment,
    pub sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            normal_alignment: Alignment::Justify,
            sections: Vec::new(),
        }
    }
}
