//! Page geometry for the two-up landscape bulletin.

use crate::document::{Length, PageMargins};

/// A4 landscape.
pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// Outer margins scale the configured side margin; the gutter between the two
/// half pages is split unevenly between them.
const LEFT_MARGIN_FACTOR: f64 = 0.8;
const RIGHT_MARGIN_FACTOR: f64 = 1.3;
const GUTTER_LEFT_FACTOR: f64 = 0.9;
const GUTTER_RIGHT_FACTOR: f64 = 0.4;
const FRONT_VERTICAL_FACTOR: f64 = 0.8;

/// Space kept free under the readings table.
const READINGS_FOOT_MM: f64 = 8.0;

/// EMU per cell-margin unit.
const CELL_MARGIN_EMU: f64 = 350.0;

/// Line height of info boxes as a multiple of their font size.
pub const INFO_LINE_HEIGHT: f64 = 1.22;
/// Vertical cell margin of info boxes, in cell-margin units.
pub const INFO_CELL_MARGIN: f64 = 70.0;
/// Horizontal cell margin of info and back-page boxes.
pub const BOX_SIDE_MARGIN: f64 = 80.0;

/// Geometry of one landscape sheet split into two half pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub page_width: Length,
    pub page_height: Length,
    pub margins: PageMargins,
    /// Width of the left half page.
    pub left_width: Length,
    /// Width of the gutter column between the halves.
    pub gutter_width: Length,
    /// Width of the right half page.
    pub right_width: Length,
    /// Height of the single row holding both halves.
    pub row_height: Length,
}

impl SheetGeometry {
    /// Front/back sheet: margins derived from `top_mm` and `side_mm`.
    pub fn front(top_mm: f64, side_mm: f64) -> Self {
        let top = Length::mm(top_mm);
        let vertical = top.scale(FRONT_VERTICAL_FACTOR);
        let margins = side_margins(Length::mm(side_mm), vertical, vertical);
        let page_height = Length::mm(PAGE_HEIGHT_MM);
        Self::split(margins, Length::mm(side_mm), page_height - vertical - vertical)
    }

    /// Readings sheet: the top margin is used as given and there is no bottom
    /// margin; the table stops short of the page foot instead.
    pub fn readings(top_mm: f64, side_mm: f64) -> Self {
        let top = Length::mm(top_mm);
        let margins = side_margins(Length::mm(side_mm), top, Length::ZERO);
        let page_height = Length::mm(PAGE_HEIGHT_MM);
        Self::split(
            margins,
            Length::mm(side_mm),
            page_height - top - Length::mm(READINGS_FOOT_MM),
        )
    }

    fn split(margins: PageMargins, side: Length, row_height: Length) -> Self {
        let page_width = Length::mm(PAGE_WIDTH_MM);
        let gutter_left = side.as_emu_f64() * GUTTER_LEFT_FACTOR;
        let gutter_right = side.as_emu_f64() * GUTTER_RIGHT_FACTOR;
        let half = page_width.as_emu_f64() / 2.0;

        Self {
            page_width,
            page_height: Length::mm(PAGE_HEIGHT_MM),
            margins,
            left_width: Length::from_emu_f64(half - margins.left.as_emu_f64() - gutter_left / 2.0),
            gutter_width: Length::from_emu_f64(gutter_left + gutter_right),
            right_width: Length::from_emu_f64(
                half - margins.right.as_emu_f64() - gutter_right / 2.0,
            ),
            row_height,
        }
    }
}

fn side_margins(side: Length, top: Length, bottom: Length) -> PageMargins {
    PageMargins {
        top,
        bottom,
        left: side.scale(LEFT_MARGIN_FACTOR),
        right: side.scale(RIGHT_MARGIN_FACTOR),
    }
}

/// Converts cell-margin units to a length.
pub fn cell_margin(units: f64) -> Length {
    Length::from_emu_f64(CELL_MARGIN_EMU * units)
}

/// Converts a length to cell-margin units.
pub fn to_cell_margin(length: Length) -> f64 {
    length.as_emu_f64() / CELL_MARGIN_EMU
}

/// Fixed height of an info box holding `lines` lines at `size` points,
/// margins included.
pub fn info_row_height(size: f64, lines: f64) -> Length {
    Length::pt(size * INFO_LINE_HEIGHT * lines) + cell_margin(2.0 * INFO_CELL_MARGIN)
}

/// Where each mass-time box goes in its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassGrid {
    pub rows: usize,
    pub cols: usize,
    /// `(row, col)` of each box, in input order.
    pub slots: Vec<(usize, usize)>,
    /// With three boxes the right column is one merged cell.
    pub merge_right_column: bool,
}

impl MassGrid {
    /// 1 → 1×1, 2 → 1×2, 3 → 2×2 with a merged right column, 4 and more →
    /// two rows filled column by column.
    pub fn for_count(count: usize) -> Option<Self> {
        let grid = match count {
            0 => return None,
            1 => Self {
                rows: 1,
                cols: 1,
                slots: vec![(0, 0)],
                merge_right_column: false,
            },
            2 => Self {
                rows: 1,
                cols: 2,
                slots: vec![(0, 0), (0, 1)],
                merge_right_column: false,
            },
            3 => Self {
                rows: 2,
                cols: 2,
                slots: vec![(0, 0), (1, 0), (0, 1)],
                merge_right_column: true,
            },
            n => {
                let cols = n.div_ceil(2);
                Self {
                    rows: 2,
                    cols,
                    slots: (0..cols)
                        .flat_map(|c| [(0, c), (1, c)])
                        .take(n)
                        .collect(),
                    merge_right_column: false,
                }
            }
        };
        Some(grid)
    }
}
