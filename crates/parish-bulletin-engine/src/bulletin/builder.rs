use std::path::PathBuf;

use crate::{
    document::{
        Alignment, Block, CellMargins, Container, Document, Image, Inline, Length, Orientation,
        ParagraphStyle, RichTextHost, Section, Table, VerticalAlignment,
    },
    markup::{DEFAULT_FONT_FAMILY, RenderOptions, render},
};

use super::{
    layout::{
        BOX_SIDE_MARGIN, INFO_CELL_MARGIN, MassGrid, SheetGeometry, cell_margin, info_row_height,
        to_cell_margin,
    },
    model::{
        BulletinData, ContentBlock, FrontPage, Reading, ReadingKind, ReadingOptions, ReadingText,
        ReadingsPage,
    },
};

pub const DEFAULT_COPYRIGHT_NOTICE: &str = "The text of Sacred Scripture in the Lectionary is from the English Standard Version of the Bible, Catholic Edition (ESV-CE), published by Asian Trading Corporation, \u{00a9} 2017 Crossway. All rights are reserved. The English Standard Version of the Bible, Catholic Edition is published in the United Kingdom by SPCK Publishing. The Psalms and Canticles are from Abbey Psalms and Canticles \u{00a9} 2018 United States Conference of Catholic Bishops. Reprinted with permission.";

pub const DEFAULT_DATA_PROTECTION_NOTICE: &str = "Please note the Data Protection Act 2018 restricts the inclusion of the names of our sick unless their consent is given. If you wish to include someone\u{2019}s name here please speak to the parish priest about completing a Consent Form from the sacristy.";

const SUNG_NOTE: &str = "<i>wording may differ if sung</i>";
const BORDER_COLOR: &str = "000000";
const BORDER_SIZE: u32 = 4;
const LOGO_WIDTH_MM: f64 = 54.0;
const OPEN_QUOTE: char = '\u{201C}';
const CLOSE_QUOTE: char = '\u{201D}';

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Required asset not found: {0}")]
    MissingAsset(PathBuf),
    #[error("Reading {index} ({kind:?}) is invalid: {reason}")]
    InvalidReading {
        index: usize,
        kind: ReadingKind,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub font_family: String,
    pub logo_path: PathBuf,
    pub logo_width: Length,
    pub copyright_notice: String,
    pub data_protection_notice: String,
}

impl BuildOptions {
    pub fn new(logo_path: impl Into<PathBuf>) -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            logo_path: logo_path.into(),
            logo_width: Length::mm(LOGO_WIDTH_MM),
            copyright_notice: DEFAULT_COPYRIGHT_NOTICE.to_string(),
            data_protection_notice: DEFAULT_DATA_PROTECTION_NOTICE.to_string(),
        }
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}

/// Builds the two-sheet bulletin: front and back pages side by side on the
/// first sheet, the readings on the second.
pub fn build(data: &BulletinData, options: &BuildOptions) -> Result<Document, BuildError> {
    BulletinBuilder { options }.build(data)
}

struct BulletinBuilder<'a> {
    options: &'a BuildOptions,
}

impl BulletinBuilder<'_> {
    fn build(&self, data: &BulletinData) -> Result<Document, BuildError> {
        if !self.options.logo_path.exists() {
            return Err(BuildError::MissingAsset(self.options.logo_path.clone()));
        }

        let front = self.front_sheet(&data.front, &data.back);
        let readings = self.readings_sheet(&data.readings)?;

        Ok(Document {
            normal_alignment: Alignment::Justify,
            sections: vec![front, readings],
        })
    }

    fn text(&self, size: f64, line_spacing: f64) -> RenderOptions {
        RenderOptions::new(self.options.font_family.as_str(), size, line_spacing)
    }

    fn front_sheet(&self, front: &FrontPage, back: &[ContentBlock]) -> Section {
        let geometry = SheetGeometry::front(front.top_margin, front.left_margin);
        let mut sheet = sheet_table(&geometry);

        let cells = &mut sheet.rows[0].cells;
        cells[0].normalize(true);
        cells[0].add_table(self.back_table(back, &geometry));
        cells[2].normalize(true);
        cells[2].add_table(self.info_table(front, &geometry));
        sheet.set_borders(BORDER_COLOR, BORDER_SIZE, true);

        log::info!(
            "built front sheet: {} info box(es), {} back block(s)",
            front.latest_info.len(),
            back.len()
        );
        section(&geometry, sheet)
    }

    /// Right half: the front page on top, info boxes stacked underneath.
    fn info_table(&self, front: &FrontPage, geometry: &SheetGeometry) -> Table {
        let mut table = Table::new(front.latest_info.len() + 1, 1);
        let last = front.latest_info.len().saturating_sub(1);
        let mut used = Length::ZERO;

        for (n, (info, row)) in front
            .latest_info
            .iter()
            .zip(table.rows.iter_mut().skip(1))
            .enumerate()
        {
            let height = info_row_height(front.latest_info_size, info.lines());
            if n != last {
                row.set_exact_height(height);
            }

            let cell = &mut row.cells[0];
            cell.normalize(false);
            cell.margins = Some(CellMargins::new(
                INFO_CELL_MARGIN,
                BOX_SIDE_MARGIN,
                INFO_CELL_MARGIN,
                BOX_SIDE_MARGIN,
            ));
            cell.width = Some(geometry.right_width);
            render(
                cell,
                &strip_newlines(info.text()),
                &self
                    .text(front.latest_info_size, 1.0)
                    .centered(info.centered()),
            );

            used += height + cell_margin(2.0 * INFO_CELL_MARGIN);
        }

        table.rows[0].height = Some(geometry.row_height - used);
        self.front_page(&mut table.rows[0].cells[0], front);
        table.set_borders(BORDER_COLOR, BORDER_SIZE, false);
        table
    }

    fn front_page(&self, cell: &mut Container, front: &FrontPage) {
        render(
            cell,
            &strip_newlines(&front.title),
            &self
                .text(front.title_size, 1.3)
                .space_before(20.0)
                .centered(true),
        );

        let logo = cell.add_paragraph(ParagraphStyle::Normal);
        cell.set_alignment(logo, Alignment::Center);
        cell.set_line_spacing(logo, 1.0);
        cell.set_space_before(logo, Length::pt(5.0));
        cell.set_space_after(logo, Length::ZERO);
        if let Some(p) = cell.paragraph_mut(logo) {
            p.content.push(Inline::Image(Image {
                path: self.options.logo_path.clone(),
                width: self.options.logo_width,
            }));
        }

        render(
            cell,
            &strip_newlines(&front.church_title),
            &self
                .text(front.church_title_size, 1.2)
                .space_before(13.0)
                .centered(true),
        );
        render(
            cell,
            &strip_newlines(&front.church_info),
            &self
                .text(front.church_info_size, 1.2)
                .space_before(2.0)
                .centered(true),
        );

        let times: Vec<String> = front.mass_info.iter().map(|t| strip_newlines(t)).collect();
        if let Some(grid) = MassGrid::for_count(times.len()) {
            cell.add_table(self.mass_table(&grid, &times, front.mass_info_size));
        }
    }

    fn mass_table(&self, grid: &MassGrid, times: &[String], size: f64) -> Table {
        let mut table = Table::new(grid.rows, grid.cols);
        if grid.merge_right_column {
            table.merge_down(1, 0, 1);
        }
        for (&(r, c), text) in grid.slots.iter().zip(times) {
            let cell = &mut table.rows[r].cells[c];
            cell.normalize(false);
            cell.vertical_alignment = VerticalAlignment::Center;
            cell.margins = Some(CellMargins::new(150.0, 0.0, 50.0, 0.0));
            render(cell, text, &self.text(size, 1.0).centered(true));
        }
        table
    }

    /// Left half: the back page, one box per content block.
    fn back_table(&self, back: &[ContentBlock], geometry: &SheetGeometry) -> Table {
        let mut table = Table::new(back.len(), 1);
        for (block, row) in back.iter().zip(table.rows.iter_mut()) {
            let cell = &mut row.cells[0];
            cell.normalize(false);
            let margin = to_cell_margin(Length::mm(block.vertical_margin()));
            cell.margins = Some(CellMargins::new(
                margin,
                BOX_SIDE_MARGIN,
                margin,
                BOX_SIDE_MARGIN,
            ));
            cell.width = Some(geometry.left_width);
            render(
                cell,
                &strip_newlines(block.text()),
                &self.text(block.size(), 1.0),
            );
        }
        table.set_borders(BORDER_COLOR, BORDER_SIZE, false);
        table
    }

    fn readings_sheet(&self, page: &ReadingsPage) -> Result<Section, BuildError> {
        let options = &page.options;
        let geometry = SheetGeometry::readings(options.top_margin, options.left_margin);
        let mut sheet = sheet_table(&geometry);
        let mut pages = ReadingPages::default();
        let mut shown: Vec<ReadingKind> = Vec::new();

        for (index, reading) in page.readings.iter().enumerate() {
            if !reading.include {
                log::debug!("skipping excluded reading {index}");
                continue;
            }
            let alternative = reading.alt && shown.contains(&reading.kind);
            let cell = pages.cell(&mut sheet, reading.left);
            self.reading(cell, index, reading, alternative, options, geometry.left_width)?;
            shown.push(reading.kind);
        }

        let notice = self.text(options.copyright_size, 1.0);
        render(
            pages.cell(&mut sheet, options.copyright_page == 0),
            &format!("<i>{}</i>", self.options.copyright_notice),
            &notice.clone().space_after(options.copyright_spacing),
        );
        render(
            pages.cell(&mut sheet, options.dpa_page == 0),
            &format!("<i>{}</i>", self.options.data_protection_notice),
            &notice,
        );

        log::info!("built readings sheet: {} reading(s)", shown.len());
        Ok(section(&geometry, sheet))
    }

    fn reading(
        &self,
        cell: &mut Container,
        index: usize,
        reading: &Reading,
        alternative: bool,
        options: &ReadingOptions,
        tab_stop: Length,
    ) -> Result<(), BuildError> {
        let heading = self
            .text(options.heading_size, 1.0)
            .space_after(options.heading_spacing);
        let label = if alternative {
            "OR"
        } else {
            reading.kind.heading()
        };
        let sung_on_heading = reading.kind.may_be_sung() && !alternative && reading.sameline;
        let sung = if sung_on_heading {
            format!("  {SUNG_NOTE}")
        } else {
            String::new()
        };
        render(
            cell,
            &format!("<b>{label}</b>{sung}<_tab>{}", strip_newlines(&reading.reference)),
            &heading.clone().tab_stop(tab_stop),
        );

        if let Some(title) = reading.title() {
            render(
                cell,
                &format!("<b><i>{OPEN_QUOTE}{}{CLOSE_QUOTE}</i></b>", strip_newlines(title)),
                &heading,
            );
        }

        let body = self.text(reading.size, 1.0).space_after(reading.margin);
        match reading.kind {
            ReadingKind::Reading1 | ReadingKind::Reading2 | ReadingKind::Gospel => {
                render(cell, &strip_newlines(&reading.text.joined()), &body);
            }
            ReadingKind::Psalm => {
                if !reading.sameline && !alternative {
                    render(cell, SUNG_NOTE, &heading);
                }
                let (response, verses) = psalm_parts(index, reading)?;
                render(
                    cell,
                    &format!("<b>{response}</b>"),
                    &self
                        .text(reading.size, 1.0)
                        .space_after(options.heading_spacing),
                );
                render(cell, &verses, &body);
            }
            ReadingKind::Acclamation => {
                if !reading.sameline && !alternative {
                    render(cell, SUNG_NOTE, &heading);
                }
                render(
                    cell,
                    &format!(
                        "<b>Alleluia, alleluia.</b><br>{}<br><b>Alleluia.</b>",
                        strip_newlines(&reading.text.joined())
                    ),
                    &body,
                );
            }
        }
        Ok(())
    }
}

/// Tracks which reading page has had its placeholder paragraph removed.
#[derive(Default)]
struct ReadingPages {
    left_ready: bool,
    right_ready: bool,
}

impl ReadingPages {
    /// The left or right page cell, normalized on first use.
    fn cell<'t>(&mut self, sheet: &'t mut Table, left: bool) -> &'t mut Container {
        let (ready, col) = if left {
            (&mut self.left_ready, 0)
        } else {
            (&mut self.right_ready, 2)
        };
        let cell = &mut sheet.rows[0].cells[col];
        if !*ready {
            cell.normalize(true);
            *ready = true;
        }
        cell
    }
}

/// A 1×3 table: left half, gutter, right half.
fn sheet_table(geometry: &SheetGeometry) -> Table {
    let mut sheet = Table::new(1, 3);
    sheet.autofit = false;
    let row = &mut sheet.rows[0];
    row.set_exact_height(geometry.row_height);
    row.cells[0].width = Some(geometry.left_width);
    row.cells[1].width = Some(geometry.gutter_width);
    row.cells[1].borders_hidden = true;
    row.cells[2].width = Some(geometry.right_width);
    sheet
}

fn section(geometry: &SheetGeometry, sheet: Table) -> Section {
    let mut body = Container::new();
    body.blocks.push(Block::Table(sheet));
    Section {
        orientation: Orientation::Landscape,
        page_width: geometry.page_width,
        page_height: geometry.page_height,
        margins: geometry.margins,
        body,
    }
}

/// The psalm's bold response and its verses.
fn psalm_parts(index: usize, reading: &Reading) -> Result<(String, String), BuildError> {
    match &reading.text {
        ReadingText::Parts(parts) if parts.len() >= 2 => Ok((
            strip_newlines(&parts[0]),
            strip_newlines(&parts[1..].join("<br>")),
        )),
        _ => Err(BuildError::InvalidReading {
            index,
            kind: reading.kind,
            reason: "psalm text needs a response followed by verses".to_string(),
        }),
    }
}

fn strip_newlines(text: &str) -> String {
    text.replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulletin::model::InfoBlock;
    use crate::document::{HeightRule, Merge, outline};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn options_with_logo() -> (TempDir, BuildOptions) {
        let dir = TempDir::new().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"png").unwrap();
        (dir, BuildOptions::new(logo))
    }

    fn reading(kind: ReadingKind, text: ReadingText) -> Reading {
        Reading {
            kind,
            alt: false,
            left: true,
            include: true,
            sameline: false,
            reference: "Ref 1:1".into(),
            title: None,
            text,
            size: 10.0,
            margin: 6.0,
        }
    }

    fn reading_options() -> ReadingOptions {
        ReadingOptions {
            top_margin: 10.0,
            left_margin: 9.0,
            heading_spacing: 5.0,
            heading_size: 11.0,
            copyright_size: 9.0,
            copyright_spacing: 20.0,
            copyright_page: 1,
            dpa_page: 1,
        }
    }

    fn front_page() -> FrontPage {
        FrontPage {
            top_margin: 10.0,
            left_margin: 10.0,
            latest_info: vec![
                InfoBlock(1, 2.0, "<b>Fete</b>".into()),
                InfoBlock(0, 1.0, "Choir".into()),
            ],
            latest_info_size: 10.0,
            title: "Sunday\nBulletin".into(),
            title_size: 24.0,
            church_title: "St Mary".into(),
            church_title_size: 16.0,
            church_info: "High Street".into(),
            church_info_size: 9.0,
            mass_info: vec!["Sat 6pm".into(), "Sun 9am".into(), "Sun 11am".into()],
            mass_info_size: 10.0,
        }
    }

    fn sheet_cell(section: &Section, col: usize) -> &Container {
        match &section.body.blocks[0] {
            Block::Table(t) => t.cell(0, col).unwrap(),
            Block::Paragraph(_) => panic!("expected sheet table"),
        }
    }

    fn nested_table(cell: &Container) -> &Table {
        cell.tables().next().expect("nested table")
    }

    #[test]
    fn missing_logo_is_reported() {
        let data = BulletinData {
            front: front_page(),
            back: vec![],
            readings: ReadingsPage {
                readings: vec![],
                options: reading_options(),
            },
        };
        let options = BuildOptions::new("/no/such/logo.png");
        let err = build(&data, &options).unwrap_err();
        assert!(matches!(err, BuildError::MissingAsset(p) if p.ends_with("logo.png")));
    }

    #[test]
    fn front_page_has_title_logo_and_mass_grid() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let section = builder.front_sheet(&front_page(), &[ContentBlock(10.0, 2.0, "Notices".into())]);

        let info = nested_table(sheet_cell(&section, 2));
        assert_eq!(info.rows.len(), 3);
        assert_eq!(info.rows[1].height_rule, HeightRule::Exactly);
        assert_eq!(info.rows[2].height_rule, HeightRule::Auto);

        let front = info.cell(0, 0).unwrap();
        let lines: Vec<String> = outline(front).lines().map(str::to_string).collect();
        assert_eq!(lines[0], "¶ [Center] \"SundayBulletin\"");
        assert_eq!(lines[1], "¶ [Center] <image 54mm>");
        assert_eq!(lines[2], "¶ [Center] \"St Mary\"");
        assert_eq!(lines[3], "¶ [Center] \"High Street\"");
        assert_eq!(lines[4], "table 2x2");

        let mass = nested_table(front);
        assert_eq!(mass.cell(0, 1).unwrap().merge, Some(Merge::Restart));
        assert_eq!(
            mass.cell(1, 0).unwrap().paragraphs().next().unwrap().text(),
            "Sun 9am"
        );
        assert_eq!(
            mass.cell(0, 1).unwrap().paragraphs().next().unwrap().text(),
            "Sun 11am"
        );

        let back = nested_table(sheet_cell(&section, 0));
        assert_eq!(outline(back.cell(0, 0).unwrap()), "¶ \"Notices\"\n");
    }

    #[test]
    fn front_page_row_takes_remaining_height() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let front = front_page();
        let section = builder.front_sheet(&front, &[]);
        let info = nested_table(sheet_cell(&section, 2));

        let geometry = SheetGeometry::front(10.0, 10.0);
        let boxes = info_row_height(10.0, 2.0) + info_row_height(10.0, 1.0);
        let margins = cell_margin(4.0 * INFO_CELL_MARGIN);
        assert_eq!(info.rows[0].height, Some(geometry.row_height - boxes - margins));
    }

    #[test]
    fn readings_get_headings_with_tab_and_notes() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let mut psalm = reading(
            ReadingKind::Psalm,
            ReadingText::Parts(vec!["Response".into(), "Verse one<br>Verse two".into()]),
        );
        psalm.sameline = true;
        let mut alt = reading(ReadingKind::Psalm, ReadingText::Parts(vec!["R".into(), "V".into()]));
        alt.alt = true;
        let mut gospel = reading(ReadingKind::Gospel, ReadingText::Single("Jesus said".into()));
        gospel.left = false;
        gospel.title = Some("Be opened".into());

        let page = ReadingsPage {
            readings: vec![psalm, alt, gospel],
            options: reading_options(),
        };
        let section = builder.readings_sheet(&page).unwrap();

        let left = outline(sheet_cell(&section, 0));
        assert_eq!(
            left,
            [
                "¶ \"RESPONSORIAL PSALM\"{b} \"  \" \"wording may differ if sung\"{i} \"\\t\" \"Ref 1:1\"",
                "¶ \"Response\"{b}",
                "¶ \"Verse one\"",
                "¶ \"Verse two\"",
                "¶ \"OR\"{b} \"\\t\" \"Ref 1:1\"",
                "¶ \"R\"{b}",
                "¶ \"V\"",
                "",
            ]
            .join("\n")
        );

        let right = outline(sheet_cell(&section, 2));
        let right: Vec<&str> = right.lines().collect();
        assert_eq!(right[0], "¶ \"GOSPEL\"{b} \"\\t\" \"Ref 1:1\"");
        assert_eq!(right[1], "¶ \"\u{201C}Be opened\u{201D}\"{b,i}");
        assert_eq!(right[2], "¶ \"Jesus said\"");
        assert!(right[3].starts_with("¶ \"The text of Sacred Scripture"));
        assert!(right[4].starts_with("¶ \"Please note the Data Protection Act"));
    }

    #[test]
    fn heading_tab_stop_is_left_half_width() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let page = ReadingsPage {
            readings: vec![reading(ReadingKind::Reading1, ReadingText::Single("x".into()))],
            options: reading_options(),
        };
        let section = builder.readings_sheet(&page).unwrap();
        let heading = sheet_cell(&section, 0).paragraphs().next().unwrap();
        let geometry = SheetGeometry::readings(10.0, 9.0);
        assert_eq!(heading.tab_stops[0].position, geometry.left_width);
        assert_eq!(heading.space_after, Length::pt(5.0));
    }

    #[test]
    fn acclamation_is_wrapped_in_alleluias() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let page = ReadingsPage {
            readings: vec![reading(
                ReadingKind::Acclamation,
                ReadingText::Single("Open our heart, O Lord.".into()),
            )],
            options: reading_options(),
        };
        let section = builder.readings_sheet(&page).unwrap();
        let left = outline(sheet_cell(&section, 0));
        let lines: Vec<&str> = left.lines().collect();
        assert_eq!(
            lines,
            vec![
                "¶ \"GOSPEL ACCLAMATION\"{b} \"\\t\" \"Ref 1:1\"",
                "¶ \"wording may differ if sung\"{i}",
                "¶ \"Alleluia, alleluia.\"{b}",
                "¶ \"Open our heart, O Lord.\"",
                "¶ \"Alleluia.\"{b}",
            ]
        );
    }

    #[test]
    fn excluded_readings_are_skipped() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let mut second = reading(ReadingKind::Reading2, ReadingText::Single("skip me".into()));
        second.include = false;
        let page = ReadingsPage {
            readings: vec![second],
            options: reading_options(),
        };
        let section = builder.readings_sheet(&page).unwrap();
        // the left page was never used, so it keeps its placeholder
        assert_eq!(outline(sheet_cell(&section, 0)), "¶\n");
    }

    #[test]
    fn psalm_without_verses_is_rejected() {
        let (_dir, options) = options_with_logo();
        let builder = BulletinBuilder { options: &options };
        let page = ReadingsPage {
            readings: vec![reading(ReadingKind::Psalm, ReadingText::Single("only".into()))],
            options: reading_options(),
        };
        let err = builder.readings_sheet(&page).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InvalidReading {
                index: 0,
                kind: ReadingKind::Psalm,
                ..
            }
        ));
    }
}
