use std::fmt::Write;

use super::model::{Alignment, Block, Container, Document, Inline, Paragraph, ParagraphStyle, RunStyle};

/// Renders a compact, line-per-paragraph text view of a container.
///
/// ```text
/// ¶ [Center] "Hi"{b} " there"
/// • "One"
/// table 2x1
///   cell 0,0
///     ¶ "nested"
/// ```
pub fn outline(container: &Container) -> String {
    let mut out = String::new();
    write_container(&mut out, container, 0);
    out
}

/// Outline of every section, each introduced by its index.
pub fn document_outline(doc: &Document) -> String {
    let mut out = String::new();
    for (i, section) in doc.sections.iter().enumerate() {
        let _ = writeln!(out, "section {i}");
        write_container(&mut out, &section.body, 1);
    }
    out
}

pub fn paragraph_line(p: &Paragraph) -> String {
    let mut line = String::new();
    line.push(match p.style {
        ParagraphStyle::Normal => '¶',
        ParagraphStyle::ListBullet => '•',
    });
    if p.alignment != Alignment::Inherit {
        let _ = write!(line, " [{:?}]", p.alignment);
    }
    for inline in &p.content {
        match inline {
            Inline::Run(run) => {
                let _ = write!(line, " {:?}", run.text);
                let flags = style_flags(run.style);
                if !flags.is_empty() {
                    let _ = write!(line, "{{{flags}}}");
                }
            }
            Inline::Image(image) => {
                let _ = write!(line, " <image {}mm>", image.width.as_mm());
            }
        }
    }
    line
}

/// The tag names of a run's active styles, comma separated.
pub fn style_flags(style: RunStyle) -> String {
    [
        (style.bold, "b"),
        (style.italic, "i"),
        (style.underline, "u"),
        (style.superscript, "s"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name)
    .collect::<Vec<_>>()
    .join(",")
}

fn write_container(out: &mut String, container: &Container, depth: usize) {
    let indent = "  ".repeat(depth);
    for block in &container.blocks {
        match block {
            Block::Paragraph(p) => {
                let _ = writeln!(out, "{indent}{}", paragraph_line(p));
            }
            Block::Table(table) => {
                let _ = writeln!(out, "{indent}table {}x{}", table.rows.len(), table.columns());
                for (r, row) in table.rows.iter().enumerate() {
                    for (c, cell) in row.cells.iter().enumerate() {
                        let _ = writeln!(out, "{indent}  cell {r},{c}");
                        write_container(out, cell, depth + 2);
                    }
                }
            }
        }
    }
}
