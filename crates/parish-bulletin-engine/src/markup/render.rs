use crate::document::{
    Alignment, Length, ParagraphId, ParagraphStyle, RichTextHost, Run, RunStyle, TabStop,
};

use super::{
    context::StyleContext,
    lexer::{MarkupToken, tokenize},
    preprocess::preprocess,
    tags::{Tag, TagToken},
};

/// Font family used when none is configured.
pub const DEFAULT_FONT_FAMILY: &str = "Calibri";

/// How far a bullet glyph hangs left of its item text, in points.
pub const BULLET_HANG_PT: f64 = 16.0;
/// Body indent of a bullet item as a multiple of [`BULLET_HANG_PT`].
pub const BULLET_INDENT_RATIO: f64 = 1.5;

/// Formatting applied to one block of marked-up text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub font_family: String,
    /// Points.
    pub font_size: f64,
    /// Multiple of single line height.
    pub line_spacing: f64,
    /// Points above the first paragraph.
    pub space_before: f64,
    /// Points below the last paragraph.
    pub space_after: f64,
    pub centered: bool,
    /// Position of a right-aligned tab stop on the first paragraph. Enables `<_tab>`.
    pub tab_stop: Option<Length>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 11.0,
            line_spacing: 1.0,
            space_before: 0.0,
            space_after: 0.0,
            centered: false,
            tab_stop: None,
        }
    }
}

impl RenderOptions {
    pub fn new(font_family: impl Into<String>, font_size: f64, line_spacing: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            line_spacing,
            ..Self::default()
        }
    }

    pub fn space_before(mut self, points: f64) -> Self {
        self.space_before = points;
        self
    }

    pub fn space_after(mut self, points: f64) -> Self {
        self.space_after = points;
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn tab_stop(mut self, position: Length) -> Self {
        self.tab_stop = Some(position);
        self
    }

    fn alignment(&self) -> Alignment {
        if self.centered {
            Alignment::Center
        } else {
            Alignment::Inherit
        }
    }
}

/// Renders marked-up `raw` text into `host` as paragraphs of styled runs.
///
/// Malformed markup never fails: unknown and unterminated tags come out as
/// literal text. Once the text is written, blank paragraphs are removed from
/// the whole host, always leaving at least one paragraph.
pub fn render<H: RichTextHost + ?Sized>(host: &mut H, raw: &str, options: &RenderOptions) {
    let text = preprocess(raw);
    let mut renderer = Renderer::start(host, options);
    for token in tokenize(&text) {
        renderer.feed(token);
    }
    renderer.finish();
}

/// Removes paragraphs with blank text and no image, walking in order and
/// never removing the host's last remaining paragraph. Returns how many
/// paragraphs were removed.
pub fn remove_blank_paragraphs<H: RichTextHost + ?Sized>(host: &mut H) -> usize {
    let mut removed = 0;
    let mut index = 0;
    while index < host.paragraph_count() {
        let id = ParagraphId(index);
        let blank = host.paragraph_text(id).trim().is_empty() && !host.paragraph_has_image(id);
        if blank && host.paragraph_count() > 1 {
            host.remove_paragraph(id);
            removed += 1;
        } else {
            index += 1;
        }
    }
    removed
}

/// State for one render call: the open styles and the paragraph runs go to.
struct Renderer<'a, H: RichTextHost + ?Sized> {
    host: &'a mut H,
    options: &'a RenderOptions,
    context: StyleContext,
    paragraph: ParagraphId,
    paragraphs: usize,
}

impl<'a, H: RichTextHost + ?Sized> Renderer<'a, H> {
    /// Opens the first paragraph, which alone gets the caller's space-before
    /// and the tab stop.
    fn start(host: &'a mut H, options: &'a RenderOptions) -> Self {
        let paragraph = host.add_paragraph(ParagraphStyle::Normal);
        host.set_alignment(paragraph, options.alignment());
        if let Some(position) = options.tab_stop {
            host.add_tab_stop(paragraph, TabStop::right(position));
        }
        host.set_line_spacing(paragraph, options.line_spacing);
        host.set_space_before(paragraph, Length::pt(options.space_before));
        host.set_space_after(paragraph, Length::ZERO);

        Self {
            host,
            options,
            context: StyleContext::new(),
            paragraph,
            paragraphs: 1,
        }
    }

    fn feed(&mut self, token: MarkupToken) {
        match token {
            MarkupToken::Text(text) => self.push_text(text, self.context.run_style()),
            MarkupToken::Tag(TagToken::Unrecognized(name)) => {
                let source = TagToken::Unrecognized(name).source();
                self.push_text(source, self.context.run_style());
            }
            MarkupToken::Tag(tag) if tag.is_list_boundary() || self.context.in_list() => {
                self.list_tag(tag)
            }
            MarkupToken::Tag(TagToken::Close(tag)) => {
                if !self.context.close(tag) {
                    log::trace!("ignoring </{}> with no open <{}>", tag.name(), tag.name());
                }
            }
            MarkupToken::Tag(TagToken::Open(Tag::Break)) => {
                self.new_paragraph(ParagraphStyle::Normal);
            }
            MarkupToken::Tag(TagToken::Open(Tag::Tab)) => {
                if self.options.tab_stop.is_some() {
                    self.push_text("\t".to_string(), RunStyle::default());
                }
            }
            MarkupToken::Tag(TagToken::Open(tag)) => self.context.open(tag),
        }
    }

    /// Tags seen at a list boundary or while a list is innermost. Only the
    /// list boundaries and breaks have an effect here.
    fn list_tag(&mut self, tag: TagToken) {
        match tag {
            TagToken::Close(Tag::List) => {
                // the list is innermost whenever one is open; a stray close
                // drops whatever style was opened last
                self.context.pop();
                self.new_paragraph(ParagraphStyle::Normal);
            }
            TagToken::Open(Tag::List) => {
                self.context.open(Tag::List);
                self.new_paragraph(ParagraphStyle::ListBullet);
            }
            TagToken::Open(Tag::Break) => {
                self.new_paragraph(ParagraphStyle::ListBullet);
            }
            other => log::trace!("{} has no effect inside a list", other.source()),
        }
    }

    fn new_paragraph(&mut self, style: ParagraphStyle) {
        let id = self.host.add_paragraph(style);
        self.host.set_alignment(id, self.options.alignment());
        self.host.set_line_spacing(id, self.options.line_spacing);
        self.host.set_space_before(id, Length::ZERO);
        self.host.set_space_after(id, Length::ZERO);
        if style == ParagraphStyle::ListBullet {
            self.host.set_indent(
                id,
                Length::pt(BULLET_HANG_PT * BULLET_INDENT_RATIO),
                -Length::pt(BULLET_HANG_PT),
            );
        }
        self.paragraph = id;
        self.paragraphs += 1;
    }

    fn push_text(&mut self, text: String, style: RunStyle) {
        if text.is_empty() {
            return;
        }
        let run = Run::new(
            text,
            self.options.font_family.as_str(),
            self.options.font_size,
            style,
        );
        self.host.push_run(self.paragraph, run);
    }

    /// Gives the last paragraph the caller's space-after, then drops blanks.
    fn finish(self) {
        self.host
            .set_space_after(self.paragraph, Length::pt(self.options.space_after));
        let removed = remove_blank_paragraphs(self.host);
        log::debug!(
            "rendered {} paragraph(s), removed {removed} blank",
            self.paragraphs
        );
    }
}
