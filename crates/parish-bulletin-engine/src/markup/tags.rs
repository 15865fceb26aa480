/// The fixed tag vocabulary. Names are case-sensitive and take no attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Bold,
    Italic,
    Underline,
    Superscript,
    /// Bullet-list block.
    List,
    /// Forced line break. Has no close form.
    Break,
    /// Literal tab, honoured only when a tab stop is configured. Has no close form.
    Tab,
}

impl Tag {
    /// Opens a tag.
    pub const OPEN: char = '<';
    /// Ends a tag.
    pub const CLOSE: char = '>';
    /// Marks a close tag when it leads the tag name.
    pub const CLOSE_MARK: char = '/';

    pub const ALL: [Tag; 7] = [
        Tag::Bold,
        Tag::Italic,
        Tag::Underline,
        Tag::Superscript,
        Tag::List,
        Tag::Break,
        Tag::Tab,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Underline => "u",
            Tag::Superscript => "s",
            Tag::List => "ul",
            Tag::Break => "br",
            Tag::Tab => "_tab",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether `</name>` is part of the vocabulary.
    pub const fn has_close_form(self) -> bool {
        !matches!(self, Tag::Break | Tag::Tab)
    }

    /// Whether the tag styles the runs emitted while it is open.
    pub const fn is_run_style(self) -> bool {
        matches!(
            self,
            Tag::Bold | Tag::Italic | Tag::Underline | Tag::Superscript
        )
    }
}

/// A complete `<...>` tag as read by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagToken {
    Open(Tag),
    Close(Tag),
    /// Any name outside the vocabulary, kept verbatim (without the brackets).
    Unrecognized(String),
}

impl TagToken {
    /// Classifies the text between `<` and `>`.
    pub fn parse(name: &str) -> Self {
        let recognized = match name.strip_prefix(Tag::CLOSE_MARK) {
            Some(bare) => Tag::from_name(bare)
                .filter(|t| t.has_close_form())
                .map(TagToken::Close),
            None => Tag::from_name(name).map(TagToken::Open),
        };
        recognized.unwrap_or_else(|| TagToken::Unrecognized(name.to_string()))
    }

    /// `<ul>` or `</ul>`.
    pub fn is_list_boundary(&self) -> bool {
        matches!(self, TagToken::Open(Tag::List) | TagToken::Close(Tag::List))
    }

    /// The source text of the tag, brackets included.
    pub fn source(&self) -> String {
        match self {
            TagToken::Open(tag) => format!("{}{}{}", Tag::OPEN, tag.name(), Tag::CLOSE),
            TagToken::Close(tag) => format!(
                "{}{}{}{}",
                Tag::OPEN,
                Tag::CLOSE_MARK,
                tag.name(),
                Tag::CLOSE
            ),
            TagToken::Unrecognized(name) => format!("{}{name}{}", Tag::OPEN, Tag::CLOSE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("b", TagToken::Open(Tag::Bold))]
    #[case("i", TagToken::Open(Tag::Italic))]
    #[case("u", TagToken::Open(Tag::Underline))]
    #[case("s", TagToken::Open(Tag::Superscript))]
    #[case("ul", TagToken::Open(Tag::List))]
    #[case("br", TagToken::Open(Tag::Break))]
    #[case("_tab", TagToken::Open(Tag::Tab))]
    #[case("/b", TagToken::Close(Tag::Bold))]
    #[case("/i", TagToken::Close(Tag::Italic))]
    #[case("/u", TagToken::Close(Tag::Underline))]
    #[case("/s", TagToken::Close(Tag::Superscript))]
    #[case("/ul", TagToken::Close(Tag::List))]
    fn vocabulary(#[case] name: &str, #[case] expected: TagToken) {
        assert_eq!(TagToken::parse(name), expected);
    }

    #[rstest]
    #[case("/br")]
    #[case("/_tab")]
    #[case("B")]
    #[case("xyz")]
    #[case("b ")]
    #[case("")]
    #[case("/")]
    #[case("//b")]
    fn outside_vocabulary(#[case] name: &str) {
        assert_eq!(
            TagToken::parse(name),
            TagToken::Unrecognized(name.to_string())
        );
    }

    #[test]
    fn source_restores_brackets() {
        assert_eq!(TagToken::Open(Tag::Tab).source(), "<_tab>");
        assert_eq!(TagToken::Close(Tag::List).source(), "</ul>");
        assert_eq!(TagToken::Unrecognized("xyz".into()).source(), "<xyz>");
    }

    #[test]
    fn only_inline_styles_style_runs() {
        let styles: Vec<_> = Tag::ALL.into_iter().filter(|t| t.is_run_style()).collect();
        assert_eq!(
            styles,
            vec![Tag::Bold, Tag::Italic, Tag::Underline, Tag::Superscript]
        );
    }
}
