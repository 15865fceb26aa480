use super::tags::{Tag, TagToken};

/// One unit of the markup stream.
///
/// Each `Text` token becomes exactly one run, so adjacent literal text is
/// coalesced into a single token before it is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    Text(String),
    Tag(TagToken),
}

#[derive(Debug)]
enum State {
    InText,
    /// Inside `<...`; holds the name read so far and where the `<` was.
    InTag { name: String, start: usize },
}

/// Splits marked-up text into tokens in a single left-to-right pass.
///
/// - A `<` inside an unfinished tag turns the unfinished tag back into
///   literal text and starts a new tag.
/// - `>` outside a tag is literal text.
/// - A tag still open at end of input is emitted as literal text.
pub fn tokenize(input: &str) -> Vec<MarkupToken> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut state = State::InText;

    for (i, c) in input.char_indices() {
        state = match (state, c) {
            (State::InText, Tag::OPEN) => State::InTag {
                name: String::new(),
                start: i,
            },
            (State::InTag { name, start }, Tag::OPEN) => {
                log::debug!("unterminated tag at byte {start} kept as text");
                text.push(Tag::OPEN);
                text.push_str(&name);
                State::InTag {
                    name: String::new(),
                    start: i,
                }
            }
            (State::InTag { name, .. }, Tag::CLOSE) => {
                flush_text(&mut out, &mut text);
                out.push(MarkupToken::Tag(TagToken::parse(&name)));
                State::InText
            }
            (State::InTag { mut name, start }, c) => {
                name.push(c);
                State::InTag { name, start }
            }
            (State::InText, c) => {
                text.push(c);
                State::InText
            }
        };
    }

    flush_text(&mut out, &mut text);
    if let State::InTag { name, start } = state {
        log::warn!("tag opened at byte {start} never closed");
        out.push(MarkupToken::Text(format!("{}{name}", Tag::OPEN)));
    }
    out
}

fn flush_text(out: &mut Vec<MarkupToken>, text: &mut String) {
    if !text.is_empty() {
        out.push(MarkupToken::Text(std::mem::take(text)));
    }
}
