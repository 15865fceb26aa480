/// Non-printing character that keeps an empty line from being treated as a
/// blank paragraph (U+2800 BRAILLE PATTERN BLANK).
pub const FILLER: char = '\u{2800}';

const BREAK: &str = "<br>";
const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Structural rewrites applied before tokenizing:
///
/// 1. a break directly before `<ul>` or directly after `</ul>` is dropped;
/// 2. a [`FILLER`] goes between every two adjacent breaks.
pub fn preprocess(raw: &str) -> String {
    let absorbed = raw
        .replace(&format!("{BREAK}{LIST_OPEN}"), LIST_OPEN)
        .replace(&format!("{LIST_CLOSE}{BREAK}"), LIST_CLOSE);
    separate_breaks(&absorbed)
}

/// Inserts [`FILLER`] between adjacent `<br>` markers, including every pair
/// inside a longer run of breaks.
pub fn separate_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(BREAK) {
        let end = pos + BREAK.len();
        out.push_str(&rest[..end]);
        rest = &rest[end..];
        if rest.starts_with(BREAK) {
            out.push(FILLER);
        }
    }
    out.push_str(rest);
    out
}
