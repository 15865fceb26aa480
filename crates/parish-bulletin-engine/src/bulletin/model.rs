use serde::{Deserialize, Serialize};

/// The whole bulletin payload as posted by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletinData {
    pub front: FrontPage,
    /// Content blocks of the back page, top to bottom.
    pub back: Vec<ContentBlock>,
    pub readings: ReadingsPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FrontPage {
    /// Millimetres.
    pub top_margin: f64,
    /// Millimetres.
    pub left_margin: f64,
    pub latest_info: Vec<InfoBlock>,
    pub latest_info_size: f64,
    pub title: String,
    pub title_size: f64,
    pub church_title: String,
    pub church_title_size: f64,
    pub church_info: String,
    pub church_info_size: f64,
    #[serde(default)]
    pub mass_info: Vec<String>,
    pub mass_info_size: f64,
}

/// A "latest information" box under the front page: `[align, lines, text]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoBlock(pub u8, pub f64, pub String);

impl InfoBlock {
    /// Align code 1 centres the box's text.
    pub fn centered(&self) -> bool {
        self.0 == 1
    }

    /// Number of text lines the box is sized for.
    pub fn lines(&self) -> f64 {
        self.1
    }

    pub fn text(&self) -> &str {
        &self.2
    }
}

/// A back-page block: `[font size, vertical margin in mm, text]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock(pub f64, pub f64, pub String);

impl ContentBlock {
    pub fn size(&self) -> f64 {
        self.0
    }

    pub fn vertical_margin(&self) -> f64 {
        self.1
    }

    pub fn text(&self) -> &str {
        &self.2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingsPage {
    pub readings: Vec<Reading>,
    pub options: ReadingOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReadingOptions {
    /// Millimetres.
    pub top_margin: f64,
    /// Millimetres.
    pub left_margin: f64,
    /// Points below headings.
    pub heading_spacing: f64,
    pub heading_size: f64,
    pub copyright_size: f64,
    /// Points below the copyright notice.
    pub copyright_spacing: f64,
    /// 0 for the left page, anything else for the right.
    pub copyright_page: u8,
    /// 0 for the left page, anything else for the right.
    pub dpa_page: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Reading1,
    Psalm,
    Reading2,
    Acclamation,
    Gospel,
}

impl ReadingKind {
    pub fn heading(self) -> &'static str {
        match self {
            ReadingKind::Reading1 => "FIRST READING",
            ReadingKind::Psalm => "RESPONSORIAL PSALM",
            ReadingKind::Reading2 => "SECOND READING",
            ReadingKind::Acclamation => "GOSPEL ACCLAMATION",
            ReadingKind::Gospel => "GOSPEL",
        }
    }

    /// Psalm and acclamation texts may be sung to a different wording.
    pub fn may_be_sung(self) -> bool {
        matches!(self, ReadingKind::Psalm | ReadingKind::Acclamation)
    }
}

/// Reading text: a single marked-up string, or a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingText {
    Single(String),
    Parts(Vec<String>),
}

impl ReadingText {
    /// All parts joined with line breaks.
    pub fn joined(&self) -> String {
        match self {
            ReadingText::Single(text) => text.clone(),
            ReadingText::Parts(parts) => parts.join("<br>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "type")]
    pub kind: ReadingKind,
    /// An alternative to the preceding reading of the same kind.
    #[serde(default)]
    pub alt: bool,
    /// Placed on the left reading page rather than the right.
    pub left: bool,
    #[serde(default = "default_include")]
    pub include: bool,
    /// Puts the "may differ if sung" note on the heading line.
    #[serde(default)]
    pub sameline: bool,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub title: Option<String>,
    pub text: ReadingText,
    pub size: f64,
    /// Points below the reading.
    pub margin: f64,
}

fn default_include() -> bool {
    true
}

impl Reading {
    /// The title, if present and not empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
