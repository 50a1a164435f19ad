use regex::Regex;
use std::sync::OnceLock;

/// Heading the prompt asks the model to put above the style description
pub const STYLE_MARKER: &str = "=== 노래 스타일 ===";
/// Heading the prompt asks the model to put above the lyrics
pub const LYRICS_MARKER: &str = "=== 가사 ===";

pub const STYLE_NOT_FOUND: &str = "No style information found.";

static STYLE_REGEX: OnceLock<Regex> = OnceLock::new();
static LYRICS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Style runs from its marker up to the lyrics marker or end of text
fn get_style_regex() -> &'static Regex {
    STYLE_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r"(?s){}\s*(.*?)(?:{}|$)",
            regex::escape(STYLE_MARKER),
            regex::escape(LYRICS_MARKER)
        ))
        .unwrap()
    })
}

fn get_lyrics_regex() -> &'static Regex {
    LYRICS_REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?s){}\s*(.*)$", regex::escape(LYRICS_MARKER))).unwrap()
    })
}

/// The two sections extracted from a model response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongSheet {
    pub style: String,
    pub lyrics: String,
}

impl SongSheet {
    /// Split a free-form response into style and lyrics.
    ///
    /// A missing style marker yields [`STYLE_NOT_FOUND`]; a missing lyrics
    /// marker yields the whole response, untouched, as the lyrics.
    pub fn parse(response: &str) -> Self {
        let style = get_style_regex()
            .captures(response)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| STYLE_NOT_FOUND.to_string());

        let lyrics = get_lyrics_regex()
            .captures(response)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| response.to_string());

        Self { style, lyrics }
    }

    /// Both sections under their markers, ready to paste into SUNO
    pub fn to_clipboard_text(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n{}",
            STYLE_MARKER, self.style, LYRICS_MARKER, self.lyrics
        )
    }

    pub fn text_for(&self, target: CopyTarget) -> String {
        match target {
            CopyTarget::All => self.to_clipboard_text(),
            CopyTarget::Style => self.style.clone(),
            CopyTarget::Lyrics => self.lyrics.clone(),
        }
    }
}

/// Which part of a [`SongSheet`] a copy action takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    All,
    Style,
    Lyrics,
}

impl CopyTarget {
    pub fn label(&self) -> &'static str {
        match self {
            CopyTarget::All => "all",
            CopyTarget::Style => "style",
            CopyTarget::Lyrics => "lyrics",
        }
    }
}
