use schedule_dns_domain::config::DEFAULT_HELP_TEXT;
use schedule_dns_domain::Talk;
use std::sync::Arc;

/// Longest payload of a single DNS character-string.
pub const MAX_CHARACTER_STRING_LEN: usize = 255;

const CLOCK_FORMAT: &str = "%H:%M";

/// Renders talks as TXT lines:
/// `<track> | <HH:MM>–<HH:MM> | <title> — <speakers or TBA>`.
#[derive(Debug, Clone)]
pub struct TxtFormatter {
    help_text: Arc<str>,
}

impl TxtFormatter {
    pub fn new(help_text: impl Into<Arc<str>>) -> Self {
        Self {
            help_text: help_text.into(),
        }
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// One line per talk, or the help line alone when there is nothing to show.
    pub fn format(&self, talks: &[&Talk]) -> Vec<String> {
        if talks.is_empty() {
            return vec![self.help_text.to_string()];
        }
        talks.iter().map(|talk| format_line(talk)).collect()
    }
}

impl Default for TxtFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_HELP_TEXT)
    }
}

/// Times are rendered in the talk's own UTC offset.
pub fn format_line(talk: &Talk) -> String {
    format!(
        "{} | {}–{} | {} — {}",
        talk.track,
        talk.start.format(CLOCK_FORMAT),
        talk.end().format(CLOCK_FORMAT),
        talk.title,
        talk.speakers_display()
    )
}

/// Splits `line` into pieces of at most 255 UTF-8 bytes.
///
/// Each piece is decoded on its own; bytes of a code point cut by a piece
/// boundary are dropped on both sides instead of producing invalid text.
pub fn chunk(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    if bytes.len() <= MAX_CHARACTER_STRING_LEN {
        return vec![line.to_string()];
    }

    bytes
        .chunks(MAX_CHARACTER_STRING_LEN)
        .map(|piece| piece.utf8_chunks().map(|part| part.valid()).collect())
        .collect()
}
