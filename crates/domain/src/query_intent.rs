use std::fmt;
use std::sync::Arc;

/// What a DNS question name is asking the schedule for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryIntent {
    Now,
    Next,
    /// Carries the track's display label, e.g. `"Track 1"`.
    Track(Arc<str>),
    Unknown,
}

impl QueryIntent {
    /// Builds the intent for a numbered track (`track2.talks` → `"Track 2"`).
    pub fn numbered_track(number: u32) -> Self {
        QueryIntent::Track(track_label(number).into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryIntent::Now => "now",
            QueryIntent::Next => "next",
            QueryIntent::Track(_) => "track",
            QueryIntent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryIntent::Track(label) => write!(f, "track({})", label),
            other => f.write_str(other.name()),
        }
    }
}

pub fn track_label(number: u32) -> String {
    format!("Track {}", number)
}
