use crate::errors::LoadError;
use chrono::{DateTime, Duration, FixedOffset};
use std::sync::Arc;

/// Slot length used when a dataset does not carry one.
pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Rendered in place of the speaker list when nobody is announced yet.
pub const UNANNOUNCED_SPEAKERS: &str = "TBA";

/// A single scheduled session.
///
/// The end of a talk is always derived from `start + duration` so the two can
/// never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Talk {
    pub id: Arc<str>,
    pub start: DateTime<FixedOffset>,
    pub duration: Duration,
    pub title: String,
    pub speakers: Vec<String>,
    pub track: Arc<str>,
}

impl Talk {
    pub fn new(
        id: impl Into<Arc<str>>,
        start: DateTime<FixedOffset>,
        duration: Duration,
        title: impl Into<String>,
        speakers: Vec<String>,
        track: impl Into<Arc<str>>,
    ) -> Result<Self, LoadError> {
        let id = id.into();

        if duration <= Duration::zero() || start.checked_add_signed(duration).is_none() {
            return Err(LoadError::InvalidDuration {
                talk: id.to_string(),
                value: format!("{} minutes", duration.num_minutes()),
            });
        }

        Ok(Self {
            id,
            start,
            duration,
            title: title.into(),
            speakers,
            track: track.into(),
        })
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.start + self.duration
    }

    /// Half-open: a talk is active from its start up to, but excluding, its end.
    pub fn is_active_at(&self, at: DateTime<FixedOffset>) -> bool {
        self.start <= at && at < self.end()
    }

    pub fn speakers_display(&self) -> String {
        if self.speakers.is_empty() {
            UNANNOUNCED_SPEAKERS.to_string()
        } else {
            self.speakers.join(", ")
        }
    }
}
