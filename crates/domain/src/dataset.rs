//! Schedule dataset ingestion.
//!
//! Two JSON shapes are understood:
//!
//! * a flat catalog keyed by talk id:
//!   `{ "<id>": { "start", "duration_minutes"?, "title", "speakers"?, "track" } }`
//! * the pretalx/frab conference export:
//!   `{ "schedule": { "conference": { "days": [ { "rooms": { "<room>": [event, ..] } } ] } } }`
//!
//! No fixed number of days, rooms or talks is assumed. For the conference
//! export the room key is used as the track label.

use crate::errors::LoadError;
use crate::talk::Talk;
use chrono::{DateTime, Duration, FixedOffset};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub start: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    pub title: Option<String>,
    #[serde(default)]
    pub speakers: Vec<String>,
    pub track: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceDocument {
    pub schedule: ConferenceSchedule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceSchedule {
    pub conference: Conference,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Conference {
    #[serde(default)]
    pub days: Vec<ConferenceDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceDay {
    #[serde(default)]
    pub rooms: BTreeMap<String, Vec<ConferenceEvent>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceEvent {
    pub guid: Option<String>,
    pub date: Option<String>,
    pub title: Option<String>,
    /// pretalx renders durations as `"HH:MM"`.
    pub duration: Option<String>,
    #[serde(default)]
    pub persons: Vec<ConferencePerson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConferencePerson {
    pub public_name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ScheduleDataset {
    Catalog(BTreeMap<String, CatalogEntry>),
    Conference(ConferenceDocument),
}

impl ScheduleDataset {
    /// Detects the document shape and resolves it into talks in one step.
    pub fn parse(json: &str, default_slot: Duration) -> Result<Vec<Talk>, LoadError> {
        Self::from_json(json)?.into_talks(default_slot)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| LoadError::Malformed(e.to_string()))?;

        let is_conference = value
            .as_object()
            .map(|root| root.contains_key("schedule"))
            .ok_or_else(|| LoadError::Malformed("top-level value is not an object".to_string()))?;

        if is_conference {
            serde_json::from_value(value)
                .map(ScheduleDataset::Conference)
                .map_err(|e| LoadError::Malformed(format!("conference export: {}", e)))
        } else {
            serde_json::from_value(value)
                .map(ScheduleDataset::Catalog)
                .map_err(|e| LoadError::Malformed(format!("talk catalog: {}", e)))
        }
    }

    pub fn format_name(&self) -> &'static str {
        match self {
            ScheduleDataset::Catalog(_) => "catalog",
            ScheduleDataset::Conference(_) => "conference",
        }
    }

    /// Resolves every entry into a [`Talk`], using `default_slot` where the
    /// dataset carries no duration.
    pub fn into_talks(self, default_slot: Duration) -> Result<Vec<Talk>, LoadError> {
        match self {
            ScheduleDataset::Catalog(entries) => entries
                .into_iter()
                .map(|(id, entry)| catalog_talk(id, entry, default_slot))
                .collect(),
            ScheduleDataset::Conference(document) => {
                let mut talks = Vec::new();
                for day in document.schedule.conference.days {
                    for (room, events) in day.rooms {
                        for event in events {
                            talks.push(conference_talk(&room, event, default_slot)?);
                        }
                    }
                }
                Ok(talks)
            }
        }
    }
}

fn catalog_talk(id: String, entry: CatalogEntry, default_slot: Duration) -> Result<Talk, LoadError> {
    let start = required(&id, "start", entry.start)?;
    let start = parse_timestamp(&id, &start)?;
    let title = required(&id, "title", entry.title)?;
    let track = required(&id, "track", entry.track)?;

    let duration = match entry.duration_minutes {
        Some(minutes) => Duration::try_minutes(minutes).ok_or_else(|| LoadError::InvalidDuration {
            talk: id.clone(),
            value: minutes.to_string(),
        })?,
        None => default_slot,
    };

    Talk::new(id, start, duration, title, entry.speakers, track)
}

fn conference_talk(
    room: &str,
    event: ConferenceEvent,
    default_slot: Duration,
) -> Result<Talk, LoadError> {
    let id = event.guid.ok_or_else(|| LoadError::MissingField {
        talk: format!("<{} without guid>", room),
        field: "guid",
    })?;
    let date = required(&id, "date", event.date)?;
    let start = parse_timestamp(&id, &date)?;
    let title = required(&id, "title", event.title)?;

    let duration = match event.duration.as_deref() {
        Some(value) => parse_clock_duration(&id, value)?,
        None => default_slot,
    };

    let speakers = event
        .persons
        .into_iter()
        .map(|person| required(&id, "persons.public_name", person.public_name))
        .collect::<Result<Vec<_>, _>>()?;

    Talk::new(id, start, duration, title, speakers, room)
}

fn required<T>(talk: &str, field: &'static str, value: Option<T>) -> Result<T, LoadError> {
    value.ok_or_else(|| LoadError::MissingField {
        talk: talk.to_string(),
        field,
    })
}

fn parse_timestamp(talk: &str, value: &str) -> Result<DateTime<FixedOffset>, LoadError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| LoadError::InvalidTimestamp {
        talk: talk.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_clock_duration(talk: &str, value: &str) -> Result<Duration, LoadError> {
    let invalid = || LoadError::InvalidDuration {
        talk: talk.to_string(),
        value: value.to_string(),
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    let hours: i64 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.trim().parse().map_err(|_| invalid())?;

    if !(0..60).contains(&minutes) || hours < 0 {
        return Err(invalid());
    }

    Duration::try_minutes(hours * 60 + minutes).ok_or_else(invalid)
}
