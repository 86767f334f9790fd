#![allow(dead_code)]
use chrono::{DateTime, Duration, FixedOffset};
use schedule_dns_domain::Talk;

pub fn ts(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

pub struct TalkBuilder {
    id: String,
    start: DateTime<FixedOffset>,
    duration: Duration,
    title: String,
    speakers: Vec<String>,
    track: String,
}

impl TalkBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            start: ts("2025-09-13T10:10:00+05:30"),
            duration: Duration::minutes(30),
            title: "Intro".to_string(),
            speakers: vec![],
            track: "Track 1".to_string(),
        }
    }

    pub fn start(mut self, start: &str) -> Self {
        self.start = ts(start);
        self
    }

    pub fn minutes(mut self, minutes: i64) -> Self {
        self.duration = Duration::minutes(minutes);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn speaker(mut self, name: &str) -> Self {
        self.speakers.push(name.to_string());
        self
    }

    pub fn track(mut self, track: &str) -> Self {
        self.track = track.to_string();
        self
    }

    pub fn build(self) -> Talk {
        Talk::new(
            self.id,
            self.start,
            self.duration,
            self.title,
            self.speakers,
            self.track,
        )
        .unwrap()
    }
}
