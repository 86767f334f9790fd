use chrono::{DateTime, FixedOffset};
use schedule_dns_domain::{QueryIntent, ScheduleStore, Talk};
use std::sync::Arc;
use tracing::warn;

/// Answers a [`QueryIntent`] against the shared, read-only schedule.
#[derive(Debug, Clone)]
pub struct ScheduleQueryEngine {
    store: Arc<ScheduleStore>,
}

impl ScheduleQueryEngine {
    pub fn new(store: Arc<ScheduleStore>) -> Self {
        Self { store }
    }

    pub fn resolve(&self, intent: &QueryIntent, at: DateTime<FixedOffset>) -> Vec<&Talk> {
        match intent {
            QueryIntent::Now => self.store.talks_active_at(at),
            QueryIntent::Next => self.next_talks(at),
            QueryIntent::Track(track) => self.store.talks_by_track(track),
            QueryIntent::Unknown => Vec::new(),
        }
    }

    fn next_talks(&self, at: DateTime<FixedOffset>) -> Vec<&Talk> {
        let next = self.store.talks_starting_after(at);

        if let Some(start) = self.store.next_start_after(at) {
            let sharing_start = self.store.talks_starting_at(start).len();
            if sharing_start > next.len() {
                warn!(
                    start = %start,
                    talks = sharing_start,
                    tracks = next.len(),
                    "Several talks share a track and start time; only the last is announced"
                );
            }
        }

        next.into_values().collect()
    }
}
