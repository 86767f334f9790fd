use crate::services::{chunk, QueryRouter, ScheduleQueryEngine, TxtFormatter};
use chrono::{DateTime, FixedOffset};
use schedule_dns_domain::{QueryIntent, ScheduleStore};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// TXT payload for one question: each record is the chunk list of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleAnswer {
    pub intent: QueryIntent,
    pub talks: usize,
    pub records: Vec<Vec<String>>,
}

impl ScheduleAnswer {
    /// Lines reassembled from their chunks, mostly for logs and tests.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(|chunks| chunks.concat()).collect()
    }
}

pub struct AnswerScheduleQueryUseCase {
    router: QueryRouter,
    engine: ScheduleQueryEngine,
    formatter: TxtFormatter,
}

impl AnswerScheduleQueryUseCase {
    pub fn new(store: Arc<ScheduleStore>, formatter: TxtFormatter) -> Self {
        Self {
            router: QueryRouter::new(),
            engine: ScheduleQueryEngine::new(store),
            formatter,
        }
    }

    /// Routes `query_name`, looks the schedule up as of `at` and renders the
    /// TXT records. Unknown names and empty results yield the help line.
    pub fn execute(&self, query_name: &str, at: DateTime<FixedOffset>) -> ScheduleAnswer {
        let started = Instant::now();

        let intent = self.router.classify(query_name);
        let talks = self.engine.resolve(&intent, at);
        let records = self
            .formatter
            .format(&talks)
            .iter()
            .map(|line| chunk(line))
            .collect();

        debug!(
            query = %query_name,
            intent = %intent,
            talks = talks.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Schedule query resolved"
        );

        ScheduleAnswer {
            intent,
            talks: talks.len(),
            records,
        }
    }
}
