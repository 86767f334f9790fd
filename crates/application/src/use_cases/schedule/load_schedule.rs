use crate::ports::ScheduleSource;
use schedule_dns_domain::{LoadError, ScheduleStore};
use std::sync::Arc;
use tracing::info;

pub struct LoadScheduleUseCase {
    source: Arc<dyn ScheduleSource>,
}

impl LoadScheduleUseCase {
    pub fn new(source: Arc<dyn ScheduleSource>) -> Self {
        Self { source }
    }

    pub fn execute(&self) -> Result<ScheduleStore, LoadError> {
        let talks = self.source.load_talks()?;
        let store = ScheduleStore::load(talks)?;

        info!(
            source = %self.source.describe(),
            talks = store.len(),
            tracks = ?store.tracks(),
            "Schedule loaded"
        );

        Ok(store)
    }
}
