use schedule_dns_application::use_cases::LoadScheduleUseCase;
use schedule_dns_domain::{Config, ScheduleStore};
use schedule_dns_infrastructure::schedule::JsonFileScheduleSource;
use std::sync::Arc;
use tracing::error;

pub fn load_schedule(config: &Config) -> anyhow::Result<Arc<ScheduleStore>> {
    let source = Arc::new(JsonFileScheduleSource::from_config(&config.schedule));

    let store = LoadScheduleUseCase::new(source).execute().map_err(|e| {
        error!(path = %config.schedule.path, error = %e, "Failed to load schedule");
        anyhow::anyhow!(e)
    })?;

    Ok(Arc::new(store))
}
