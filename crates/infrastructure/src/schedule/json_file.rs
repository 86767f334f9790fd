use chrono::Duration;
use schedule_dns_application::ports::ScheduleSource;
use schedule_dns_domain::config::ScheduleConfig;
use schedule_dns_domain::{LoadError, ScheduleDataset, Talk};
use std::path::PathBuf;
use tracing::debug;

/// Reads a schedule dataset (catalog or conference export) from a JSON file.
pub struct JsonFileScheduleSource {
    path: PathBuf,
    default_slot: Duration,
}

impl JsonFileScheduleSource {
    pub fn new(path: impl Into<PathBuf>, default_slot: Duration) -> Self {
        Self {
            path: path.into(),
            default_slot,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(&config.path, config.default_slot())
    }
}

impl ScheduleSource for JsonFileScheduleSource {
    fn load_talks(&self) -> Result<Vec<Talk>, LoadError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| LoadError::Read {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let dataset = ScheduleDataset::from_json(&contents)?;
        debug!(
            path = %self.path.display(),
            format = dataset.format_name(),
            bytes = contents.len(),
            "Schedule dataset parsed"
        );

        dataset.into_talks(self.default_slot)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
