use crate::talk::DEFAULT_SLOT_MINUTES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_schedule_path")]
    pub path: String,

    /// Slot length applied to talks whose dataset entry has no duration.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

impl ScheduleConfig {
    pub fn default_slot(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.slot_minutes))
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: default_schedule_path(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

fn default_schedule_path() -> String {
    "schedule.json".to_string()
}

fn default_slot_minutes() -> u32 {
    DEFAULT_SLOT_MINUTES as u32
}
