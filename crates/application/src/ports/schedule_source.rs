use schedule_dns_domain::{LoadError, Talk};

/// Supplies the finished talk list the schedule store is built from.
pub trait ScheduleSource: Send + Sync {
    fn load_talks(&self) -> Result<Vec<Talk>, LoadError>;

    /// Human-readable origin for startup logs (a path, a URL, "fixture"...).
    fn describe(&self) -> String;
}
