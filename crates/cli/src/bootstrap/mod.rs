mod logging;
mod schedule;

pub use logging::init_logging;
pub use schedule::load_schedule;

use schedule_dns_domain::{CliOverrides, Config};
use tracing::{info, warn};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logs which file the configuration came from, once logging is up.
pub fn report_config_source(path: Option<&str>) {
    match path.map(str::to_string).or_else(Config::get_config_path) {
        Some(path) => info!(path = %path, "Configuration loaded"),
        None => warn!("No configuration file found, using defaults"),
    }
}
