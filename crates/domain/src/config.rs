mod errors;
mod logging;
mod response;
mod root;
mod schedule;
mod server;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use response::{ResponseConfig, DEFAULT_HELP_TEXT};
pub use root::{CliOverrides, Config};
pub use schedule::ScheduleConfig;
pub use server::ServerConfig;
