//! Schedule DNS Domain Layer
pub mod config;
pub mod dataset;
pub mod errors;
pub mod packet;
pub mod query_intent;
pub mod schedule_store;
pub mod talk;

pub use config::{CliOverrides, Config, ConfigError};
pub use dataset::ScheduleDataset;
pub use errors::{DomainError, LoadError};
pub use packet::{CapturedPacket, LinkAddress};
pub use query_intent::QueryIntent;
pub use schedule_store::ScheduleStore;
pub use talk::{Talk, DEFAULT_SLOT_MINUTES};
