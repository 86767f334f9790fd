#![allow(dead_code)]
mod builders;
mod mocks;

pub use builders::{ts, TalkBuilder};
pub use mocks::{MockScheduleSource, ScriptedTransport};
