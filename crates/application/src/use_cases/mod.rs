pub mod dns;
pub mod schedule;

pub use dns::{AnswerScheduleQueryUseCase, ScheduleAnswer};
pub use schedule::LoadScheduleUseCase;
