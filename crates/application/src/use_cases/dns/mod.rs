mod answer_schedule_query;

pub use answer_schedule_query::{AnswerScheduleQueryUseCase, ScheduleAnswer};
