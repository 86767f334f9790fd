mod query_router;
mod schedule_query_engine;
mod txt_formatter;

pub use query_router::QueryRouter;
pub use schedule_query_engine::ScheduleQueryEngine;
pub use txt_formatter::{chunk, format_line, TxtFormatter, MAX_CHARACTER_STRING_LEN};
