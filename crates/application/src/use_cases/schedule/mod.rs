mod load_schedule;

pub use load_schedule::LoadScheduleUseCase;
