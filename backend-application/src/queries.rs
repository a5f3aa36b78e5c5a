pub mod attendance_queries;
pub mod event_queries;
