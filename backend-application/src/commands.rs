pub mod event_commands;
pub mod feedback_commands;
pub mod interest_commands;
pub mod scan_commands;
