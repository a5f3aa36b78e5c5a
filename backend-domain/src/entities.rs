// Domain entities
// Documents kept in the record store plus the values passed between layers

pub mod evaluation;
pub mod event_record;
pub mod runtime_config;
pub mod scan;
pub mod user_record;

pub use evaluation::*;
pub use event_record::*;
pub use runtime_config::*;
pub use scan::*;
pub use user_record::*;
