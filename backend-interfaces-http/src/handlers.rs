pub mod event_handlers;
pub mod feedback_handlers;
pub mod ops_handlers;
pub mod scan_handlers;

pub use event_handlers::*;
pub use feedback_handlers::*;
pub use ops_handlers::*;
pub use scan_handlers::*;
