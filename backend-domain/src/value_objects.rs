// Domain value objects
pub mod attendance_state;
pub mod geo_point;
pub mod identifiers;
pub mod scan_action;

pub use attendance_state::*;
pub use geo_point::*;
pub use identifiers::*;
pub use scan_action::*;
