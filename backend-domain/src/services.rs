// Pure domain services

pub mod geofence;
pub mod scan_decoder;

pub use geofence::*;
pub use scan_decoder::*;
