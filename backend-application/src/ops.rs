pub mod scan_gate;

pub use scan_gate::*;
