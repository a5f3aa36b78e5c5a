pub mod clock;
pub mod reported_location;
pub mod session_identity;

pub use clock::*;
pub use reported_location::*;
pub use session_identity::*;
