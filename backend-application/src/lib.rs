// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod ops;
pub mod queries;
pub mod recorder;
pub mod state;
pub mod validator;

pub use error::{AppError, ScanError};
pub use metrics::Metrics;
pub use ops::ScanGate;
pub use recorder::AttendanceRecorder;
pub use state::AppState;
pub use validator::{Eligibility, EligibilityValidator};
