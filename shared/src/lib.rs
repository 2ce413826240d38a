pub mod config;
pub mod detection;
pub mod route;
pub mod session;

pub use config::{ClientConfig, ConfigError, DetectionEndpoint};
pub use detection::{DetectionError, DetectionResponse, DetectionResult, Threshold};
pub use route::Route;
pub use session::{DetectionSession, PendingSubmission, SessionError, SessionState, SubmissionTicket};
