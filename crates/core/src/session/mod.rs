//! Session state, the build guard and observer notifications

pub mod events;
pub mod state;

pub use events::{SessionEvent, SessionEvents};
pub use state::{BuildGuard, BuildPermit, SessionState};
