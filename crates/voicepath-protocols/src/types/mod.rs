//! Core data model types.

mod path;
mod profile;
mod recorded;
mod step;

pub use path::Path;
pub use profile::UserProfile;
pub use recorded::RecordedStep;
pub use step::{ActionKind, Step, SENTINEL_SELECTOR};
