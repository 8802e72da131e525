//! Error types shared across the collaborator boundary.

mod browser;
mod transport;

pub use browser::*;
pub use transport::*;
