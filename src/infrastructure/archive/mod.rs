//! ZIP packaging of batch outputs.

mod bundle;

pub use bundle::{ArchiveBundle, ArchiveError};
