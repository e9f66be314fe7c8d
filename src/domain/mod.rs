//! Domain logic - release types and version arithmetic, independent of git

pub mod release_type;
pub mod version;

pub use release_type::ReleaseType;
pub use version::{baseline_after, increment};
