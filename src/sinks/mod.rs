//! Output destinations

pub mod locked;
pub mod shared;

pub use locked::LockedWriter;
pub use shared::{BoxedWriter, SharedSink};
