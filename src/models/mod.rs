pub mod change;
pub mod station;

pub use change::{ChangeClass, ChangeRecord, DriftReport, SkipReason, SkippedStation};
pub use station::{Snapshot, StationRecord};
