pub mod drift_detector;

pub use drift_detector::DriftDetector;
