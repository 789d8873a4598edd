pub mod geometry;
pub mod locator;

pub use geometry::{GridBounds, StationCoordinate, SurveyGrid};
pub use locator::StationFix;
