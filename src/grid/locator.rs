use serde::{Deserialize, Serialize};

use crate::grid::geometry::SurveyGrid;

/// Grid identity inferred from an observed coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationFix {
    pub quadrat: char,
    pub station: usize,
}

impl StationFix {
    /// Composite key in the same "Quadrat/Station" form the snapshots use.
    pub fn key(&self) -> String {
        format!("{}/{}", self.quadrat, self.station)
    }
}

impl SurveyGrid {
    /// Reverse geocode an observed point into the quadrat and station it
    /// falls in, or `None` if it lies outside the survey grid.
    ///
    /// Linear scan over quadrat bounds, first match wins; a point exactly on
    /// a shared edge resolves to whichever quadrat enumerates first, an
    /// accepted ambiguity. The fractional position within the quadrat is
    /// bucketed into the sub-grid and the serpentine numbering applied.
    pub fn locate(&self, lat: f64, lon: f64) -> Option<StationFix> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        let bounds = self.bounds().iter().find(|b| b.contains(lat, lon))?;
        let n = self.sub_grid_size();

        let lat_pos = (bounds.north - lat) / (bounds.north - bounds.south);
        let lon_pos = (lon - bounds.west) / (bounds.east - bounds.west);
        let row = ((lat_pos * n as f64).floor() as i64).clamp(0, n as i64 - 1) as usize;
        let col = ((lon_pos * n as f64).floor() as i64).clamp(0, n as i64 - 1) as usize;

        Some(StationFix {
            quadrat: bounds.quadrat,
            station: self.station_number(row, col),
        })
    }
}
