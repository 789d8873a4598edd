use serde::{Deserialize, Serialize};

use crate::config::SurveyConfig;
use crate::error::{DriftError, Result};

/// Bounding box of one quadrat, decimal degrees. north > south, east > west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub quadrat: char,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GridBounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.south <= lat && lat <= self.north && self.west <= lon && lon <= self.east
    }
}

/// Expected center position of one station within a quadrat's sub-grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationCoordinate {
    pub quadrat: char,
    pub station: usize,
    pub row: usize,
    pub col: usize,
    pub latitude: f64,
    pub longitude: f64,
}

/// The survey grid: quadrat bounds derived by linear subdivision of the
/// rectangle between the NW and SE corners, with serpentine station numbering
/// inside each quadrat.
#[derive(Debug, Clone)]
pub struct SurveyGrid {
    bounds: Vec<GridBounds>,
    sub_grid_size: usize,
}

impl SurveyGrid {
    pub fn new(config: &SurveyConfig) -> Result<Self> {
        config.check()?;

        let rows = config.grid_rows;
        let cols = config.grid_cols;
        let row_height = (config.nw_lat - config.se_lat) / rows as f64;
        let col_width = (config.se_lon - config.nw_lon) / cols as f64;

        let mut bounds = Vec::with_capacity(rows * cols);
        for index in 0..rows * cols {
            let row = index / cols;
            let col = index % cols;
            let north = config.nw_lat - row as f64 * row_height;
            let west = config.nw_lon + col as f64 * col_width;
            bounds.push(GridBounds {
                quadrat: (b'A' + index as u8) as char,
                north,
                south: north - row_height,
                west,
                east: west + col_width,
            });
        }

        Ok(Self {
            bounds,
            sub_grid_size: config.sub_grid_size,
        })
    }

    pub fn bounds(&self) -> &[GridBounds] {
        &self.bounds
    }

    pub fn sub_grid_size(&self) -> usize {
        self.sub_grid_size
    }

    pub fn quadrat_bounds(&self, quadrat: char) -> Result<&GridBounds> {
        self.bounds
            .iter()
            .find(|b| b.quadrat == quadrat)
            .ok_or_else(|| DriftError::InvalidQuadrat(quadrat.to_string()))
    }

    /// Station number for a sub-grid cell: even rows number west to east,
    /// odd rows east to west.
    pub fn station_number(&self, row: usize, col: usize) -> usize {
        let n = self.sub_grid_size;
        if row % 2 == 0 {
            row * n + col + 1
        } else {
            row * n + (n - col)
        }
    }

    /// Sub-grid cell for a station number; inverse of `station_number`.
    pub fn station_cell(&self, station: usize) -> Option<(usize, usize)> {
        let n = self.sub_grid_size;
        if station < 1 || station > n * n {
            return None;
        }
        let row = (station - 1) / n;
        let col = if row % 2 == 0 {
            (station - 1) % n
        } else {
            n - (station - row * n)
        };
        Some((row, col))
    }

    /// Expected center coordinates of every station in one quadrat, in
    /// station-number order.
    pub fn station_coordinates(&self, quadrat: char) -> Result<Vec<StationCoordinate>> {
        let bounds = self.quadrat_bounds(quadrat)?;
        let n = self.sub_grid_size;
        let lat_step = (bounds.north - bounds.south) / n as f64;
        let lon_step = (bounds.east - bounds.west) / n as f64;

        let mut stations = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                stations.push(StationCoordinate {
                    quadrat,
                    station: self.station_number(row, col),
                    row,
                    col,
                    latitude: bounds.north - row as f64 * lat_step - lat_step / 2.0,
                    longitude: bounds.west + col as f64 * lon_step + lon_step / 2.0,
                });
            }
        }
        stations.sort_by_key(|s| s.station);
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::{
        SURVEY_NW_LAT, SURVEY_NW_LON, SURVEY_SE_LAT, SURVEY_SE_LON,
    };

    fn grid() -> SurveyGrid {
        SurveyGrid::new(&SurveyConfig::default()).unwrap()
    }

    #[test]
    fn test_quadrat_lettering_and_count() {
        let grid = grid();
        assert_eq!(grid.bounds().len(), 24);
        assert_eq!(grid.bounds()[0].quadrat, 'A');
        assert_eq!(grid.bounds()[23].quadrat, 'X');
    }

    #[test]
    fn test_first_quadrat_bounds() {
        let grid = grid();
        let a = grid.quadrat_bounds('A').unwrap();
        let row_height = (SURVEY_NW_LAT - SURVEY_SE_LAT) / 3.0;
        let col_width = (SURVEY_SE_LON - SURVEY_NW_LON) / 8.0;
        assert!((a.north - SURVEY_NW_LAT).abs() < 1e-12);
        assert!((a.south - (SURVEY_NW_LAT - row_height)).abs() < 1e-12);
        assert!((a.west - SURVEY_NW_LON).abs() < 1e-12);
        assert!((a.east - (SURVEY_NW_LON + col_width)).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_tile_survey_rectangle() {
        let grid = grid();
        let total: f64 = grid
            .bounds()
            .iter()
            .map(|b| (b.north - b.south) * (b.east - b.west))
            .sum();
        let expected = (SURVEY_NW_LAT - SURVEY_SE_LAT) * (SURVEY_SE_LON - SURVEY_NW_LON);
        assert!((total - expected).abs() < 1e-9);

        // No interior overlap between any pair
        for (i, a) in grid.bounds().iter().enumerate() {
            for b in &grid.bounds()[i + 1..] {
                let lat_overlap = a.south.max(b.south) < a.north.min(b.north);
                let lon_overlap = a.west.max(b.west) < a.east.min(b.east);
                assert!(
                    !(lat_overlap && lon_overlap),
                    "quadrats {} and {} overlap",
                    a.quadrat,
                    b.quadrat
                );
            }
        }
    }

    #[test]
    fn test_serpentine_numbering() {
        let grid = grid();
        // Row 0 numbers west to east
        assert_eq!(grid.station_number(0, 0), 1);
        assert_eq!(grid.station_number(0, 3), 4);
        // Row 1 numbers east to west
        assert_eq!(grid.station_number(1, 3), 5);
        assert_eq!(grid.station_number(1, 0), 8);
        // Row 2 west to east again
        assert_eq!(grid.station_number(2, 0), 9);
        // Row 3 east to west
        assert_eq!(grid.station_number(3, 0), 16);
    }

    #[test]
    fn test_station_cell_inverts_numbering() {
        let grid = grid();
        for row in 0..4 {
            for col in 0..4 {
                let station = grid.station_number(row, col);
                assert_eq!(grid.station_cell(station), Some((row, col)));
            }
        }
        assert_eq!(grid.station_cell(0), None);
        assert_eq!(grid.station_cell(17), None);
    }

    #[test]
    fn test_station_coordinates_cover_sub_grid() {
        let grid = grid();
        for bounds in grid.bounds() {
            let stations = grid.station_coordinates(bounds.quadrat).unwrap();
            assert_eq!(stations.len(), 16);

            let mut cells: Vec<(usize, usize)> =
                stations.iter().map(|s| (s.row, s.col)).collect();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), 16, "quadrat {}", bounds.quadrat);

            for station in &stations {
                assert!(bounds.contains(station.latitude, station.longitude));
            }
        }
    }

    #[test]
    fn test_unknown_quadrat_is_error() {
        assert!(grid().quadrat_bounds('Z').is_err());
    }
}
