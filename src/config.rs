use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    GRID_COLS, GRID_ROWS, LATITUDE_ALIASES, LONGITUDE_ALIASES, MEDIUM_THRESHOLD_M,
    SIGNIFICANT_THRESHOLD_M, SUB_GRID_SIZE, SURVEY_NW_LAT, SURVEY_NW_LON, SURVEY_SE_LAT,
    SURVEY_SE_LON,
};

/// Immutable survey configuration passed into each component.
///
/// Carries the grid geometry inputs, classification thresholds, and the
/// accepted coordinate column spellings. Components take a reference at
/// construction; nothing reads ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurveyConfig {
    #[validate(range(min = -90.0, max = 90.0))]
    pub nw_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub nw_lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub se_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub se_lon: f64,

    #[validate(range(min = 1, max = 26))]
    pub grid_rows: usize,

    #[validate(range(min = 1, max = 26))]
    pub grid_cols: usize,

    #[validate(range(min = 1, max = 16))]
    pub sub_grid_size: usize,

    #[validate(range(min = 0.0))]
    pub significant_threshold_m: f64,

    #[validate(range(min = 0.0))]
    pub medium_threshold_m: f64,

    pub latitude_aliases: Vec<String>,
    pub longitude_aliases: Vec<String>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            nw_lat: SURVEY_NW_LAT,
            nw_lon: SURVEY_NW_LON,
            se_lat: SURVEY_SE_LAT,
            se_lon: SURVEY_SE_LON,
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,
            sub_grid_size: SUB_GRID_SIZE,
            significant_threshold_m: SIGNIFICANT_THRESHOLD_M,
            medium_threshold_m: MEDIUM_THRESHOLD_M,
            latitude_aliases: LATITUDE_ALIASES.iter().map(|s| s.to_string()).collect(),
            longitude_aliases: LONGITUDE_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SurveyConfig {
    /// Number of quadrats in the grid.
    pub fn quadrat_count(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// Validate ranges plus the cross-field constraints the derive cannot
    /// express: corner ordering and the A-Z letter limit.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.nw_lat <= self.se_lat {
            return Err(crate::error::DriftError::Config(format!(
                "NW latitude {} must be north of SE latitude {}",
                self.nw_lat, self.se_lat
            )));
        }
        if self.nw_lon >= self.se_lon {
            return Err(crate::error::DriftError::Config(format!(
                "NW longitude {} must be west of SE longitude {}",
                self.nw_lon, self.se_lon
            )));
        }
        if self.quadrat_count() > 26 {
            return Err(crate::error::DriftError::Config(format!(
                "{} quadrats cannot be lettered A-Z",
                self.quadrat_count()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SurveyConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.quadrat_count(), 24);
    }

    #[test]
    fn test_swapped_corners_rejected() {
        let config = SurveyConfig {
            nw_lat: SURVEY_SE_LAT,
            se_lat: SURVEY_NW_LAT,
            ..SurveyConfig::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_too_many_quadrats_rejected() {
        let config = SurveyConfig {
            grid_rows: 6,
            grid_cols: 8,
            ..SurveyConfig::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_out_of_range_latitude_rejected() {
        let config = SurveyConfig {
            nw_lat: 95.0,
            ..SurveyConfig::default()
        };
        assert!(config.check().is_err());
    }
}
