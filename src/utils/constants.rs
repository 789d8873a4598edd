/// Earth radius used by the haversine formula, metres
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Survey grid layout: 24 quadrats (A-X) in 3 rows of 8 columns
pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 8;

/// Each quadrat holds a 4x4 sub-grid of stations, numbered 1-16
pub const SUB_GRID_SIZE: usize = 4;
pub const STATIONS_PER_QUADRAT: usize = SUB_GRID_SIZE * SUB_GRID_SIZE;

/// Survey area corners (decimal degrees)
pub const SURVEY_NW_LAT: f64 = 49.263732;
pub const SURVEY_NW_LON: f64 = -123.157839;
pub const SURVEY_SE_LAT: f64 = 49.209817;
pub const SURVEY_SE_LON: f64 = -122.938138;

/// Classification thresholds, metres
pub const SIGNIFICANT_THRESHOLD_M: f64 = 50.0;
pub const MEDIUM_THRESHOLD_M: f64 = 20.0;

/// Key columns of the coordinate reference table
pub const QUADRAT_COLUMN: &str = "Quadrat";
pub const STATION_COLUMN: &str = "Station";

/// Accepted header spellings for the coordinate columns (lowercase)
pub const LATITUDE_ALIASES: &[&str] = &["lat", "latitude"];
pub const LONGITUDE_ALIASES: &[&str] = &["lon", "long", "longitude"];

/// Default reference table path within the survey repository
pub const COORDINATES_FILE: &str = "static/COHA-Station-Coordinates-v1.csv";
