pub mod constants;
pub mod coordinates;
pub mod natural_sort;

pub use constants::*;
pub use coordinates::{haversine_distance_m, parse_coordinate, parse_decimal};
pub use natural_sort::{natural_key, NaturalKey};
