use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::utils::constants::COORDINATES_FILE;

#[derive(Parser)]
#[command(name = "coha-drift")]
#[command(about = "Station coordinate drift detector for the COHA survey")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare the coordinate table against its version history
    Check {
        #[arg(
            short,
            long,
            default_value = COORDINATES_FILE,
            help = "Coordinate table path within the survey repository"
        )]
        file: PathBuf,

        #[arg(long, help = "Repository directory [default: directory of --file]")]
        repo: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,

        #[arg(
            long,
            help = "Cross-check each coordinate against its nominal grid identity"
        )]
        station_check: bool,

        #[arg(long, help = "Include unchanged stations in the report")]
        show_unchanged: bool,
    },

    /// Compare two explicit snapshot CSV files
    Compare {
        #[arg(help = "Current snapshot CSV")]
        current: PathBuf,

        #[arg(help = "Previous snapshot CSV")]
        previous: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,

        #[arg(
            long,
            help = "Cross-check each coordinate against its nominal grid identity"
        )]
        station_check: bool,

        #[arg(long, help = "Include unchanged stations in the report")]
        show_unchanged: bool,
    },

    /// Print quadrat bounds and expected station centers
    Grid {
        #[arg(short, long, help = "Single quadrat letter to print [default: all]")]
        quadrat: Option<char>,

        #[arg(long, help = "Include expected station center coordinates")]
        stations: bool,
    },

    /// Reverse geocode a coordinate into its quadrat and station
    Locate {
        #[arg(allow_hyphen_values = true, help = "Latitude, decimal degrees")]
        latitude: f64,

        #[arg(allow_hyphen_values = true, help = "Longitude, decimal degrees")]
        longitude: f64,
    },
}
