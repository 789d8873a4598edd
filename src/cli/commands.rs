use std::path::{Path, PathBuf};

use tracing::Level;

use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::SurveyConfig;
use crate::error::{DriftError, Result};
use crate::grid::SurveyGrid;
use crate::models::DriftReport;
use crate::processors::DriftDetector;
use crate::readers::SnapshotReader;
use crate::report::{ConsoleReporter, JsonReporter};
use crate::revision::{select_versions, GitRevisionSource};

pub async fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let use_color = !cli.no_color;

    match cli.command {
        Commands::Check {
            file,
            repo,
            format,
            station_check,
            show_unchanged,
        } => {
            let repo_dir = repo.unwrap_or_else(|| {
                file.parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let source = GitRevisionSource::discover(&repo_dir)?;

            let comparison = match select_versions(&source, &file) {
                Ok(comparison) => comparison,
                Err(DriftError::InsufficientHistory) => {
                    println!("Only one revision exists in history. Nothing to compare.");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let reader = SnapshotReader::new();
            let current = reader.read_content(&comparison.current.content)?;
            let previous = reader.read_content(&comparison.previous.content)?;

            let report = DriftDetector::new(SurveyConfig::default())
                .with_station_check(station_check)
                .compare(
                    &current,
                    &previous,
                    &comparison.current.label,
                    &comparison.previous.label,
                )?;

            print_report(&report, format, use_color, show_unchanged)?;
        }

        Commands::Compare {
            current,
            previous,
            format,
            station_check,
            show_unchanged,
        } => {
            let reader = SnapshotReader::new();
            let current_snapshot = reader.read_file(&current)?;
            let previous_snapshot = reader.read_file(&previous)?;

            let report = DriftDetector::new(SurveyConfig::default())
                .with_station_check(station_check)
                .compare(
                    &current_snapshot,
                    &previous_snapshot,
                    &current.display().to_string(),
                    &previous.display().to_string(),
                )?;

            print_report(&report, format, use_color, show_unchanged)?;
        }

        Commands::Grid { quadrat, stations } => {
            let grid = SurveyGrid::new(&SurveyConfig::default())?;

            let selected: Vec<char> = match quadrat {
                Some(letter) => {
                    let letter = letter.to_ascii_uppercase();
                    grid.quadrat_bounds(letter)?;
                    vec![letter]
                }
                None => grid.bounds().iter().map(|b| b.quadrat).collect(),
            };

            for letter in selected {
                let bounds = grid.quadrat_bounds(letter)?;
                println!(
                    "{}: N {:.6}  S {:.6}  W {:.6}  E {:.6}",
                    bounds.quadrat, bounds.north, bounds.south, bounds.west, bounds.east
                );
                if stations {
                    for station in grid.station_coordinates(letter)? {
                        println!(
                            "  {}/{:<2}  {:.6}, {:.6}",
                            station.quadrat, station.station, station.latitude, station.longitude
                        );
                    }
                }
            }
        }

        Commands::Locate {
            latitude,
            longitude,
        } => {
            let grid = SurveyGrid::new(&SurveyConfig::default())?;
            match grid.locate(latitude, longitude) {
                Some(fix) => println!(
                    "{:.6}, {:.6} falls in quadrat {} station {}",
                    latitude, longitude, fix.quadrat, fix.station
                ),
                None => println!(
                    "{:.6}, {:.6} is outside the survey grid",
                    latitude, longitude
                ),
            }
        }
    }

    Ok(())
}

fn print_report(
    report: &DriftReport,
    format: OutputFormat,
    use_color: bool,
    show_unchanged: bool,
) -> Result<()> {
    match format {
        OutputFormat::Console => {
            let text = ConsoleReporter::new()
                .with_color(use_color)
                .with_unchanged(show_unchanged)
                .render(report);
            print!("{}", text);
        }
        OutputFormat::Json => {
            let json = JsonReporter::new().render(report)?;
            println!("{}", json);
        }
    }
    Ok(())
}
