use std::ffi::OsString;
use std::path::PathBuf;

use cairn::{Distance, GeoCoord, ParseCoordError};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use thiserror::Error;

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 100.0;

/// CLI arguments for peaks
#[derive(Parser, Debug)]
#[command(name = "peaks")]
#[command(about = "List the peaks around a location and report the highest one")]
struct Cli {
    /// Search radius in kilometers
    #[arg(long, value_name = "KM", default_value_t = DEFAULT_RADIUS_KM, value_parser = parse_radius)]
    radius: f64,

    /// Directory of the database to use
    #[arg(value_name = "DATABASE")]
    database: PathBuf,

    /// Search center, e.g. "48.2 16.3" or "N48.2 E16.3"
    #[arg(
        value_name = "LOCATION",
        required = true,
        num_args = 1..=2,
        allow_negative_numbers = true
    )]
    location: Vec<String>,
}

/// Validated arguments of a search run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArguments {
    pub database_directory: PathBuf,
    pub location: GeoCoord,
    pub radius: Distance,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Help,
    Search(SearchArguments),
}

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("{0}")]
    Cli(String),

    #[error(transparent)]
    Location(#[from] ParseCoordError),
}

impl SearchArguments {
    /// Parse process arguments (including the program name)
    pub fn parse_from<I, T>(args: I) -> Result<Invocation, ArgsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => return Ok(Invocation::Help),
            Err(e) => return Err(ArgsError::Cli(describe(&e))),
        };

        let location = GeoCoord::parse(&cli.location.join(" "))?;

        Ok(Invocation::Search(SearchArguments {
            database_directory: cli.database,
            location,
            radius: Distance::from_kilometers(cli.radius),
        }))
    }
}

/// Usage text printed for `--help` and after argument errors
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

fn parse_radius(s: &str) -> Result<f64, String> {
    let km: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !km.is_finite() || km <= 0.0 {
        return Err(format!("radius must be positive, got {s}"));
    }
    Ok(km)
}

/// clap's message without its `error:` prefix and usage footer
fn describe(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered.split("\n\n").next().unwrap_or(&rendered);
    message
        .trim()
        .trim_start_matches("error:")
        .trim()
        .to_string()
}
