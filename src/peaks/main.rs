//! Peak search around a location.
//!
//! Opens a database written by `ingest`, loads all `natural_peak` nodes
//! within the search radius of LOCATION, lists them and reports the
//! highest one.
//!
//! ```text
//! peaks [--radius KM] DATABASE LOCATION
//! peaks /data/austria 48.2 16.3
//! ```

mod args;
mod report;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cairn::{Database, TypeInfoSet};

use crate::args::{help_text, Invocation, SearchArguments};
use crate::report::{list_peaks, rank_by_elevation, report_highest, PeakReaders};

/// Type name of peak nodes
const PEAK_TYPE: &str = "natural_peak";

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    // Initialize logging, stdout is reserved for the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = match SearchArguments::parse_from(std::env::args_os()) {
        Ok(Invocation::Search(args)) => args,
        Ok(Invocation::Help) => {
            println!("{}", help_text());
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            println!("{}", help_text());
            return Ok(ExitCode::FAILURE);
        }
    };

    run(&args)?;
    Ok(ExitCode::SUCCESS)
}

fn run(args: &SearchArguments) -> Result<()> {
    let db = Database::open(&args.database_directory)?;

    let type_config = db.type_config();
    let peak_type = type_config
        .require_type(PEAK_TYPE)
        .with_context(|| format!("database {}", args.database_directory.display()))?;
    let lookup_types: TypeInfoSet = [peak_type].into_iter().collect();

    debug!(
        "Searching {} around {} within {}",
        PEAK_TYPE, args.location, args.radius
    );

    let mut entries = db
        .load_nodes_in_radius(args.location, &lookup_types, args.radius)
        .into_node_results();

    let readers = PeakReaders::new(&type_config);
    let mut out = io::stdout().lock();

    list_peaks(&mut out, args.location, &entries, &readers)?;
    rank_by_elevation(&mut entries, &readers);
    report_highest(&mut out, &entries, &readers)?;
    out.flush()?;

    db.close();
    Ok(())
}
