//! OSM PBF ingest pipeline.
//!
//! Scans the nodes of an OSM extract, classifies them with the type
//! definitions and writes the matching ones into a database directory.

mod config;
mod tags;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use osmpbfreader::{OsmObj, OsmPbfReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cairn::DatabaseWriter;

use crate::config::TypesFile;
use crate::tags::extract_node;

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Import OSM PBF nodes into a cairn database")]
struct Args {
    /// OSM PBF file to import
    #[arg(short, long)]
    file: PathBuf,

    /// Database directory to write
    #[arg(short, long)]
    output: PathBuf,

    /// Type definitions (TOML). Defaults to the built-in peak types.
    #[arg(long)]
    types: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Cairn Ingest");
    info!("File: {}", args.file.display());

    let types = match &args.types {
        Some(path) => TypesFile::load_from_file(path)?,
        None => TypesFile::builtin()?,
    };
    let type_config = types.into_type_config()?;
    for type_info in type_config.types() {
        info!("  type {}: {:?}", type_info.name, type_info.features);
    }

    let file = File::open(&args.file).context("Failed to open PBF file")?;
    let mut reader = OsmPbfReader::new(BufReader::new(file));

    info!("Counting objects...");
    let mut total_count = 0u64;
    for obj in reader.iter() {
        if obj.is_ok() {
            total_count += 1;
        }
    }
    info!("Total OSM objects: {}", total_count);

    reader.rewind()?;

    // Create progress bar
    let pb = ProgressBar::new(total_count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let mut writer = DatabaseWriter::create(&args.output, type_config)
        .with_context(|| format!("Failed to create database in {}", args.output.display()))?;

    info!("Processing OSM nodes...");

    for obj_result in reader.iter() {
        pb.inc(1);

        let obj = match obj_result {
            Ok(o) => o,
            Err(e) => {
                warn!("Error reading OSM object: {}", e);
                continue;
            }
        };

        let OsmObj::Node(node) = obj else {
            continue;
        };

        if let Some((coord, buffer)) = extract_node(&node, writer.type_config())? {
            writer.add_node(node.id.0, coord, buffer)?;
        }
    }

    pb.finish_with_message("Processing complete");

    let source_file = args.file.file_name().and_then(|n| n.to_str());
    let db_info = writer.finish(source_file)?;

    info!(
        "Imported {} nodes into {}",
        db_info.node_count,
        args.output.display()
    );

    Ok(())
}
