extern crate log;
pub mod crs;
pub mod error;
pub mod geofile;
pub mod length;
use crate::length::line_length_in_miles;
use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Calculate the total length of all lines in a vector geofile, in miles.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input geofile, e.g. a shapefile or GeoPackage.
    input_filepath: Option<PathBuf>,

    /// Path to a YAML config file.
    #[arg(short, long)]
    config_filepath: Option<String>,

    /// Name of the layer to read, required when the geofile has several layers.
    #[arg(short, long)]
    layer: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    input_geofile_path: Option<PathBuf>,
    layer_name: Option<String>,
}

fn read_config(config_filepath: &str) -> anyhow::Result<Config> {
    if !Path::new(config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", config_filepath));
    }
    let config_contents = read_to_string(config_filepath)?;
    Ok(serde_yaml::from_str(&config_contents)?)
}

/// Input to measure, after merging the config file with the command line.
#[derive(Debug, PartialEq)]
struct LengthJob {
    input_geofile_path: PathBuf,
    layer_name: Option<String>,
}

/// Merge the config file with the command line, the command line taking precedence.
fn resolve_config(args: Args) -> anyhow::Result<LengthJob> {
    let config = match &args.config_filepath {
        Some(config_filepath) => read_config(config_filepath)?,
        None => Config::default(),
    };
    let input_geofile_path = args
        .input_filepath
        .or(config.input_geofile_path)
        .ok_or_else(|| anyhow!("No input geofile given on the command line or in the config"))?;
    Ok(LengthJob {
        input_geofile_path,
        layer_name: args.layer.or(config.layer_name),
    })
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let job = resolve_config(args)?;
    log::info!("Calculating line length of {:?}", job.input_geofile_path);
    line_length_in_miles(&job.input_geofile_path, job.layer_name.as_deref())?;
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
