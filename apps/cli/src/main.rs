//! ATOC CLI — transform raw KML/KMZ exports into visually styled KML files.
//!
//! Classifies placemarks by their OSM tags, applies a shared style palette,
//! and groups the result into category folders.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
