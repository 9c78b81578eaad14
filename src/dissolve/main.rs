//! County-to-region dissolve pipeline.
//!
//! Loads WA county boundaries, tags each with its ACH region, dissolves
//! polygons by region, and exports the result as GeoJSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ach_regions::lookup::RegionLookup;
use ach_regions::pipeline::{add_regions, dissolve, export_geojson};
use ach_regions::shp::load_counties;

#[derive(Parser, Debug)]
#[command(name = "dissolve")]
#[command(about = "Dissolve WA county boundaries into ACH region polygons")]
struct Args {
    /// County -> region lookup table (JSON object)
    #[arg(long, default_value = "data/regions.json")]
    regions: PathBuf,

    /// Zip-packaged county boundary shapefile
    #[arg(long, default_value = "data/WA_County_Boundaries.zip")]
    counties: PathBuf,

    /// Output GeoJSON path, overwritten if present
    #[arg(long, default_value = "dissolved.geojson")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("ACH region dissolve pipeline");

    let mut lookup = RegionLookup::new(&args.regions);

    let counties = load_counties(&args.counties)?;
    let counties = add_regions(counties, &mut lookup)?;
    let regions = dissolve(counties, &mut lookup)?;

    for region in &regions {
        if let Some((min_x, min_y, max_x, max_y)) = region.bbox() {
            info!(
                "{}: [{}] bbox ({:.4}, {:.4})..({:.4}, {:.4})",
                region.region, region.counties, min_x, min_y, max_x, max_y
            );
        }
    }

    export_geojson(&regions, &args.output)?;

    Ok(())
}
