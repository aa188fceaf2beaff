//! compounding CLI - turn one photo into a compounding graphic PNG

use clap::Parser;
use compounding::{Alignment, Color, CompoundingError, Direction, Generator, Params};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compounding", about = "Render three scaled crops of a photo side by side")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Tier order: growing or shrinking
    #[arg(short, long, default_value = "growing")]
    direction: Direction,
    /// Placement of the smaller tiles: top, bottom or center
    #[arg(short, long, default_value = "top")]
    alignment: Alignment,
    /// Background colour as #rrggbb
    #[arg(short, long, default_value = "#33ff00")]
    background: Color,
    /// Largest photo width as a percentage of canvas height (0-100)
    #[arg(short = 's', long, default_value = "100")]
    photo_size: u32,
    /// Horizontal crop anchor in percent
    #[arg(long, default_value = "50")]
    crop_x: f64,
    /// Vertical crop anchor in percent
    #[arg(long, default_value = "50")]
    crop_y: f64,
    /// Output file (default: compounding-graphic-<direction>-<alignment>.png)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the computed layout as JSON
    #[arg(long)]
    layout: bool,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), CompoundingError> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut generator = Generator::new().with_params(Params {
        direction: args.direction,
        alignment: args.alignment,
        background: args.background,
        photo_size: args.photo_size,
        crop_x: args.crop_x,
        crop_y: args.crop_y,
    });
    generator.load_image(&std::fs::read(&args.input)?)?;

    if args.layout {
        if let Some(layout) = generator.layout() {
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
    }

    let export = generator.export()?;
    let output = args.output.unwrap_or_else(|| PathBuf::from(&export.file_name));
    std::fs::write(&output, &export.png)?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
