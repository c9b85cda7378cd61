use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tincture::{convert, Palette};

/// Extract a color palette from an image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image to sample
    image: PathBuf,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = tincture::DEFAULT_COLOR_COUNT)]
    colors: usize,

    /// Clustering rounds
    #[arg(short, long, default_value_t = tincture::DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for reproducible palettes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Downscale the image to at most this many pixels before sampling, 0 to sample every pixel
    #[arg(short, long, default_value_t = tincture::DEFAULT_RESIZE_IMAGE_AREA)]
    resize_area: u32,

    /// Print the palette as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = tincture::image::open(&args.image)
        .with_context(|| format!("failed to open {}", args.image.display()))?
        .to_rgb8();

    let mut builder = Palette::from_image(image)
        .color_count(args.colors)
        .iterations(args.iterations)
        .resize_image_area(args.resize_area);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let palette = builder.generate().context("palette extraction failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&palette.colors())?);
        return Ok(());
    }

    for color in palette.colors() {
        let (h, s, l) = convert::rgb_to_hsl(color.rgb());
        let (r, g, b) = color.rgb();

        println!(
            "{}  rgb({r}, {g}, {b})  hsl({}, {}%, {}%)  {}",
            color.hex(),
            h.round(),
            (s * 100.0).round(),
            (l * 100.0).round(),
            color.population()
        );
    }

    Ok(())
}
