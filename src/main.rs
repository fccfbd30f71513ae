//! gradient-gen - CLI tool to render a two-color gradient as CSS properties.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gradient_gen::{GradientConfig, GradientController, InterpolationSpace, TextureCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// CSS custom property declarations
    Css,
    /// The full render frame as JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Space {
    Lch,
    Oklch,
}

impl From<Space> for InterpolationSpace {
    fn from(space: Space) -> Self {
        match space {
            Space::Lch => InterpolationSpace::Lch,
            Space::Oklch => InterpolationSpace::Oklch,
        }
    }
}

/// Build a gradient between two colors and print its render output.
#[derive(Parser, Debug)]
#[command(name = "gradient-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start color (hex, rgb(), hsl(), lch() or oklch())
    #[arg(short = 'a', long)]
    color_a: Option<String>,

    /// End color
    #[arg(short = 'z', long)]
    color_z: Option<String>,

    /// Interpolate along the longer hue arc
    #[arg(long)]
    long: bool,

    /// Stop positions in percent, as left,mid,right
    #[arg(long, value_delimiter = ',')]
    stops: Option<Vec<f64>>,

    /// Number of preview intervals
    #[arg(long)]
    steps: Option<usize>,

    /// Interpolation color space
    #[arg(long, value_enum)]
    space: Option<Space>,

    /// Swap the endpoints before rendering
    #[arg(long)]
    swap: bool,

    /// Texture catalog JSON file
    #[arg(long)]
    textures: Option<PathBuf>,

    /// Pick both endpoints from the texture catalog at random
    #[arg(long, requires = "textures")]
    random: bool,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "css")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => GradientConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GradientConfig::default(),
    };

    if let Some(color) = args.color_a {
        config.color_a = color;
    }
    if let Some(color) = args.color_z {
        config.color_z = color;
    }
    if let Some(stops) = &args.stops {
        let [left, mid, right] = stops[..] else {
            anyhow::bail!("--stops takes exactly three values, got {}", stops.len());
        };
        config.stops = [left, mid, right];
    }
    if let Some(steps) = args.steps {
        config.preview_steps = steps;
    }
    if let Some(space) = args.space {
        config.space = space.into();
    }
    if args.long {
        config.short_path = false;
    }
    debug!("Effective config: {:?}", config);

    let mut controller =
        GradientController::new(&config).context("Failed to set up the gradient")?;

    if args.random {
        if let Some(path) = &args.textures {
            let catalog = TextureCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load textures {}", path.display()))?;
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            controller.randomise(&catalog, &mut rng)?;
            info!(
                "Random endpoints: {} / {}",
                controller.texture(gradient_gen::Endpoint::A).unwrap_or("-"),
                controller.texture(gradient_gen::Endpoint::Z).unwrap_or("-")
            );
        }
    }

    if args.swap {
        controller.swap()?;
    }

    let frame = controller.frame();
    match args.format {
        OutputFormat::Css => {
            for (name, value) in frame.css_properties() {
                println!("{}: {};", name, value);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(frame)?;
            println!("{}", json);
        }
    }

    Ok(())
}
