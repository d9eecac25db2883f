use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkframe::config::AppConfig;
use inkframe::image_io::WriteOptions;
use inkframe::pipeline::{self, ConvertOptions};
use inkframe::settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "inkframe")]
#[command(version)]
#[command(about = "Dither an image to a small fixed palette for e-ink displays")]
struct Cli {
    /// Input PNG file
    input: PathBuf,

    /// Output PNG file
    output: PathBuf,

    /// Diffusion kernel, from the catalog or defined in the config file
    /// [default: stevenson-arce]
    #[arg(short, long)]
    kernel: Option<String>,

    /// Distance norm: l1, l2 or linf [default: l1]
    #[arg(short, long)]
    norm: Option<String>,

    /// Comparison color space: rgb, yuv, lab or oklab [default: lab]
    #[arg(short = 's', long)]
    color_space: Option<String>,

    /// Palette as comma-separated names or hex values
    /// (e.g. "black,white,#ff0000") [default: seven-color e-ink set]
    #[arg(short, long)]
    palette: Option<String>,

    /// Break ties by a shuffled search order seeded with this value
    #[arg(long)]
    seed: Option<u64>,

    /// YAML config file
    #[arg(short, long, env = "INKFRAME_CONFIG")]
    config: Option<PathBuf>,

    /// Write an indexed (palette) PNG
    #[arg(long)]
    indexed: bool,

    /// Recompress the output with oxipng
    #[arg(long)]
    optimize: bool,

    /// Log progress every 10% of rows
    #[arg(long)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=info,palette_dither=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        None => AppConfig::default(),
    };

    let overrides = Overrides {
        kernel: cli.kernel,
        norm: cli.norm,
        color_space: cli.color_space,
        palette: cli.palette,
        seed: cli.seed,
    };
    let settings = Settings::resolve(&overrides, &config)?;

    pipeline::convert(
        &cli.input,
        &cli.output,
        &settings,
        ConvertOptions {
            write: WriteOptions {
                indexed: cli.indexed,
                optimize: cli.optimize,
            },
            progress: cli.progress,
        },
    )?;

    Ok(())
}
