use anyhow::Result;
use clap::Parser;
use tracing::info;

mod color;
mod config;
mod display;
mod geometry;
mod ipc;
mod render;
mod sim;
mod text;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "triveal")]
#[command(
    author,
    version,
    about = "Text reveal animation - glyphs burst into rotating triangles"
)]
pub struct Args {
    /// Text to reveal (overrides the configured message)
    pub text: Option<String>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Seed grid spacing in canvas pixels (lower = more particles)
    #[arg(short, long)]
    pub frequency: Option<usize>,

    /// Downward acceleration added to particles each tick
    #[arg(short, long)]
    pub gravity: Option<f32>,

    /// Reveal window in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Simulation updates per second
    #[arg(long)]
    pub fps: Option<u64>,

    /// Stroke color scheme: white, spectrum, rainbow, fire, ocean
    #[arg(long)]
    pub colors: Option<String>,

    /// Glyph height in canvas pixels
    #[arg(long)]
    pub font_size: Option<usize>,

    /// Start the reveal immediately instead of waiting for a key
    #[arg(long)]
    pub autostart: bool,

    /// Write a commented default config to the XDG path and exit
    #[arg(long)]
    pub init_config: bool,

    /// Send a command to a running instance (play/replay/status/ping/quit)
    #[arg(long)]
    pub ctl: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triveal=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if let Some(line) = &args.ctl {
        let response = ipc::send_command(line).await?;
        println!("{}", response);
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config, CLI flags win
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!("Starting triveal");

    display::terminal::run(config).await
}
