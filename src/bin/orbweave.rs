use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orbweave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Simulate the animation loop and write every drawn frame as a PNG sequence.
    Preview(PreviewArgs),
    /// Print the resolved tier table as JSON.
    Tiers(TiersArgs),
}

#[derive(Args, Debug)]
struct DeviceArgs {
    /// Quality tier. Overrides device classification.
    #[arg(long, value_enum)]
    tier: Option<TierChoice>,

    /// Viewport width in CSS pixels, used to classify the device when `--tier` is absent.
    #[arg(long, default_value_t = 1280)]
    viewport_width: u32,

    /// User agent string, used to classify the device when `--tier` is absent.
    #[arg(long, default_value = "")]
    user_agent: String,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Optional configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    device: DeviceArgs,

    /// Timestamp in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Optional configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    device: DeviceArgs,

    /// Length of the run in milliseconds.
    #[arg(long, default_value_t = 2000.0)]
    duration_ms: f64,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    native_hz: f64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct TiersArgs {
    /// Optional configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TierChoice {
    High,
    Mobile,
    LowPower,
}

impl From<TierChoice> for orbweave::QualityTier {
    fn from(c: TierChoice) -> Self {
        match c {
            TierChoice::High => Self::High,
            TierChoice::Mobile => Self::Mobile,
            TierChoice::LowPower => Self::LowPower,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Tiers(args) => cmd_tiers(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<orbweave::OrbConfig> {
    let Some(path) = path else {
        return Ok(orbweave::OrbConfig::default());
    };
    orbweave::OrbConfig::from_json_path(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn resolve_tier(device: &DeviceArgs) -> orbweave::QualityTier {
    if let Some(t) = device.tier {
        return t.into();
    }
    let tier = orbweave::DeviceSignal {
        viewport_width: device.viewport_width,
        user_agent: device.user_agent.clone(),
        low_power: None,
    }
    .classify();
    tracing::info!(tier = tier.as_str(), "classified device");
    tier
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let tier = resolve_tier(&args.device);

    let frame = orbweave::render_still(&cfg, tier, args.time_ms)?.to_straight();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let tier = resolve_tier(&args.device);

    let opts = orbweave::PreviewOpts {
        native_hz: args.native_hz,
        duration_ms: args.duration_ms,
        start_ms: 0.0,
    };
    let mut session = orbweave::PreviewSession::new(&cfg, tier, opts)?;
    let mut sink = orbweave::PngSequenceSink::new(&args.out_dir);
    let stats = session.run(&mut sink)?;

    eprintln!(
        "tier {}: {} vsyncs, {} frames drawn, {} throttled",
        tier.as_str(),
        stats.vsyncs,
        stats.frames,
        stats.throttled
    );
    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_tiers(args: TiersArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let json = serde_json::to_string_pretty(&cfg.tiers).context("serialize tier table")?;
    println!("{json}");
    Ok(())
}
