use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use asymcam::{
    CompositePipeline, CompositeSettings, CompositeState, Container, Fps, RigConfig,
    StdFileSystem, StereoLayout, StereoRenderJob, SystemProcessHost, VideoCodec, ViewRect,
};

#[derive(Parser, Debug)]
#[command(name = "asymcam", version)]
struct Cli {
    /// Log at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the view setup (origin, rotation, projection, viewport) of a rig as JSON.
    Project(ProjectArgs),
    /// Composite LeftEye/RightEye frame sequences into one video (requires an encoder).
    Composite(CompositeArgs),
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Rig JSON.
    #[arg(long)]
    rig: PathBuf,

    /// Render target size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1920x1080", value_parser = parse_viewport)]
    viewport: ViewRect,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Directory holding both eye sequences.
    #[arg(long)]
    dir: PathBuf,

    /// Stacking layout: sbs or tb.
    #[arg(long, default_value = "sbs")]
    layout: StereoLayout,

    /// Frame rate numerator.
    #[arg(long, default_value_t = 24)]
    fps: u32,

    /// Frame rate denominator.
    #[arg(long, default_value_t = 1)]
    fps_den: u32,

    /// Output codec: h264, h265, prores, vp9 or av1.
    #[arg(long, default_value = "h264")]
    codec: VideoCodec,

    /// Quality on the 0..=51 CRF scale.
    #[arg(long, default_value_t = 18)]
    quality: u8,

    /// Output container: mp4, mov, mkv or avi.
    #[arg(long, default_value = "mp4")]
    container: Container,

    /// Delete both eye sequences after a successful composite.
    #[arg(long, default_value_t = false)]
    delete_sources: bool,

    /// Explicit encoder binary.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Bundled encoder binary, used when it exists and no explicit one is given.
    #[arg(long)]
    bundled: Option<PathBuf>,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 200)]
    poll_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Project(args) => cmd_project(args),
        Command::Composite(args) => cmd_composite(args),
    }
}

fn parse_viewport(s: &str) -> Result<ViewRect, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: i32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: i32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0 || h <= 0 {
        return Err(format!("viewport must be positive, got {w}x{h}"));
    }
    Ok(ViewRect::from_size(w, h))
}

fn cmd_project(args: ProjectArgs) -> anyhow::Result<()> {
    let mut rig = RigConfig::from_path(&args.rig)?.into_rig();
    let setup = rig.setup_view(args.viewport);
    if setup.is_none() {
        eprintln!("projection disabled or no screen; host keeps its default projection");
    }

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &setup).context("write view setup JSON")?;
    println!();
    Ok(())
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, args.fps_den)?;
    let settings = CompositeSettings {
        codec: args.codec,
        quality: args.quality,
        container: args.container,
        delete_sources: args.delete_sources,
        encoder_path: args.ffmpeg,
        bundled_encoder: args.bundled,
    };

    let mut pipeline =
        CompositePipeline::new(SystemProcessHost, StdFileSystem, args.layout, settings);
    pipeline.begin(StereoRenderJob {
        output_dir: args.dir,
        fps,
    });

    let interval = Duration::from_millis(args.poll_ms.max(1));
    while !pipeline.poll() {
        std::thread::sleep(interval);
    }

    match pipeline.state() {
        CompositeState::Succeeded => {
            if let Some(report) = pipeline.report() {
                eprintln!("wrote {}", report.output_path.display());
            }
            Ok(())
        }
        _ => {
            let msg = pipeline
                .failure()
                .map_or_else(|| "composite failed".to_owned(), ToString::to_string);
            anyhow::bail!(msg)
        }
    }
}
