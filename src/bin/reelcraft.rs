use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reelcraft", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a reel MP4 from a folder of photos (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Detect beats in an audio file and print them as JSON.
    Beats(BeatsArgs),
    /// Render one motion frame of one photo as an image.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Folder of .jpg/.jpeg/.png photos.
    #[arg(long)]
    input: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// JSON config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per photo.
    #[arg(long)]
    duration: Option<f64>,

    /// Output frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Output width.
    #[arg(long)]
    width: Option<u32>,

    /// Output height.
    #[arg(long)]
    height: Option<u32>,

    /// Transition style (fade, slide, zoom, morph, glitch, circular_wipe, page_curl, random).
    #[arg(long)]
    transition: Option<String>,

    /// Concatenate clips without transitions.
    #[arg(long)]
    no_transitions: bool,

    /// Ken Burns motion (zoom_in, zoom_out, pan_left, ..., random).
    #[arg(long)]
    motion: Option<String>,

    /// Motion intensity (low, medium, high).
    #[arg(long)]
    intensity: Option<String>,

    /// Camera style (basic, dynamic, cinematic).
    #[arg(long)]
    camera_style: Option<String>,

    /// Enable mood colour grading.
    #[arg(long)]
    grade: bool,

    /// Mood override (sunset, ocean, forest, city, vintage, dramatic, soft, neutral).
    #[arg(long)]
    mood: Option<String>,

    /// Background music file.
    #[arg(long)]
    music: Option<PathBuf>,

    /// Narration audio file.
    #[arg(long)]
    narration: Option<PathBuf>,

    /// Retime clips to the background music's beats.
    #[arg(long)]
    beat_sync: bool,

    /// Overlay this caption.
    #[arg(long)]
    caption: Option<String>,

    /// Preprocessing worker threads.
    #[arg(long)]
    workers: Option<usize>,

    /// Seed for every random choice.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct BeatsArgs {
    /// Audio file.
    #[arg(long)]
    audio: PathBuf,

    /// Minimum spacing between beats in seconds.
    #[arg(long, default_value_t = 0.5)]
    min_interval: f64,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Source photo.
    #[arg(long)]
    image: PathBuf,

    /// Output image (.png or .jpg).
    #[arg(long)]
    out: PathBuf,

    /// Motion style.
    #[arg(long, default_value = "zoom_in")]
    motion: String,

    /// Motion intensity (low, medium, high).
    #[arg(long, default_value = "medium")]
    intensity: String,

    /// Clip duration in seconds.
    #[arg(long, default_value_t = 3.0)]
    duration: f64,

    /// Time into the clip in seconds.
    #[arg(long, default_value_t = 1.5)]
    t: f64,

    /// Output width.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Output height.
    #[arg(long, default_value_t = 1920)]
    height: u32,

    /// Seed for random motion parameters.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Beats(args) => cmd_beats(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

/// Parse a snake_case token the way the JSON config does.
fn parse_token<T: serde::de::DeserializeOwned>(what: &str, s: &str) -> anyhow::Result<T> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .with_context(|| format!("invalid {what} '{s}'"))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => reelcraft::ReelsConfig::from_path(path)?,
        None => reelcraft::ReelsConfig::default(),
    };

    if let Some(v) = args.duration {
        cfg.duration_per_photo = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.width {
        cfg.width = v;
    }
    if let Some(v) = args.height {
        cfg.height = v;
    }
    if let Some(v) = args.transition.as_deref() {
        cfg.transition = parse_token("transition", v)?;
    }
    if args.no_transitions {
        cfg.transitions = false;
    }
    if let Some(v) = args.motion.as_deref() {
        cfg.motion = parse_token("motion", v)?;
    }
    if let Some(v) = args.intensity.as_deref() {
        cfg.intensity = parse_token("intensity", v)?;
    }
    if let Some(v) = args.camera_style.as_deref() {
        cfg.camera_style = parse_token("camera style", v)?;
    }
    if args.grade {
        cfg.enable_color_grading = true;
    }
    if let Some(v) = args.mood.as_deref() {
        cfg.mood = Some(parse_token("mood", v)?);
        cfg.enable_color_grading = true;
    }
    if args.music.is_some() {
        cfg.background_music = args.music;
    }
    if args.narration.is_some() {
        cfg.narration_audio = args.narration;
    }
    if args.beat_sync {
        cfg.enable_beat_sync = true;
    }
    if args.caption.is_some() {
        cfg.enable_ai_captions = true;
    }
    if let Some(v) = args.workers {
        cfg.workers = v;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let mut engine = reelcraft::ReelsEngine::new(cfg)?
        .on_progress(|pct, msg| eprintln!("[{pct:>3}%] {msg}"));
    if let Some(text) = args.caption {
        engine = engine.with_caption_generator(Arc::new(reelcraft::FixedCaption(text)));
    }

    let report = engine.generate(&args.input, &args.out)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_beats(args: BeatsArgs) -> anyhow::Result<()> {
    let pcm = reelcraft::decode_for_beats(&args.audio)?;
    let beats = reelcraft::detect_beats(&pcm.to_mono(), pcm.sample_rate, args.min_interval)?;
    println!("{}", serde_json::to_string_pretty(&beats)?);
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let style: reelcraft::MotionStyle = args.motion.parse()?;
    let level: reelcraft::IntensityLevel = parse_token("intensity", &args.intensity)?;
    let res = reelcraft::Resolution::new(args.width, args.height)?;
    let fps = reelcraft::Fps::new(30, 1)?;
    let mut rng = reelcraft::rng_from_seed(args.seed);

    let photo = reelcraft::load_photo(&args.image)?;
    let spec = reelcraft::MotionSpec::with_level(style, level, reelcraft::Ease::default());
    let clip = reelcraft::Clip::new(
        Arc::new(photo.frame),
        args.duration,
        spec,
        res,
        fps,
        &mut rng,
    )?;
    let frame = clip.frame_at(args.t);
    reelcraft::save_frame(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
