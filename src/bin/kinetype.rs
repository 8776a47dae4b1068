use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use kinetype::render::FontFace;
use kinetype::session::needs_font;
use kinetype::style::color::parse_hex;
use kinetype::{
    AnimationKind, Canvas, CpuSurface, ExportOptions, ExportStatus, PatternKind, PresetSize,
    PreviewLoop, Rgba8, StyleConfig, Surface as _, render_frame, spawn_export,
};

#[derive(Parser, Debug)]
#[command(name = "kinetype", version, about = "Animated text reaction GIFs")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export one loop as an animated GIF.
    Export(ExportArgs),
    /// Run the live preview loop for a while and report the frame rate.
    Preview(PreviewArgs),
    /// List the size presets.
    Presets,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Style JSON file; flags below override its fields.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Message to render (`\n` starts a new line).
    #[arg(long)]
    text: Option<String>,

    /// Text color as #RRGGBB or #RRGGBBAA.
    #[arg(long, value_parser = parse_color)]
    text_color: Option<Rgba8>,

    /// Background color; implies an opaque background.
    #[arg(long, value_parser = parse_color)]
    bg_color: Option<Rgba8>,

    /// Fill the background instead of leaving it transparent.
    #[arg(long, conflicts_with = "transparent")]
    opaque: bool,

    /// Leave the background transparent.
    #[arg(long)]
    transparent: bool,

    /// Foreground animation (pulse, spin, rainbow, shake, slide, bounce, grow, blink).
    #[arg(long, value_parser = parse_animation)]
    animation: Option<AnimationKind>,

    /// Background pattern (none, heart, star, burst, bubble).
    #[arg(long, value_parser = parse_pattern)]
    pattern: Option<PatternKind>,

    /// Size preset id (see `kinetype presets`).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    preset: Option<String>,

    /// Canvas width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Loop length in seconds.
    #[arg(long)]
    duration: Option<f32>,

    /// Added to the automatic font size.
    #[arg(long, allow_hyphen_values = true)]
    font_size_offset: Option<i32>,

    /// Font file to render with.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Extra directory to search for fonts (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Loop time in [0, 1).
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Output GIF path, or a directory to place the default file name in.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Quantizer speed, 1 (best) to 30 (fastest).
    #[arg(long, default_value_t = kinetype::encode::gif::DEFAULT_QUANTIZE_SPEED)]
    speed: i32,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// How long to run the preview, in seconds.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Write the last previewed frame to this PNG.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn parse_color(s: &str) -> Result<Rgba8, String> {
    parse_hex(s)
}

fn parse_kind<T: serde::de::DeserializeOwned>(s: &str, what: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown {what} \"{s}\""))
}

fn parse_animation(s: &str) -> Result<AnimationKind, String> {
    parse_kind(s, "animation")
}

fn parse_pattern(s: &str) -> Result<PatternKind, String> {
    parse_kind(s, "pattern")
}

impl StyleArgs {
    fn to_style(&self) -> anyhow::Result<StyleConfig> {
        let mut style = match &self.style {
            Some(path) => StyleConfig::from_path(path)?,
            None => StyleConfig::default(),
        };

        if let Some(text) = &self.text {
            style.text = text.replace("\\n", "\n");
        }
        if let Some(c) = self.text_color {
            style.text_color = c;
        }
        if let Some(c) = self.bg_color {
            style.background_color = c;
            style.transparent_background = false;
        }
        if self.opaque {
            style.transparent_background = false;
        }
        if self.transparent {
            style.transparent_background = true;
        }
        if let Some(a) = self.animation {
            style.animation = a;
        }
        if let Some(p) = self.pattern {
            style.pattern = p;
        }
        if let Some(id) = &self.preset {
            let preset = PresetSize::by_id(id)
                .with_context(|| format!("unknown preset '{id}' (see `kinetype presets`)"))?;
            style.canvas = preset.canvas();
        }
        if let (Some(w), Some(h)) = (self.width, self.height) {
            style.canvas = Canvas::new(w, h);
        }
        if let Some(d) = self.duration {
            style.duration_secs = d;
        }
        if let Some(o) = self.font_size_offset {
            style.font_size_offset = o;
        }

        style.validate()?;
        Ok(style)
    }

    fn font_for(&self, style: &StyleConfig) -> anyhow::Result<Option<FontFace>> {
        if !needs_font(style) {
            return Ok(None);
        }
        Ok(Some(FontFace::resolve(
            self.font.as_deref(),
            &self.font_dirs,
        )?))
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Presets => cmd_presets(),
    }
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &kinetype::FrameRGBA) -> anyhow::Result<()> {
    create_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..1.0).contains(&args.t) {
        anyhow::bail!("--t must be in [0, 1), got {}", args.t);
    }
    let style = args.style.to_style()?;
    let font = args.style.font_for(&style)?;
    let Canvas { width, height } = style.canvas;

    let mut surface = CpuSurface::new(width, height, font.as_ref())?;
    render_frame(&mut surface, &style, width, height, args.t)?;
    let frame = surface.read_pixels()?;

    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let style = args.style.to_style()?;
    let opts = ExportOptions {
        font_path: args.style.font.clone(),
        font_dirs: args.style.font_dirs.clone(),
        quantize_speed: args.speed,
        ..ExportOptions::default()
    };

    let task = spawn_export(style, opts)?;
    let mut reported = 0;
    while task.status() == ExportStatus::Generating {
        let (done, total) = task.progress();
        if done != reported {
            tracing::info!(done, total, "rendering");
            reported = done;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    let out = task.wait()?;

    let path = if args.out.is_dir() {
        args.out.join(&out.file_name)
    } else {
        args.out
    };
    create_parent_dir(&path)?;
    std::fs::write(&path, &out.bytes)
        .with_context(|| format!("write gif '{}'", path.display()))?;

    eprintln!(
        "wrote {} ({} frames, {:.0} ms each)",
        path.display(),
        out.frame_count,
        out.delay_ms
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds <= 0.0 {
        anyhow::bail!("--seconds must be > 0");
    }
    let style = args.style.to_style()?;
    let font = args.style.font_for(&style)?;
    let Canvas { width, height } = style.canvas;

    let (tx, rx) = std::sync::mpsc::channel();
    let handle = PreviewLoop::start(
        style,
        move || CpuSurface::new(width, height, font.as_ref()),
        move |frame| {
            let _ = tx.send(frame);
        },
    )?;
    std::thread::sleep(Duration::from_secs_f64(args.seconds));
    let frames = handle.cancel()?;

    let last = rx.try_iter().last();
    eprintln!(
        "previewed {frames} frames in {:.1}s ({:.1} fps)",
        args.seconds,
        frames as f64 / args.seconds
    );
    if let Some(path) = args.snapshot {
        let last = last.context("preview produced no frames")?;
        write_png(&path, &last.frame)?;
        eprintln!("wrote {} (t = {:.3})", path.display(), last.t);
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in PresetSize::all() {
        println!("{:<10} {}x{}  {}", p.id, p.width, p.height, p.label);
    }
    Ok(())
}
