use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use chaostile::persist::settings::{load_settings, set_field, store_all};
use chaostile::{
    AnimationPreset, ExportArtifact, Exporter, FfmpegWebmSink, Fps, JsonFileStore,
    KeyValueStore, PresetCollection, RasterOptions, Rasterizer, Scene, Stage, StyleConfig,
    SystemClock, VideoCodec, WebmSinkOpts,
};

#[derive(Parser, Debug)]
#[command(name = "chaostile", version, about = "Chaotic letter-tile graphics")]
struct Cli {
    /// Settings file (defaults to the platform config dir).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Read the style from this JSON file instead of the saved settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra directory to load fonts from (repeatable).
    #[arg(long = "font-dir", global = true)]
    font_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a transparent 2x PNG.
    Png(ImageArgs),
    /// Export a transparent SVG.
    Svg(ImageArgs),
    /// Render over the canvas background, as shown in the preview.
    Preview(ImageArgs),
    /// Export the animation as a transparent WebM (requires `ffmpeg` on PATH).
    Video(VideoArgs),
    /// Manage saved presets.
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Inspect or change saved settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug, Clone, Default)]
struct StyleOverrides {
    /// Main text (newlines split rows).
    #[arg(long)]
    text: Option<String>,

    /// Subtitle banner text (empty hides it).
    #[arg(long)]
    subtitle: Option<String>,

    /// Apply a saved preset (id or name) before the other overrides.
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Args, Debug)]
struct ImageArgs {
    #[command(flatten)]
    style: StyleOverrides,

    /// Output path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VideoArgs {
    #[command(flatten)]
    style: StyleOverrides,

    /// Output path (defaults to a timestamped name).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Frames per second (1-60).
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=60))]
    fps: u32,

    /// Video codec.
    #[arg(long, value_enum, default_value_t = CodecArg::Vp9)]
    codec: CodecArg,

    /// Entrance animation (defaults to the configured one, or `pop` when that is `none`).
    #[arg(long, value_enum)]
    animation: Option<AnimationArg>,

    /// Animation length in seconds.
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum PresetCommand {
    /// Save the current settings under a name.
    Save {
        /// Preset name.
        name: String,
    },
    /// List saved presets.
    List,
    /// Print a preset as JSON.
    Show {
        /// Preset id or name.
        preset: String,
    },
    /// Make a preset the current settings.
    Apply {
        /// Preset id or name.
        preset: String,
    },
    /// Delete a preset.
    Delete {
        /// Preset id or name.
        preset: String,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the current settings as JSON.
    Show,
    /// Set one setting (`tileGap 20`, `text HELLO`, `animationPreset '"pop"'`).
    Set {
        /// camelCase setting name.
        key: String,
        /// JSON value; bare words are taken as strings.
        value: String,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CodecArg {
    Vp8,
    Vp9,
}

impl From<CodecArg> for VideoCodec {
    fn from(c: CodecArg) -> Self {
        match c {
            CodecArg::Vp8 => Self::Vp8,
            CodecArg::Vp9 => Self::Vp9,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AnimationArg {
    None,
    Pop,
    Slide,
    Typewriter,
}

impl From<AnimationArg> for AnimationPreset {
    fn from(a: AnimationArg) -> Self {
        match a {
            AnimationArg::None => Self::None,
            AnimationArg::Pop => Self::Pop,
            AnimationArg::Slide => Self::Slide,
            AnimationArg::Typewriter => Self::Typewriter,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = open_store(cli.store.as_deref())?;

    match &cli.cmd {
        Command::Png(args) => cmd_image(&cli, &store, args, ImageKind::Png),
        Command::Svg(args) => cmd_image(&cli, &store, args, ImageKind::Svg),
        Command::Preview(args) => cmd_image(&cli, &store, args, ImageKind::Preview),
        Command::Video(args) => cmd_video(&cli, &store, args),
        Command::Preset(cmd) => cmd_preset(&cli, &mut store, cmd),
        Command::Settings(cmd) => cmd_settings(&mut store, cmd),
    }
}

fn open_store(path: Option<&Path>) -> anyhow::Result<JsonFileStore> {
    match path {
        Some(p) => Ok(JsonFileStore::new(p)),
        None => Ok(JsonFileStore::in_config_dir("settings.json")?),
    }
}

fn base_config(cli: &Cli, store: &dyn KeyValueStore) -> anyhow::Result<StyleConfig> {
    match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            let cfg: StyleConfig = serde_json::from_str(&text)
                .with_context(|| format!("parse config '{}'", path.display()))?;
            Ok(cfg.sanitized())
        }
        None => Ok(load_settings(store)),
    }
}

fn resolve_style(
    cli: &Cli,
    store: &dyn KeyValueStore,
    overrides: &StyleOverrides,
) -> anyhow::Result<StyleConfig> {
    let mut cfg = match &overrides.preset {
        Some(key) => find_preset(&PresetCollection::load(store), key)?
            .config
            .clone(),
        None => base_config(cli, store)?,
    };
    if let Some(text) = &overrides.text {
        cfg.text = text.replace("\\n", "\n");
    }
    if let Some(subtitle) = &overrides.subtitle {
        cfg.subtitle = subtitle.clone();
    }
    Ok(cfg.sanitized())
}

fn find_preset<'a>(
    presets: &'a PresetCollection,
    key: &str,
) -> anyhow::Result<&'a chaostile::Preset> {
    presets
        .get(key)
        .or_else(|| presets.find_by_name(key))
        .with_context(|| format!("no preset with id or name '{key}'"))
}

#[derive(Copy, Clone, Debug)]
enum ImageKind {
    Png,
    Svg,
    Preview,
}

fn cmd_image(
    cli: &Cli,
    store: &dyn KeyValueStore,
    args: &ImageArgs,
    kind: ImageKind,
) -> anyhow::Result<()> {
    let cfg = resolve_style(cli, store, &args.style)?;
    let rasterizer = Rasterizer::with_system_fonts(&cli.font_dirs);

    let (artifact, default_name) = match kind {
        ImageKind::Png | ImageKind::Svg => {
            let stage = Stage::mounted(SystemClock::new(), cfg);
            let mut exporter = Exporter::new(rasterizer, SystemClock::new());
            if let ImageKind::Png = kind {
                (
                    exporter.export_png(&stage)?,
                    chaostile::export::naming::PNG_NAME,
                )
            } else {
                (
                    exporter.export_svg(&stage)?,
                    chaostile::export::naming::SVG_NAME,
                )
            }
        }
        ImageKind::Preview => {
            let scene = Scene::build(&cfg, chaostile::AnimationState::at_rest());
            let frame = rasterizer.rasterize_scene(
                &scene,
                RasterOptions {
                    background: Some(cfg.canvas_bg),
                    ..RasterOptions::default()
                },
            )?;
            let bytes = chaostile::encode_png(&frame)?;
            (
                ExportArtifact::Png {
                    bytes,
                    width: frame.width,
                    height: frame.height,
                },
                "tile-text-preview.png",
            )
        }
    };

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name));
    artifact.write_to(&out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_video(cli: &Cli, store: &dyn KeyValueStore, args: &VideoArgs) -> anyhow::Result<()> {
    let mut cfg = resolve_style(cli, store, &args.style)?;
    match args.animation {
        Some(a) => cfg.animation_preset = a.into(),
        None if !cfg.animation_preset.is_animated() => cfg.animation_preset = AnimationPreset::Pop,
        None => {}
    }
    if let Some(d) = args.duration {
        cfg.animation_duration = d;
    }

    let out = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(chaostile::export::naming::timestamped_webm(
            chrono::Utc::now(),
        ))
    });
    let fps = Fps::integer(args.fps)?;

    let mut stage = Stage::mounted(SystemClock::new(), cfg);
    let mut exporter = Exporter::new(
        Rasterizer::with_system_fonts(&cli.font_dirs),
        SystemClock::new(),
    );
    let mut sink = FfmpegWebmSink::new(WebmSinkOpts {
        out_path: out.clone(),
        overwrite: true,
        codec: args.codec.into(),
    });

    let mut last = None;
    let summary = exporter.export_video(&mut stage, fps, &mut sink, &mut |pct| {
        if last != Some(pct) {
            eprint!("\rcapturing {pct:>3}%");
            last = Some(pct);
        }
    })?;
    eprintln!();
    eprintln!(
        "wrote {} ({} frames, {}x{})",
        out.display(),
        summary.frames,
        summary.width,
        summary.height
    );
    Ok(())
}

fn cmd_preset(
    cli: &Cli,
    store: &mut JsonFileStore,
    cmd: &PresetCommand,
) -> anyhow::Result<()> {
    let mut presets = PresetCollection::load(store);
    match cmd {
        PresetCommand::Save { name } => {
            let cfg = base_config(cli, store)?;
            let id = presets.save(name.clone(), &cfg).id.clone();
            presets.store(store)?;
            println!("{id}");
        }
        PresetCommand::List => {
            for p in presets.list() {
                println!("{}\t{}\t{}", p.id, p.created_at.to_rfc3339(), p.name);
            }
        }
        PresetCommand::Show { preset } => {
            let p = find_preset(&presets, preset)?;
            println!("{}", serde_json::to_string_pretty(&p.config)?);
        }
        PresetCommand::Apply { preset } => {
            let cfg = find_preset(&presets, preset)?.config.clone();
            let written = store_all(store, &cfg);
            eprintln!("applied preset ({written} settings stored)");
        }
        PresetCommand::Delete { preset } => {
            let id = find_preset(&presets, preset)?.id.clone();
            presets.delete(&id);
            presets.store(store)?;
            eprintln!("deleted {id}");
        }
    }
    Ok(())
}

fn cmd_settings(store: &mut JsonFileStore, cmd: &SettingsCommand) -> anyhow::Result<()> {
    let current = load_settings(store);
    match cmd {
        SettingsCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
        SettingsCommand::Set { key, value } => {
            let next = set_field(store, &current, key, value)?;
            println!("{}", serde_json::to_string_pretty(&next)?);
        }
    }
    Ok(())
}
