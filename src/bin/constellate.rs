use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "constellate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample a phrase and print its point graph as JSON.
    Sample(SampleArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the whole reveal as an MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Phrase to animate.
    #[arg(long, conflicts_with = "query", required_unless_present = "query")]
    text: Option<String>,

    /// Query string or URL carrying the phrase as `input=...` (auto-starts after a delay).
    #[arg(long)]
    query: Option<String>,

    /// TTF/OTF font file. Without one, glyphs are drawn as solid blocks.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Fallback font for characters the primary font lacks (repeatable, in priority order).
    #[arg(long = "fallback-font", requires = "font")]
    fallback_fonts: Vec<PathBuf>,

    /// Animation config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shuffle seed for a reproducible point order.
    #[arg(long)]
    seed: Option<u64>,

    /// Logical canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Logical canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Device pixel ratio.
    #[arg(long)]
    pixel_ratio: Option<f64>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Elapsed reveal time in milliseconds; defaults to the end of the reveal.
    #[arg(long)]
    elapsed_ms: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path, or a directory when `--png-seq` is set.
    #[arg(long)]
    out: PathBuf,

    /// Write numbered PNG frames into `--out` instead of an MP4.
    #[arg(long)]
    png_seq: bool,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Reveal duration in milliseconds.
    #[arg(long)]
    duration_ms: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

/// Phrase plus its auto-start when it came from a query prefill.
struct Phrase {
    text: String,
    auto_start: Option<constellate::AutoStart>,
}

fn resolve_phrase(input: &InputArgs, auto_start_delay_ms: f64) -> anyhow::Result<Phrase> {
    if let Some(text) = &input.text {
        return Ok(Phrase {
            text: text.clone(),
            auto_start: None,
        });
    }
    let query = input.query.as_deref().unwrap_or_default();
    let auto = constellate::AutoStart::from_query(query, auto_start_delay_ms)
        .with_context(|| format!("no `input` parameter in query '{query}'"))?;
    Ok(Phrase {
        text: auto.text.clone(),
        auto_start: Some(auto),
    })
}

fn load_config(input: &InputArgs) -> anyhow::Result<constellate::AnimationConfig> {
    let mut cfg = match &input.config {
        Some(path) => constellate::AnimationConfig::from_path(path)?,
        None => constellate::AnimationConfig::default(),
    };
    if let Some(seed) = input.seed {
        cfg.seed = Some(seed);
    }
    if let Some(w) = input.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = input.height {
        cfg.canvas.height = h;
    }
    if let Some(r) = input.pixel_ratio {
        cfg.pixel_ratio = r;
    }
    Ok(cfg)
}

fn load_glyphs(input: &InputArgs) -> anyhow::Result<Box<dyn constellate::GlyphSource>> {
    match &input.font {
        Some(path) => {
            let font = constellate::ParleyFont::from_paths(path, &input.fallback_fonts)
                .with_context(|| format!("load font '{}'", path.display()))?;
            tracing::info!(families = ?font.families(), weight = font.weight(), "using font");
            Ok(Box::new(font))
        }
        None => Ok(Box::new(constellate::BlockGlyphs::default())),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.input)?;
    let phrase = resolve_phrase(&args.input, cfg.auto_start_delay_ms)?;
    let mut glyphs = load_glyphs(&args.input)?;

    let graph = constellate::sample_with_config(&cfg, &mut glyphs, &phrase.text)?;
    let json = graph.to_json()?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!(
                "wrote {} ({} glyphs, {} points, {} edges)",
                out.display(),
                graph.len(),
                graph.point_count(),
                graph.edge_count()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.input)?;
    let phrase = resolve_phrase(&args.input, cfg.auto_start_delay_ms)?;
    let mut glyphs = load_glyphs(&args.input)?;

    let elapsed = args.elapsed_ms.unwrap_or(cfg.duration_ms);
    let frame = constellate::render_frame_at(&cfg, &mut glyphs, &phrase.text, elapsed)?;
    constellate::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.input)?;
    let phrase = resolve_phrase(&args.input, cfg.auto_start_delay_ms)?;
    if let Some(fps) = args.fps {
        cfg.fps = constellate::Fps::new(fps, 1)?;
    }
    if let Some(d) = args.duration_ms {
        cfg.duration_ms = d;
    }
    let glyphs = load_glyphs(&args.input)?;
    let opts = constellate::RenderPhraseOpts {
        auto_start: phrase.auto_start,
    };

    let stats = if args.png_seq {
        let mut sink = constellate::PngSequenceSink::new(&args.out, "frame_");
        constellate::render_phrase(&cfg, glyphs, &phrase.text, opts, &mut sink)?
    } else {
        let mut sink = constellate::FfmpegSink::new(
            constellate::FfmpegSinkOpts::new(&args.out).with_background(cfg.background),
        );
        constellate::render_phrase(&cfg, glyphs, &phrase.text, opts, &mut sink)?
    };

    if stats.frames == 0 {
        eprintln!("nothing to render: phrase is blank");
    } else {
        eprintln!(
            "wrote {} ({} frames, {} glyphs, {} edges)",
            args.out.display(),
            stats.frames,
            stats.glyphs,
            stats.edges
        );
    }
    Ok(())
}
