use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use polymark::{CyclePolicy, Driver, Frame, GridConfig, LogoLineId, ViewportFit};

#[derive(Parser, Debug)]
#[command(name = "polymark", version)]
struct Cli {
    /// Log to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default grid configuration as JSON.
    Config(ConfigArgs),
    /// Build a grid and summarize its lattice, triangulation and logo strokes.
    Describe(GridArgs),
    /// Build a grid and emit one frame per timer tick as JSON.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Write to this path instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Grid configuration JSON; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configuration's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Loop back to the start after the last stroke instead of holding.
    #[arg(long)]
    cyclic: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    grid: GridArgs,

    /// Number of timer ticks after the initial frame.
    #[arg(long, default_value_t = 6)]
    ticks: usize,

    /// Container width in pixels; with `--height`, frames are culled to the visible area.
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Container height in pixels.
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = polymark::driver::DEFAULT_INTERVAL_MS)]
    interval_ms: u64,

    /// Write to this path instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct TimedFrame {
    at_ms: u64,
    frame: Frame,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Describe(args) => cmd_describe(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &GridArgs) -> anyhow::Result<GridConfig> {
    let mut cfg = match &args.config {
        Some(path) => GridConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => GridConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.cyclic {
        cfg.policy = CyclePolicy::Cyclic;
    }
    Ok(cfg)
}

fn write_json(out: Option<&Path>, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "serialize JSON")?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "serialize JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    write_json(args.out.as_deref(), &GridConfig::default())
}

fn cmd_describe(args: GridArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let grid = polymark::create_grid(&cfg)?;

    println!("seed:          {}", grid.seed);
    println!("points:        {}", grid.points.len());
    println!("paths:         {}", grid.paths.len());
    println!("ignored paths: {}", grid.paths.iter().filter(|p| p.ignore).count());
    println!("spacing:       {:.4}", grid.info.min_delta);
    println!("noise range:   {:.4}", grid.info.noise_range);
    println!("policy:        {:?}", grid.policy);
    for id in LogoLineId::ALL {
        let line = grid.logo_line(id);
        let ids: Vec<String> = line.points.iter().map(|lp| lp.id.0.to_string()).collect();
        println!("{id}: {} points [{}]", line.points.len(), ids.join(" "));
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.grid)?;
    let grid = polymark::create_grid(&cfg)?;
    let driver = Driver {
        auto_progress: true,
        interval_ms: args.interval_ms,
    };
    let fit = match (args.width, args.height) {
        (Some(w), Some(h)) => Some(ViewportFit::cover(w, h, grid.info.svg_size)),
        _ => None,
    };

    let frames: Vec<TimedFrame> = driver
        .timeline(&grid, args.ticks)
        .into_iter()
        .map(|t| TimedFrame {
            at_ms: t.at_ms,
            frame: match &fit {
                Some(fit) => Frame::capture_in(&t.grid, fit),
                None => Frame::capture(&t.grid),
            },
        })
        .collect();

    write_json(args.out.as_deref(), &frames)
}
