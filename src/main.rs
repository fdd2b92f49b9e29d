use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use petalfield::{render_frames, AppConfig, Day, RenderOptions};

#[derive(Parser)]
#[command(name = "petalfield", version, about = "A week-of-love storybook with reactive particle fields")]
struct Cli {
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the storybook window (default)
    Run {
        /// Day to open on
        #[arg(short, long)]
        day: Option<Day>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible particles
        #[arg(long)]
        seed: Option<u64>,

        /// Log sound cues instead of playing them
        #[arg(long)]
        no_audio: bool,
    },

    /// Render one day to numbered PNG frames without a window
    Render {
        #[arg(short, long, default_value = "rose")]
        day: Day,

        #[arg(short, long, default_value_t = 60)]
        frames: u32,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        out: PathBuf,

        #[arg(long, default_value_t = 640)]
        width: u32,

        #[arg(long, default_value_t = 400)]
        height: u32,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the bare particle layer with alpha
        #[arg(long)]
        transparent: bool,

        /// Frames between scripted bursts, 0 for none
        #[arg(long, default_value_t = 20)]
        burst_every: u32,
    },

    /// Print the default config as JSON
    DumpConfig,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Info,
        (false, 2) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet || verbose > 0 {
        builder.filter_module("petalfield", level);
    }
    builder.init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command.unwrap_or(Command::Run {
        day: None,
        config: None,
        seed: None,
        no_audio: false,
    }) {
        Command::Run {
            day,
            config,
            seed,
            no_audio,
        } => {
            let mut config = load_config(config.as_ref())?;
            if let Some(day) = day {
                config.start_day = day;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            if no_audio || cli.quiet {
                config.audio = false;
            }
            petalfield::run(config)?;
        }
        Command::Render {
            day,
            frames,
            out,
            width,
            height,
            seed,
            config,
            transparent,
            burst_every,
        } => {
            let config = load_config(config.as_ref())?;
            let options = RenderOptions {
                day,
                frames,
                width,
                height,
                seed: seed.or(config.seed),
                burst_every,
                transparent,
            };
            let report = render_frames(&config, &options, &out)
                .with_context(|| format!("failed to render {day}"))?;
            println!("wrote {} frames to {}", report.frames.len(), out.display());
        }
        Command::DumpConfig => {
            println!("{}", AppConfig::default().to_json()?);
        }
    }
    Ok(())
}
