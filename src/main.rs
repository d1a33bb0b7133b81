use std::{fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use pentad::{
    composer::{
        run_to_completion, Composer, ComposerConfig, FrameClock, SimulatedClock, WallClock,
    },
    scene::MemoryRenderer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pentad",
    about = "Replay position swaps on the pentad figure and print the resulting permutations."
)]
struct Cli {
    /// TOML configuration file, merged over the defaults and under PENTAD_* variables.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Positions to swap, 1-based, e.g. `--swap 3,5`. Repeat for several swaps.
    #[arg(long = "swap", value_name = "A,B", value_parser = parse_swap)]
    swaps: Vec<(usize, usize)>,
    /// Write the final scene as SVG.
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,
    /// Simulated frame period in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,
    /// Settle labels before moving anchors.
    #[arg(long)]
    multi_stage: bool,
    /// Run in real time instead of simulating frames.
    #[arg(long)]
    realtime: bool,
}

fn parse_swap(text: &str) -> Result<(usize, usize), String> {
    let (a, b) = text
        .split_once(',')
        .ok_or_else(|| format!("expected two positions separated by a comma, got `{text}`"))?;
    let parse = |s: &str| -> Result<usize, String> {
        match s.trim().parse::<usize>() {
            Ok(k) if (1..=6).contains(&k) => Ok(k - 1),
            _ => Err(format!("`{s}` is not a position between 1 and 6")),
        }
    };
    let (a, b) = (parse(a)?, parse(b)?);
    if a == b {
        return Err(format!("cannot swap position {} with itself", a + 1));
    }
    Ok((a, b))
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    ensure!(cli.frame_ms > 0.0, "--frame-ms must be positive");

    let figment = ComposerConfig::figment(cli.config.as_deref());
    let mut config = ComposerConfig::from_figment(&figment).context("invalid configuration")?;
    config.multi_stage |= cli.multi_stage;

    let mut composer =
        Composer::new(config, MemoryRenderer::new()).context("failed to build the scene")?;
    let mut simulated = SimulatedClock::new(0.0, cli.frame_ms);
    let mut wall = WallClock::new(Duration::from_secs_f64(cli.frame_ms / 1000.0));

    for &(a, b) in &cli.swaps {
        composer.toggle(a)?;
        composer.toggle(b)?;
        let clock: &mut dyn FrameClock = if cli.realtime {
            &mut wall
        } else {
            &mut simulated
        };
        let frames = run_to_completion(&mut composer, clock)
            .with_context(|| format!("swap of positions {} and {}", a + 1, b + 1))?;
        info!(frames, "swap finished");
        println!(
            "swap {}{}: phi = {} psi = {}",
            a + 1,
            b + 1,
            or_unit(composer.phi().cycle_notation()),
            or_unit(composer.psi().cycle_notation()),
        );
    }

    if let Some(path) = &cli.svg {
        let svg = composer.renderer().svg(composer.layout().view_box());
        fs::write(path, svg.to_string())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn or_unit(cycles: &str) -> &str {
    if cycles.is_empty() {
        "()"
    } else {
        cycles
    }
}
