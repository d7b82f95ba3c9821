use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scene-move", version)]
struct Cli {
    /// Log engine decisions to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and print every frame as a JSON line.
    Simulate(SimulateArgs),
    /// Parse a transform summary and print it normalized.
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scenario JSON.
    scenario: PathBuf,

    /// Override the scenario's tick rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Print only the last frame.
    #[arg(long)]
    last: bool,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// Summary text, e.g. "pos: x 10 y 20 rot: 0.0 ...".
    text: String,

    /// Print the parsed transform as JSON instead.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn read_scenario(path: &Path) -> anyhow::Result<scene_move::Scenario> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read scenario '{}'", path.display()))?;
    let scenario = scene_move::Scenario::from_json(&json)
        .with_context(|| format!("load scenario '{}'", path.display()))?;
    Ok(scenario)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut scenario = read_scenario(&args.scenario)?;
    if let Some(fps) = args.fps {
        scenario.fps = fps;
    }
    let mut sim = scene_move::Simulation::new(&scenario).context("set up simulation")?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut last = None;
    while let Some(frame) = sim.step().context("simulate")? {
        if args.last {
            last = Some(frame);
        } else {
            serde_json::to_writer(&mut out, &frame).context("write frame")?;
            writeln!(out)?;
        }
    }
    if let Some(frame) = last {
        serde_json::to_writer(&mut out, &frame).context("write frame")?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let snapshot = scene_move::parse_summary(&args.text).context("parse summary")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", scene_move::format_summary(&snapshot));
    }
    Ok(())
}
