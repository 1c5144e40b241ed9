//! CLI interface for the probe.
//!
//! `probe run` flies a mission and analyzes its log. Anything not given as a
//! flag is asked for interactively. `probe analyze` summarizes an existing log
//! without flying. With no subcommand, `probe` behaves like `probe run`.

mod format;
mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analysis;
use crate::config::Config;
use crate::mission::Mission;
use crate::model::Planet;

use format::{AnalysisJson, MissionJson, describe_analysis_error, format_mission, format_summary};
use prompt::Prompter;

/// Probe: fly a space probe and analyze what it saw.
#[derive(Debug, Parser)]
#[command(name = "probe", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Config file (defaults to `~/.probe/config.toml` when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const USAGE_HELP: &str = r"Examples:
  probe                                   interactive mission
  probe run --task 1 --planet mars --planet jupiter --planet saturn --no-delay
  probe analyze space_probe_data.txt --json

Tasks: 1 Sample Collection, 2 Photograph Surface, 3 Analyze Atmosphere, 4 Repair Space Probe";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fly a mission, write its log, and analyze it.
    Run(RunArgs),

    /// Analyze an existing mission log.
    Analyze {
        /// Log to analyze (defaults to the configured output path).
        path: Option<PathBuf>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Write the mission log here instead of the configured path.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Task to perform on every planet (1-4). Other numbers perform no task.
    #[arg(long, allow_negative_numbers = true)]
    pub task: Option<i64>,

    /// Planet for the next leg, by name or menu number. Repeat once per leg.
    #[arg(long)]
    pub planet: Vec<Planet>,

    /// Skip the simulated flight delays.
    #[arg(long)]
    pub no_delay: bool,

    /// Print the mission outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        None => cmd_run(config, RunArgs::default()),
        Some(Command::Run(args)) => cmd_run(config, args),
        Some(Command::Analyze { path, json }) => {
            cmd_analyze(path.unwrap_or(config.output), json)
        }
    }
}

fn cmd_run(mut config: Config, args: RunArgs) -> Result<(), String> {
    if let Some(out) = args.out {
        config.output = out;
    }
    if args.no_delay {
        config.travel_delay_ms = 0;
        config.settle_delay_ms = 0;
    }

    let report = {
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout(), args.task, args.planet);
        Mission::new(&config)
            .run(&mut prompter)
            .map_err(|e| e.to_string())?
    };

    let text = if args.json {
        serde_json::to_string_pretty(&MissionJson::new(&report))
            .map_err(|e| format!("failed to serialize mission: {e}"))?
    } else {
        format_mission(&report)
    };
    print_line(&text)
}

fn cmd_analyze(path: PathBuf, json: bool) -> Result<(), String> {
    let analysis = analysis::analyze_file(&path);

    if json {
        let text = serde_json::to_string_pretty(&AnalysisJson::new(&path, &analysis))
            .map_err(|e| format!("failed to serialize analysis: {e}"))?;
        print_line(&text)?;
    }

    match &analysis {
        Ok(summary) => {
            if !json {
                print_line(&format_summary(summary))?;
            }
            Ok(())
        }
        Err(e) => Err(format!(
            "{} ({}: {e})",
            describe_analysis_error(e),
            path.display()
        )),
    }
}

fn print_line(text: &str) -> Result<(), String> {
    writeln!(io::stdout(), "{text}").map_err(|e| format!("failed to write output: {e}"))
}
