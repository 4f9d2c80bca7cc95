//! CLI interface for rota.
//!
//! Every subcommand is non-interactive: cadence flags in, rendered roster out.
//! Flags that are left out fall back to the last saved cadence, then to the
//! defaults (14x7, induction 5, 30 days).

mod format;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::config::{Config, ConfigStore};
use crate::model::{Cadence, Schedule, Supervisor};
use crate::{export, roster, stats};

use format::{format_analytics, format_grid, format_verification};

/// Rota: three-supervisor rotation planner.
#[derive(Debug, Parser)]
#[command(name = "rota", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Config file holding the last-used cadence.
    /// Defaults to `~/.rota/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions (directives, hand-overs) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow:
  1. rota generate --work 14 --rest 7 --induction 5 --horizon 40
     → prints the roster grid and saves the cadence
  2. rota stats
     → workload per supervisor for the saved cadence
  3. rota generate --format csv --out roster.csv
  4. rota verify
     → runs the reference scenarios and checks coverage";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a roster and print it.
    ///
    /// The cadence used is saved for next time unless `--no-save` is given.
    Generate {
        #[command(flatten)]
        cadence: CadenceArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Grid)]
        format: OutputFormat,

        /// Write to this file instead of stdout. A directory gets
        /// `supervisor_schedule_<horizon>d.csv`.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Do not remember this cadence.
        #[arg(long)]
        no_save: bool,
    },

    /// Show drilling, rest, and travel days per supervisor.
    Stats {
        #[command(flatten)]
        cadence: CadenceArgs,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Run reference scenarios and check coverage and determinism.
    ///
    /// With any cadence flag, verifies that single cadence instead.
    /// Exits non-zero if any scenario has violations.
    Verify {
        #[command(flatten)]
        cadence: CadenceArgs,
    },

    /// Inspect or reset the saved cadence.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the saved cadence.
    Show,
    /// Print the config file path.
    Path,
    /// Delete the saved cadence.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Status grid with legend and error summary.
    Grid,
    /// One row per day, spreadsheet friendly.
    Csv,
    /// Full schedule with fingerprint.
    Json,
}

/// Cadence flags shared by every command that computes a roster.
#[derive(Debug, Clone, Default, Args)]
pub struct CadenceArgs {
    /// Days on site per cycle.
    #[arg(long, short = 'n')]
    work: Option<usize>,

    /// Days off per cycle, travel days included (at least 2).
    #[arg(long, short = 'm')]
    rest: Option<usize>,

    /// One-time induction days before the first shift.
    #[arg(long, short = 'i')]
    induction: Option<usize>,

    /// Days to simulate (at least 15).
    #[arg(long, short = 'd')]
    horizon: Option<usize>,
}

impl CadenceArgs {
    fn is_empty(&self) -> bool {
        self.work.is_none()
            && self.rest.is_none()
            && self.induction.is_none()
            && self.horizon.is_none()
    }

    /// Overlay the given flags on `base`.
    fn apply(&self, base: Cadence) -> Cadence {
        Cadence {
            work_days: self.work.unwrap_or(base.work_days),
            rest_days: self.rest.unwrap_or(base.rest_days),
            induction_days: self.induction.unwrap_or(base.induction_days),
            horizon_days: self.horizon.unwrap_or(base.horizon_days),
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli) -> Result<(), String> {
    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::new(
            ConfigStore::default_path().ok_or("could not determine home directory")?,
        ),
    };

    match cli.command {
        Command::Generate {
            cadence,
            format,
            out,
            no_save,
        } => cmd_generate(&store, &cadence, format, out, no_save),
        Command::Stats { cadence, json } => cmd_stats(&store, &cadence, json),
        Command::Verify { cadence } => cmd_verify(&store, &cadence),
        Command::Config { command } => match command {
            ConfigCommand::Show => cmd_config_show(&store),
            ConfigCommand::Path => {
                println!("{}", store.path().display());
                Ok(())
            }
            ConfigCommand::Clear => cmd_config_clear(&store),
        },
    }
}

/// Resolve flags against the saved cadence and validate the result.
fn resolve_cadence(store: &ConfigStore, args: &CadenceArgs) -> Result<Cadence, String> {
    let base = store
        .load()
        .map_err(|e| e.to_string())?
        .map(|c| c.cadence)
        .unwrap_or_default();

    let cadence = args.apply(base);
    cadence
        .validate()
        .map_err(|e| format!("invalid cadence: {e}"))?;

    if !cadence.within_coverage_envelope() {
        warn!(
            cadence = %cadence.describe(),
            "work days below 2 x induction + 2: ramp-up cannot reach two-person coverage"
        );
    }
    Ok(cadence)
}

fn cmd_generate(
    store: &ConfigStore,
    args: &CadenceArgs,
    format: OutputFormat,
    out: Option<PathBuf>,
    no_save: bool,
) -> Result<(), String> {
    let cadence = resolve_cadence(store, args)?;
    let schedule = roster::run(&cadence);
    let out = out.map(|path| {
        if path.is_dir() {
            path.join(export::default_file_name(&schedule))
        } else {
            path
        }
    });

    match (format, out) {
        (OutputFormat::Csv, Some(path)) => {
            export::write_csv(&path, &schedule)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            eprintln!("Roster written → {}", path.display());
        }
        (format, out) => {
            let rendered = render(&schedule, format)?;
            match out {
                Some(path) => {
                    fs::write(&path, rendered)
                        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                    eprintln!("Roster written → {}", path.display());
                }
                None => print!("{rendered}"),
            }
        }
    }

    if !no_save {
        store
            .save(&Config::new(cadence))
            .map_err(|e| format!("failed to save config: {e}"))?;
    }

    Ok(())
}

fn render(schedule: &Schedule, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Grid => Ok(format_grid(schedule)),
        OutputFormat::Csv => Ok(export::to_csv(schedule)),
        OutputFormat::Json => export::to_json(schedule)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| format!("failed to serialize schedule: {e}")),
    }
}

fn cmd_stats(store: &ConfigStore, args: &CadenceArgs, json: bool) -> Result<(), String> {
    let cadence = resolve_cadence(store, args)?;
    let analytics = stats::analyze(&roster::run(&cadence));

    if json {
        let rendered = serde_json::to_string_pretty(&analytics)
            .map_err(|e| format!("failed to serialize stats: {e}"))?;
        println!("{rendered}");
    } else {
        print!("{}", format_analytics(&analytics));
    }
    Ok(())
}

/// Cadences exercised by `rota verify` when no flags are given.
pub const REFERENCE_SCENARIOS: [Cadence; 5] = [
    Cadence::new(14, 7, 5, 40),
    Cadence::new(21, 7, 3, 60),
    Cadence::new(10, 5, 2, 30),
    Cadence::new(14, 6, 4, 40),
    Cadence::new(7, 7, 1, 30),
];

/// Outcome of verifying one cadence.
#[derive(Debug, Clone)]
pub struct Verification {
    pub schedule: Schedule,
    pub fingerprint: String,
    pub deterministic: bool,
    pub longest_stint: usize,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.deterministic && self.schedule.is_valid()
    }
}

/// Run a cadence twice and compare fingerprints.
pub fn verify(cadence: &Cadence) -> Result<Verification, String> {
    let schedule = roster::run(cadence);
    let fingerprint = export::fingerprint(&schedule).map_err(|e| e.to_string())?;
    let rerun = export::fingerprint(&roster::run(cadence)).map_err(|e| e.to_string())?;
    let longest_stint = schedule
        .longest_stint(Supervisor::Second)
        .max(schedule.longest_stint(Supervisor::Third));

    Ok(Verification {
        deterministic: fingerprint == rerun,
        schedule,
        fingerprint,
        longest_stint,
    })
}

fn cmd_verify(store: &ConfigStore, args: &CadenceArgs) -> Result<(), String> {
    let cadences = if args.is_empty() {
        REFERENCE_SCENARIOS.to_vec()
    } else {
        vec![resolve_cadence(store, args)?]
    };

    let mut failed = 0;
    for cadence in &cadences {
        let verification = verify(cadence)?;
        if !verification.passed() {
            failed += 1;
        }
        print!("{}", format_verification(&verification));
    }

    if failed > 0 {
        return Err(format!("{failed} of {} scenario(s) failed", cadences.len()));
    }
    Ok(())
}

fn cmd_config_show(store: &ConfigStore) -> Result<(), String> {
    let Some(config) = store.load().map_err(|e| e.to_string())? else {
        println!("No saved cadence ({})", store.path().display());
        return Ok(());
    };

    let cadence = config.cadence;
    println!("work days:      {}", cadence.work_days);
    println!("rest days:      {}", cadence.rest_days);
    println!("induction days: {}", cadence.induction_days);
    println!("horizon days:   {}", cadence.horizon_days);
    if let Some(saved_at) = config.saved_at {
        println!("saved at:       {saved_at}");
    }
    Ok(())
}

fn cmd_config_clear(store: &ConfigStore) -> Result<(), String> {
    let removed = store
        .clear()
        .map_err(|e| format!("failed to clear config: {e}"))?;
    if removed {
        println!("Cleared {}", store.path().display());
    } else {
        println!("Nothing saved at {}", store.path().display());
    }
    Ok(())
}
