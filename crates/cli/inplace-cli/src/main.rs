//! make-inplace: pin a rig's root translation so a clip plays in place.
//!
//! Usage:
//!   make-inplace <input> <output> [mode...] [--debug] [--strict] [--config <file>]
//! Example:
//!   make-inplace walk.json walk_inplace.json both --debug

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inplace_core::{Config, InPlace, Mode, RunOptions, RunOutcome};
use inplace_scene::Axis;

#[derive(Parser, Debug)]
#[command(name = "make-inplace", version)]
#[command(about = "Remove root motion from a skeletal animation so it plays in place")]
#[command(after_help = modes_help())]
struct Cli {
    /// Scene document to read
    input: PathBuf,

    /// Where to write the edited scene (the input is never modified)
    output: PathBuf,

    /// Axes to flatten (default: both); unknown modes remove nothing unless
    /// --strict is set. When several are given the last one wins.
    #[arg(value_name = "MODE")]
    modes: Vec<String>,

    /// Show the scene hierarchy while searching for the root bone
    #[arg(long)]
    debug: bool,

    /// Reject unrecognized modes
    #[arg(long)]
    strict: bool,

    /// JSON run configuration (root bone candidates, strict mode, pretty output)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn mode(&self) -> String {
        self.modes
            .last()
            .cloned()
            .unwrap_or_else(|| Mode::default().to_string())
    }

    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)
                .with_context(|| format!("read config {}", path.display()))?,
            None => Config::default(),
        };
        config.strict_mode |= self.strict;
        Ok(config)
    }

    fn run_options(&self) -> RunOptions {
        RunOptions {
            mode: self.mode(),
            debug: self.debug,
        }
    }
}

fn modes_help() -> String {
    let mut help = String::from("Modes:\n");
    for mode in Mode::ALL {
        help.push_str(&format!("  {:<9} - {}\n", mode.as_str(), mode.describe()));
    }
    help
}

fn print_summary(outcome: &RunOutcome) {
    let report = &outcome.report;
    println!("\nAnimation Info:");
    println!(
        "  Frame range: {} to {}",
        report.frame_range.start, report.frame_range.stop
    );
    println!("  Frame rate: {}", report.frame_rate);
    println!("  Root bone: {}", report.root_bone);
    if !outcome.root_bone.verified {
        println!(
            "  (matched by name only; node type is {})",
            outcome.root_bone.type_name
        );
    }
    println!("\nProcessed {} frames", report.frames_processed());
    println!("  Removed lateral (X): {}", report.policy.remove_lateral);
    println!("  Removed upward (Y): {}", report.policy.remove_upward);
    println!("  Removed forward (Z): {}", report.policy.remove_forward);
    if !report.policy.removes_anything() {
        println!("  (mode removes no axes)");
    }
    for axis in Axis::ALL {
        let stats = report.axis(axis);
        if stats.curve_present {
            log::info!(
                "{axis}: {} keys touched ({} inserted)",
                stats.keys_touched(),
                stats.keys_inserted
            );
        }
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let cli = Cli::parse();
    let config = cli.load_config()?;
    let runner = InPlace::json(config);

    println!("Loading {}...", cli.input.display());
    let mut header_printed = false;
    let outcome = runner
        .run(&cli.input, &cli.output, &cli.run_options(), |line| {
            if !header_printed {
                println!("\n=== Scene Hierarchy ===");
                header_printed = true;
            }
            println!("{line}");
        })
        .map_err(|err| {
            log::debug!("{} failure: {err:?}", err.category());
            if let Some(hint) = err.hint() {
                eprintln!("{hint}");
            }
            if err.after_edit() {
                eprintln!("The edited animation was not saved; the input is unchanged.");
            }
            err
        })
        .with_context(|| {
            format!(
                "make {} in-place (mode: {})",
                cli.input.display(),
                cli.mode()
            )
        })?;

    print_summary(&outcome);
    println!("\nSaved to {}", cli.output.display());
    println!("Success! Animation is now in-place.");
    Ok(())
}
