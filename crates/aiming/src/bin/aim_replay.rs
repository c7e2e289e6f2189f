//! aim-replay: run recorded frames through the aiming tick loop.
//!
//! Prints one JSON object per completed vision cycle on stdout.

use std::io::Write;
use std::path::PathBuf;

use aiming::{
    AimSolution, AimingConfig, AimingSystem, CycleReport, FixedRange, ImageFileSource,
    TargetClass, TickOutcome,
};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use serde::Serialize;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClassArg {
    High,
    Middle,
}

impl From<ClassArg> for TargetClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::High => TargetClass::High,
            ClassArg::Middle => TargetClass::Middle,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "aim-replay")]
#[command(about = "Replay recorded camera frames through the goal-aiming pipeline")]
#[command(version)]
struct Cli {
    /// Image files or directories of image files, replayed in order.
    #[arg(required_unless_present = "write_default_config")]
    inputs: Vec<PathBuf>,

    /// JSON config; defaults are used for anything it leaves out.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured target class.
    #[arg(long, value_enum)]
    class: Option<ClassArg>,

    /// Constant rangefinder reading, in inches.
    #[arg(long, default_value_t = 0.0)]
    range_inches: f64,

    /// Write the default config to this path and exit.
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Log verbosity for stderr output.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Emit tracing spans as JSON (filtered by `RUST_LOG`) instead of plain log lines.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    tracing_json: bool,
}

#[derive(Serialize)]
struct CycleLine<'a> {
    frame: Option<String>,
    #[serde(flatten)]
    report: &'a CycleReport,
    bearing_degrees: f64,
    distance_inches: f64,
    aimed: bool,
    solution: Option<AimSolution>,
}

fn init_logging(cli: &Cli) -> CliResult<()> {
    #[cfg(feature = "tracing")]
    {
        if cli.tracing_json {
            aiming::core::init_tracing(true);
            return Ok(());
        }
    }
    aiming::core::init_with_level(cli.log_level)?;
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if let Some(path) = &cli.write_default_config {
        AimingConfig::default().write_json(path)?;
        info!("default config written to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AimingConfig::load_json(path)?,
        None => AimingConfig::default(),
    };
    if let Some(class) = cli.class {
        config.active_class = class.into();
    }

    let source = ImageFileSource::from_inputs(&cli.inputs)?;
    info!(
        "replaying {} frames against the {} goal",
        source.remaining(),
        config.active_class
    );
    let mut system = AimingSystem::new(source, FixedRange(cli.range_inches), config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while system.pipeline().source().remaining() > 0 || !system.pipeline().is_idle() {
        if !matches!(system.tick(), TickOutcome::Completed(_)) {
            continue;
        }
        let Some(report) = system.last_report() else {
            continue;
        };
        let line = CycleLine {
            frame: system
                .pipeline()
                .source()
                .current()
                .map(|p| p.display().to_string()),
            report,
            bearing_degrees: system.bearing_degrees(),
            distance_inches: system.distance_inches(),
            aimed: system.is_aimed(),
            solution: system.aim_solution(),
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    info!(
        "{} cycles completed, {} abandoned",
        system.pipeline().cycles_completed(),
        system.pipeline().cycles_abandoned()
    );
    Ok(())
}
