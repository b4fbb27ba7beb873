use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use taperbeam::{render_summary, LoadDirection, Scenario, StressField, Summary};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Bending stress in a tapered cantilever under a single point load.
#[derive(Debug, Parser)]
#[command(name = "taperbeam", version, about, long_about = None)]
struct Cli {
    /// JSON scenario file; the reference beam is used when omitted.
    #[arg(short, long, env = "TAPERBEAM_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Load position from the fixed end in millimetres.
    #[arg(long)]
    load_x: Option<f64>,

    /// Load magnitude in newtons.
    #[arg(short, long, allow_negative_numbers = true)]
    magnitude: Option<f64>,

    /// Load direction.
    #[arg(short, long, value_enum)]
    direction: Option<Direction>,

    /// Material yield strength in MPa.
    #[arg(long)]
    yield_strength: Option<f64>,

    /// Also sample the full field at this spacing in millimetres and report its peak.
    #[arg(long)]
    field_step: Option<f64>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "TAPERBEAM_LOG", default_value = "warn")]
    log_level: String,
}

/// Load direction as spelled on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    /// Towards the bottom fibre.
    Down,
    /// Towards the top fibre.
    Up,
}

impl From<Direction> for LoadDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Down => LoadDirection::Downward,
            Direction::Up => LoadDirection::Upward,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so that stdout carries only the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };

    // Command-line values override the scenario file.
    if let Some(position_x) = cli.load_x {
        scenario.load.position_x = position_x;
    }
    if let Some(magnitude) = cli.magnitude {
        scenario.load.magnitude = magnitude;
    }
    if let Some(direction) = cli.direction {
        scenario.load.direction = direction.into();
    }
    if let Some(yield_strength) = cli.yield_strength {
        scenario.material.yield_strength = yield_strength;
    }
    scenario.validate()?;
    info!(load = ?scenario.load, material = %scenario.material.name, "evaluating scenario");

    let evaluator = scenario.evaluator();
    let summary = Summary::evaluate(&evaluator, &scenario.load, &scenario.material);

    let field_peak = match cli.field_step {
        Some(step) => StressField::sample(&evaluator, &scenario.load, step)?.peak(),
        None => None,
    };

    if cli.json {
        let output = serde_json::json!({
            "summary": summary,
            "field_peak": field_peak,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_summary(&summary, field_peak.as_ref()));
    }

    Ok(())
}
