use airscore::config::CardOverrides;
use airscore::types::config::Override;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "airscore",
    version,
    about = "Weighted indoor air-quality score from home-automation sensor snapshots"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the gauge card
    Card(EvaluateCommand),
    /// Render the card with per-category points and value sources
    Breakdown(EvaluateCommand),
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// JSON state snapshot (entity id to state map, or state array)
    pub states: PathBuf,
    /// Card config (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Sensor slug; readings are looked up as sensor.<slug>_<metric>
    #[arg(long)]
    pub slug: Option<String>,
    /// Helper entity holding a precomputed percentage
    #[arg(long)]
    pub pct_entity: Option<String>,
    /// Temperature override: entity id or number in the display unit
    #[arg(long, value_parser = parse_override)]
    pub temp: Option<Override>,
    /// Humidity override: entity id or number
    #[arg(long, value_parser = parse_override)]
    pub hum: Option<Override>,
    /// Temperatures are given and shown in Fahrenheit
    #[arg(long)]
    pub fahrenheit: bool,
    /// Exit with code 1 when any reading fell back to its default
    #[arg(long)]
    pub strict: bool,
}

impl EvaluateCommand {
    pub fn overrides(&self) -> CardOverrides {
        CardOverrides {
            slug: self.slug.clone(),
            pct_entity: self.pct_entity.clone(),
            temp_value: self.temp.clone(),
            hum_value: self.hum.clone(),
            use_fahrenheit: self.fahrenheit,
        }
    }
}

fn parse_override(value: &str) -> Result<Override, String> {
    Ok(Override::parse(value))
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
