mod cli;

use airscore::card::build_card;
use airscore::config;
use airscore::error::AirscoreError;
use airscore::logging;
use airscore::readings::StateSnapshot;
use airscore::report::{self, Detail};
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, AirscoreError> {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    let (cmd, detail) = match cli.command {
        cli::Commands::Card(cmd) => (cmd, Detail::Card),
        cli::Commands::Breakdown(cmd) => (cmd, Detail::Breakdown),
    };

    let mut card_config = config::load_config(cmd.config.as_deref())?;
    cmd.overrides().apply(&mut card_config);
    card_config.validate()?;

    let snapshot = StateSnapshot::load(&cmd.states)?;
    let card = build_card(&card_config, &snapshot);

    let output_format = match cmd.format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    };
    let rendered = report::render(&card, output_format, detail)?;
    println!("{rendered}");

    let defaulted = card.defaulted_readings();
    if defaulted > 0 {
        if !cli.quiet {
            eprintln!("warning: {defaulted} reading(s) unresolved, defaults applied");
        }
        if cmd.strict {
            return Ok(exit_code::WARNINGS);
        }
    }

    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
