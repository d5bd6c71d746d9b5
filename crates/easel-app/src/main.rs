//! Headless host entry point.
//!
//! Replays a JSON event script against a picture editing session and prints
//! what the session sent back to the host.

mod runner;
mod script;

use clap::Parser;
use easel_core::SessionConfig;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::runner::Runner;
use crate::script::Script;

#[derive(Debug, Parser)]
#[command(name = "easel", about = "Replay an event script against a picture editing session")]
struct Args {
    /// Script to replay.
    script: PathBuf,

    /// Session config (defaults to the per-user config location).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<PathBuf>) -> easel_core::ConfigResult<SessionConfig> {
    let path = match path {
        Some(path) => path,
        None => SessionConfig::default_location()?,
    };
    SessionConfig::load_or_default(&path)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting Easel headless host");

    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let script = match Script::load(&args.script) {
        Ok(script) => script,
        Err(e) => {
            log::error!("Failed to load script: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = Runner::new(config).run(script);
    for event in &report.events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize event: {}", e),
        }
    }
    match serde_json::to_string_pretty(&report.session) {
        Ok(session) => println!("{}", session),
        Err(e) => {
            log::error!("Failed to serialize session: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
