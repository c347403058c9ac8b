use crate::demo::{run_demo, DemoArgs};
use crate::replay::{run_replay, ReplayArgs};
use clap::{Parser, Subcommand};
use guest_registration::config::AppConfig;
use guest_registration::error::AppError;
use guest_registration::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Riad Check-in",
    about = "Drive the guest registration form engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through a scripted two-guest registration (default command)
    Demo(DemoArgs),
    /// Apply a JSON event script to a fresh form and submit it
    Replay(ReplayArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.form, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, config.form),
        Command::Replay(args) => run_replay(args, config.form),
    }
}
