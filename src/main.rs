mod actions;
mod cli;
mod config;
mod error;
mod jenkins;
mod workflow;

use std::process::ExitCode;

use actions::{ActionsContext, RunContext, TerminalContext};
use clap::Parser;
use cli::Cli;
use config::ClientSettings;
use error::TriggerError;
use workflow::{State, TriggerRun};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx: Box<dyn RunContext> = if actions::running_in_actions() {
        Box::new(ActionsContext::new())
    } else {
        Box::new(TerminalContext::new(cli.verbose))
    };

    let mut run = TriggerRun::new();
    let outcome = match ClientSettings::load(cli.config.as_deref()) {
        Ok(settings) => workflow::run(&mut run, ctx.as_ref(), &settings, &cli.overrides()).await,
        Err(e) => Err(TriggerError::Configuration(format!("{e:#}"))),
    };

    match workflow::report(ctx.as_ref(), &mut run, outcome) {
        State::Succeeded => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
