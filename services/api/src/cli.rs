use crate::commands::{run_assess, run_match, run_predict, AssessArgs, MatchArgs, PredictArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use care_triage::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Care Triage",
    about = "Score intake risk, match providers, and flag disengaging cases from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single intake submission read from a JSON file
    Assess(AssessArgs),
    /// Rank providers from a roster CSV for a case read from a JSON file
    Match(MatchArgs),
    /// Estimate dropout risk from an engagement history JSON file
    Predict(PredictArgs),
    /// Run a scripted intake, matching, and follow-up walkthrough
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Match(args) => run_match(args),
        Command::Predict(args) => run_predict(args),
        Command::Demo(args) => run_demo(args),
    }
}
