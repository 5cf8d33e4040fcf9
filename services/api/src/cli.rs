use crate::report::{run_branches, run_predict, BranchesArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use josaa_predictor::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "josaa-predictor",
    about = "Rank JoSAA counselling options by admission probability",
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
    /// Print a ranked preference list for a JEE rank
    Predict(PredictArgs),
    /// List the academic programs present in the cutoff data
    Branches(BranchesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Cutoff CSV to serve predictions from
    #[arg(long)]
    pub(crate) cutoffs: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Branches(args) => run_branches(args),
    }
}
