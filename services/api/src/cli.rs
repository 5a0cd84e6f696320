use crate::demo::{run_demo, DemoArgs};
use crate::ledger::{run_outcome, run_report, run_search, OutcomeArgs, ReportArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lindle::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Lindle",
    about = "Track counterparty reputation across analysed contracts",
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
    /// Search tracked counterparties
    Search(SearchArgs),
    /// Print the reputation report for one counterparty
    Report(ReportArgs),
    /// Record how a contract ended
    Outcome(OutcomeArgs),
    /// Run an in-memory walkthrough of analysis intake and reputation scoring
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
    #[command(flatten)]
    pub(crate) store: StoreArgs,
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct StoreArgs {
    /// Directory holding entities.json and contracts.json (overrides APP_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Report(args) => run_report(args),
        Command::Outcome(args) => run_outcome(args),
        Command::Demo(args) => run_demo(args),
    }
}
