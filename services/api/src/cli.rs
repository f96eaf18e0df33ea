use crate::commands::{
    run_check, run_drug_lookup, run_import_dataset, run_pair_check, CheckArgs, DrugArgs,
    ImportDatasetArgs, PairArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use medisync::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "MediSync",
    about = "Check drug combinations for known interactions, dose limits, and contraindications",
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
    /// Run an interaction check and print the risk report
    Check(CheckArgs),
    /// Check one pair of drugs
    Pair(PairArgs),
    /// Look up a single drug in the reference data
    Drug(DrugArgs),
    /// Build drug_interactions.json from the public interaction CSV export
    ImportDataset(ImportDatasetArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the reference data directory
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
        Command::Check(args) => run_check(args),
        Command::Pair(args) => run_pair_check(args),
        Command::Drug(args) => run_drug_lookup(args),
        Command::ImportDataset(args) => run_import_dataset(args),
    }
}
