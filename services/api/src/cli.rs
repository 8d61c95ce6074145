use crate::rank::{run_rank, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use opportunity_radar::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "opportunity-radar",
    about = "Rank scholarship opportunities by strategic fit",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    rank: RankArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank opportunities and write the report outputs (default command)
    Rank(RankArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
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
    let command = cli.command.unwrap_or(Command::Rank(cli.rank));

    match command {
        Command::Rank(args) => run_rank(args),
        Command::Serve(args) => server::run(args).await,
    }
}
