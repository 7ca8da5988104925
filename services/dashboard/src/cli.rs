use crate::commands::{run_call, run_dashboard, run_schedule, CandidateArgs, DashboardArgs};
use crate::server;
use candidate_pipeline::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Pipeline Dashboard",
    about = "Review screening candidates, place screening calls, and schedule interviews",
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
    /// Print summary counts and the filtered candidate table
    Dashboard(DashboardArgs),
    /// Place an outbound screening call to a candidate
    Call(CandidateArgs),
    /// Schedule an interview with a candidate
    Schedule(CandidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the candidate backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args).await,
        Command::Call(args) => run_call(args).await,
        Command::Schedule(args) => run_schedule(args).await,
    }
}
