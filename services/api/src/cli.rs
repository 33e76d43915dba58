use crate::demo::{run_demo, run_match, run_process_listing, DemoArgs, MatchArgs, ShowArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use process_matcher::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Process Matcher",
    about = "Match employees to staffing processes from the command line or over HTTP",
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
    /// Inspect a process table without starting the service
    Processes {
        #[command(subcommand)]
        command: ProcessCommand,
    },
    /// Walk through registration, matching and reporting on sample data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ProcessCommand {
    /// Print the process table, optionally filtered by category
    Show(ShowArgs),
    /// Print the ranked processes open to one potential/communication pair
    Match(MatchArgs),
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
        Command::Processes {
            command: ProcessCommand::Show(args),
        } => run_process_listing(args),
        Command::Processes {
            command: ProcessCommand::Match(args),
        } => run_match(args),
        Command::Demo(args) => run_demo(args),
    }
}
