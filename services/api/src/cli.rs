use crate::demo::{list_personas, run_demo, run_validate, DemoArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use idv_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Identity Verification Intake",
    about = "Validate applicant records and submit them for identity decisioning",
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
    /// Run the field validator against an applicant record JSON file
    Validate(ValidateArgs),
    /// Submit sandbox personas through the configured provider and print the outcomes
    Demo(DemoArgs),
    /// List the sandbox personas available for quick-fill and demos
    Personas,
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
        Command::Validate(args) => run_validate(args),
        Command::Demo(args) => run_demo(args).await,
        Command::Personas => {
            list_personas();
            Ok(())
        }
    }
}
