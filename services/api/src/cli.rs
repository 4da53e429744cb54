use crate::commands::{
    run_certificate, run_check, run_eligibility, CertificateArgs, EligibilityArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use municipal_eservices::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Municipal E-Services",
    about = "Residency eligibility questionnaire and certificate self-service for the municipal portal",
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
    /// Run the startup integrity checks and exit
    Check,
    /// Evaluate questionnaire answers given as question=value pairs
    Eligibility(EligibilityArgs),
    /// Extract the residency certificate page for a national ID
    Certificate(CertificateArgs),
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
        Command::Check => run_check(),
        Command::Eligibility(args) => run_eligibility(args),
        Command::Certificate(args) => run_certificate(args),
    }
}
