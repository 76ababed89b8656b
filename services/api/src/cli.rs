use crate::search::{run_search, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rehab_scout::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rehab Scout",
    about = "Value, filter, and rank fix-and-flip listings from the command line",
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
    /// Value a listing feed and print the listings matching the given filters
    Search(SearchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the market average price per square foot
    #[arg(long, value_parser = crate::infra::parse_market_rate)]
    pub(crate) market_rate: Option<f64>,
    /// Pin the valuation year (defaults to the current year)
    #[arg(long)]
    pub(crate) as_of_year: Option<i32>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
    }
}
