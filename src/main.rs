use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotistats::{
    analytics::{DayPeriod, TimeWindow},
    cli::{self, MetricKind},
    config, error,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show a listening statistic
    Stats(StatsOptions),

    /// Show the dashboard overview
    Dashboard(DashboardOptions),

    /// Run the statistics HTTP API
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Statistic to compute
    #[clap(value_enum)]
    pub metric: MetricKind,

    /// Time window for top artists, top tracks and hidden gems
    #[clap(long, value_enum)]
    pub window: Option<TimeWindow>,

    /// Number of entries (or plays considered, for streak)
    #[clap(long)]
    pub limit: Option<u32>,

    /// Part of the day for time-of-day
    #[clap(long, value_enum)]
    pub period: Option<DayPeriod>,

    /// Print raw JSON instead of tables
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DashboardOptions {
    /// Print raw JSON instead of tables
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind (defaults to STATS_SERVER_ADDRESS)
    #[clap(long)]
    pub address: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(command: &Command) {
    let default = match command {
        Command::Serve(_) => "spotistats=info,tower_http=info",
        _ => "warn",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_tracing(&cli.command);

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Stats(opt) => {
            let request = opt.metric.request(opt.window, opt.limit, opt.period);
            cli::stats(request, opt.json).await
        }
        Command::Dashboard(opt) => cli::dashboard(opt.json).await,
        Command::Serve(opt) => cli::serve(opt.address).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
