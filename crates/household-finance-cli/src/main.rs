mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::dashboard::DashboardArgs;
use commands::growth::{GrowthArgs, HabitsArgs};
use commands::household::{BalanceSheetArgs, CashFlowArgs, GoalsArgs, SpendingArgs};
use commands::metrics::{MetricsArgs, PaymentArgs, RiskArgs};

/// Household finance metrics and dashboard data
#[derive(Parser)]
#[command(
    name = "hfd",
    version,
    about = "Household finance metrics and dashboard data",
    long_about = "Computes loan affordability (amortized payment, LTV, DTI, risk score), \
                  savings growth projections, balance sheet, cash flow, spending and goal \
                  progress with decimal precision. Reads flags, a JSON --input file or \
                  piped JSON on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Dashboard config file (.json, .yaml or .yml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full affordability snapshot for a financial profile
    Metrics(MetricsArgs),
    /// Amortized monthly payment, optionally with a yearly schedule
    Payment(PaymentArgs),
    /// Score and classify affordability risk from precomputed ratios
    Risk(RiskArgs),
    /// Compound growth of a monthly contribution
    Growth(GrowthArgs),
    /// Compare the long-run value of small savings habits
    Habits(HabitsArgs),
    /// Assets, liabilities and net worth
    BalanceSheet(BalanceSheetArgs),
    /// Monthly cash flow, savings rate and budget waterfall
    CashFlow(CashFlowArgs),
    /// Month-over-month spending comparison
    Spending(SpendingArgs),
    /// Savings goal progress
    Goals(GoalsArgs),
    /// Every dashboard panel for a household (the demo household by default)
    Dashboard(DashboardArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Metrics(args) => commands::metrics::run_metrics(args, &config),
        Commands::Payment(args) => commands::metrics::run_payment(args),
        Commands::Risk(args) => commands::metrics::run_risk(args, &config),
        Commands::Growth(args) => commands::growth::run_growth(args, &config),
        Commands::Habits(args) => commands::growth::run_habits(args, &config),
        Commands::BalanceSheet(args) => commands::household::run_balance_sheet(args),
        Commands::CashFlow(args) => commands::household::run_cash_flow(args),
        Commands::Spending(args) => commands::household::run_spending(args),
        Commands::Goals(args) => commands::household::run_goals(args),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args, &config),
        Commands::Version => {
            println!("hfd {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &config.currency);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
