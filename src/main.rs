use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use snowball::config::{
    book_entries, config_dir, load_config, load_debts, save_debts, CONFIG_TEMPLATE,
    DEBTS_TEMPLATE,
};
use snowball::error::{Result, SnowballError};
use snowball::render::{
    debts_table, format_money, parse_start_month, schedule_table, summary_table, to_json,
    MonthLabeler,
};
use snowball::schedule::{simulate_detailed, summarize, Debt};

#[derive(Parser)]
#[command(name = "snowball")]
#[command(version, about = "Debt snowball payoff planner", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.snowball or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List debts in payoff order
    Debts,

    /// Add a debt to debts.toml
    Add {
        /// Debt identifier (e.g., visa)
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Annual interest rate in percent
        #[arg(short, long, default_value_t = 0.0)]
        rate: f64,

        /// Contractual minimum monthly payment
        #[arg(short, long)]
        payment: f64,

        /// Current outstanding balance
        #[arg(short, long)]
        balance: f64,
    },

    /// Remove a debt from debts.toml
    Remove {
        /// Debt identifier from debts.toml
        id: String,
    },

    /// Show the month-by-month payoff schedule
    Plan {
        /// Extra monthly contribution (default: plan.extra_monthly from config.toml)
        #[arg(short, long)]
        extra: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Label months from this calendar month (YYYY-MM)
        #[arg(long)]
        start: Option<String>,

        /// Number of months to show (default: all)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Show payoff dates, totals and savings from the extra contribution
    Summary {
        /// Extra monthly contribution (default: plan.extra_monthly from config.toml)
        #[arg(short, long)]
        extra: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Label months from this calendar month (YYYY-MM)
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so table and JSON output stay clean.
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = format!("snowball={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    tracing::debug!(config_dir = %cfg_dir.display(), "using config directory");

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Debts => cmd_debts(&cfg_dir),
        Commands::Add {
            id,
            name,
            rate,
            payment,
            balance,
        } => cmd_add(&cfg_dir, &id, Debt::new(name, rate, payment, balance)),
        Commands::Remove { id } => cmd_remove(&cfg_dir, &id),
        Commands::Plan {
            extra,
            format,
            start,
            months,
        } => cmd_plan(&cfg_dir, extra, format, start, months),
        Commands::Summary {
            extra,
            format,
            start,
        } => cmd_summary(&cfg_dir, extra, format, start),
    }
}

fn ensure_config_dir(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(SnowballError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Command-line value first, then config.toml
fn month_labeler(cli_start: Option<String>, config_start: Option<String>) -> Result<MonthLabeler> {
    let start = cli_start
        .or(config_start)
        .map(|s| parse_start_month(&s))
        .transpose()?;
    Ok(MonthLabeler::new(start))
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(SnowballError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("debts.toml"), DEBTS_TEMPLATE)?;

    println!("Initialized snowball config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set your extra monthly amount:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Enter your debts:               $EDITOR {}/debts.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then see your payoff plan:");
    println!("  snowball plan");

    Ok(())
}

/// List debts in payoff order
fn cmd_debts(cfg_dir: &Path) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let book = load_debts(cfg_dir)?;

    if book.is_empty() {
        println!("No debts configured.");
        println!("Add debts to: {}/debts.toml", cfg_dir.display());
        return Ok(());
    }

    let (ids, debts) = book_entries(&book);
    let symbol = &config.display.currency_symbol;
    println!("{}", debts_table(&ids, &debts, symbol));

    let total_balance: f64 = debts.iter().map(|d| d.current_balance).sum();
    let total_minimum: f64 = debts.iter().map(|d| d.monthly_payment).sum();
    println!();
    println!("Total balance:   {}", format_money(total_balance, symbol));
    println!("Total minimums:  {}/mo", format_money(total_minimum, symbol));

    Ok(())
}

/// Add a debt
fn cmd_add(cfg_dir: &Path, id: &str, debt: Debt) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    debt.validate()?;
    let mut book = load_debts(cfg_dir)?;
    if book.contains_key(id) {
        return Err(SnowballError::DuplicateDebt(id.to_string()));
    }

    let name = debt.name.clone();
    book.insert(id.to_string(), debt);
    save_debts(cfg_dir, &book)?;

    println!("Added debt '{id}' ({name})");
    Ok(())
}

/// Remove a debt
fn cmd_remove(cfg_dir: &Path, id: &str) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let mut book = load_debts(cfg_dir)?;
    let removed = book
        .remove(id)
        .ok_or_else(|| SnowballError::DebtNotFound(id.to_string()))?;
    save_debts(cfg_dir, &book)?;

    println!("Removed debt '{id}' ({})", removed.name);
    Ok(())
}

/// Show the payoff schedule
fn cmd_plan(
    cfg_dir: &Path,
    extra: Option<f64>,
    format: OutputFormat,
    start: Option<String>,
    months: Option<usize>,
) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let book = load_debts(cfg_dir)?;
    let (_, debts) = book_entries(&book);
    let extra = extra.unwrap_or(config.plan.extra_monthly);
    let labeler = month_labeler(start, config.plan.start_month)?;

    let sim = simulate_detailed(&debts, extra)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&sim)?),
        OutputFormat::Table => {
            let symbol = &config.display.currency_symbol;
            println!("{}", schedule_table(&sim, &labeler, symbol, months));
            println!();
            let total = sim.months_to_payoff();
            if let Some(n) = months.filter(|&n| n < total) {
                println!("Showing {n} of {total} months");
            }
            println!("Extra contribution: {}/mo", format_money(extra, symbol));
            if total > 0 {
                println!(
                    "Debt free:          {} ({} months)",
                    labeler.label(total),
                    total
                );
            }
        }
    }

    Ok(())
}

/// Show payoff dates and totals
fn cmd_summary(
    cfg_dir: &Path,
    extra: Option<f64>,
    format: OutputFormat,
    start: Option<String>,
) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let book = load_debts(cfg_dir)?;
    let (_, debts) = book_entries(&book);
    let extra = extra.unwrap_or(config.plan.extra_monthly);
    let labeler = month_labeler(start, config.plan.start_month)?;

    let summary = summarize(&debts, extra)?;

    if let OutputFormat::Json = format {
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    let symbol = &config.display.currency_symbol;
    println!("Snowball Summary");
    println!("{}", "-".repeat(50));
    println!("{}", summary_table(&summary, &labeler, symbol));
    println!();
    println!("Extra contribution: {}/mo", format_money(extra, symbol));
    if summary.months_to_payoff > 0 {
        println!(
            "Debt free:          {} ({} months)",
            labeler.label(summary.months_to_payoff),
            summary.months_to_payoff
        );
    }
    println!(
        "Total interest:     {}",
        format_money(summary.total_interest, symbol)
    );
    println!(
        "Total paid:         {}",
        format_money(summary.total_paid, symbol)
    );

    if let Some(cmp) = &summary.comparison {
        println!();
        println!(
            "Without the extra {}/mo: {} months, {} interest",
            format_money(extra, symbol),
            cmp.baseline_months,
            format_money(cmp.baseline_interest, symbol)
        );
        println!(
            "Saved:              {} months, {} interest",
            cmp.months_saved,
            format_money(cmp.interest_saved, symbol)
        );
    }

    Ok(())
}
