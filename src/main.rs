use analytics::DashboardMetrics;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::settings::AppConfig;
use core_types::{BoughtBy, LogRequest, Record, RecordFilter, RecordKind, RecordType, Settings};
use database::seed::{DEFAULT_DAYS_BACK, SAMPLE_BASE_FEE};
use database::{DbRepository, InMemoryLedgerStore, Ledger};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// The main entry point for the food spend ledger.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())?;
    let _guard = configuration::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, &config).await,
        Commands::Dashboard { json } => {
            let ledger = connect_ledger(&config).await?;
            print_dashboard(&ledger.dashboard().await?, json)
        }
        Commands::Logs(command) => {
            let ledger = connect_ledger(&config).await?;
            handle_logs(command, &ledger).await
        }
        Commands::Settings(command) => {
            let ledger = connect_ledger(&config).await?;
            handle_settings(command, &ledger).await
        }
        Commands::Seed { days } => {
            let ledger = connect_ledger(&config).await?;
            let written = ledger.seed_sample(days).await?;
            println!("Inserted {written} sample logs covering the last {days} days.");
            Ok(())
        }
        Commands::Demo { days, json } => handle_demo(days, json).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Tracks what the household spends on food and what is owed to the cook.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./foodspend.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API server.
    Serve(ServeArgs),
    /// Print the dashboard metrics.
    Dashboard {
        /// Print the raw JSON instead of tables.
        #[arg(long)]
        json: bool,
    },
    /// List, add and delete ledger logs.
    #[command(subcommand)]
    Logs(LogsCommand),
    /// Show or change the settings document.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Insert a deterministic sample ledger into the database.
    Seed {
        #[arg(long, default_value_t = DEFAULT_DAYS_BACK)]
        days: i64,
    },
    /// Compute the dashboard over an in-memory sample ledger. Needs no database.
    Demo {
        #[arg(long, default_value_t = DEFAULT_DAYS_BACK)]
        days: i64,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Overrides `server.host` from the config.
    #[arg(long)]
    host: Option<String>,
    /// Overrides `server.port` from the config.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum LogsCommand {
    /// List logs, newest first.
    List {
        #[arg(long = "type")]
        record_type: Option<RecordType>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Record a cook session.
    AddCook {
        /// Defaults to today (format: YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        menu: String,
        /// Defaults to the configured base fee.
        #[arg(long)]
        fee: Option<Decimal>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a grocery purchase.
    AddGrocery {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Decimal,
        /// STAFF or ME.
        #[arg(long)]
        bought_by: BoughtBy,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        linked_cook: Option<Uuid>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a payment to the cook.
    AddPayment {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
        /// Mark the payment as a tip; tips do not reduce the amount due.
        #[arg(long)]
        tip: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a log by id.
    Delete { id: Uuid },
    /// Show what was owed as of a log's date.
    AmountDue { id: Uuid },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the resolved settings.
    Show,
    /// Change individual settings; unspecified values are kept.
    Set {
        #[arg(long)]
        base_fee: Option<Decimal>,
        #[arg(long)]
        low: Option<Decimal>,
        #[arg(long)]
        high: Option<Decimal>,
        #[arg(long)]
        avg: Option<Decimal>,
        #[arg(long, conflicts_with = "clear_tracking_start")]
        tracking_start: Option<NaiveDate>,
        #[arg(long)]
        clear_tracking_start: bool,
    },
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn connect_ledger(config: &AppConfig) -> anyhow::Result<Ledger> {
    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;
    Ok(Ledger::new(Arc::new(DbRepository::new(pool))))
}

async fn handle_serve(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let ledger = connect_ledger(config).await?;
    web_server::run_server(addr, ledger).await
}

async fn handle_logs(command: LogsCommand, ledger: &Ledger) -> anyhow::Result<()> {
    let today = ledger.today();
    let request = match command {
        LogsCommand::List { record_type, from, to } => {
            let logs = ledger.list_logs(&RecordFilter { record_type, from, to }).await?;
            print_logs(&logs);
            return Ok(());
        }
        LogsCommand::Delete { id } => {
            ledger.delete_log(id).await?;
            println!("Deleted log {id}.");
            return Ok(());
        }
        LogsCommand::AmountDue { id } => {
            let (date, due) = ledger.amount_due_as_of(id).await?;
            println!("Amount due as of {date}: {}", money(due));
            return Ok(());
        }
        LogsCommand::AddCook { date, menu, fee, notes } => LogRequest {
            notes,
            ..LogRequest::cook(date.unwrap_or(today), menu, fee)
        },
        LogsCommand::AddGrocery { date, amount, bought_by, category, linked_cook, notes } => {
            LogRequest {
                notes,
                linked_cook_id: linked_cook,
                ..LogRequest::grocery(date.unwrap_or(today), category, amount, bought_by)
            }
        }
        LogsCommand::AddPayment { date, amount, method, remarks, tip, notes } => LogRequest {
            method,
            remarks,
            notes,
            is_tip: tip.then_some(true),
            ..LogRequest::payment(date.unwrap_or(today), amount)
        },
    };

    let record = ledger.create_log(request).await?;
    println!("Created {} log {} on {}.", record.record_type(), record.id, record.date);
    Ok(())
}

async fn handle_settings(command: SettingsCommand, ledger: &Ledger) -> anyhow::Result<()> {
    let settings = match command {
        SettingsCommand::Show => ledger.settings().await?,
        SettingsCommand::Set { base_fee, low, high, avg, tracking_start, clear_tracking_start } => {
            let current = ledger.settings().await?;
            let updated = Settings {
                base_fee: base_fee.unwrap_or(current.base_fee),
                baseline_daily_low: low.unwrap_or(current.baseline_daily_low),
                baseline_daily_high: high.unwrap_or(current.baseline_daily_high),
                baseline_daily_avg: avg.unwrap_or(current.baseline_daily_avg),
                tracking_start_date: if clear_tracking_start {
                    None
                } else {
                    tracking_start.or(current.tracking_start_date)
                },
            };
            ledger.update_settings(updated).await?
        }
    };
    print_settings(&settings);
    Ok(())
}

async fn handle_demo(days: i64, json: bool) -> anyhow::Result<()> {
    let ledger = Ledger::new(Arc::new(InMemoryLedgerStore::new()));
    ledger
        .update_settings(Settings { base_fee: SAMPLE_BASE_FEE, ..Settings::default() })
        .await?;
    let written = ledger.seed_sample(days).await?;
    tracing::info!(records = written, "Demo ledger ready.");

    print_dashboard(&ledger.dashboard().await?, json)
}

// ==============================================================================
// Output
// ==============================================================================

fn money(value: Decimal) -> String {
    format!("Rs {}", value.round_dp(2).normalize())
}

fn print_dashboard(metrics: &DashboardMetrics, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(metrics)?);
        return Ok(());
    }

    let mut summary = Table::new();
    summary.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    summary
        .add_row(vec!["Amount due".to_string(), money(metrics.amount_due)])
        .add_row(vec!["Spend this month".to_string(), money(metrics.total_food_spend.this_month)])
        .add_row(vec!["Spend all time".to_string(), money(metrics.total_food_spend.all_time)])
        .add_row(vec!["Cook cost / day".to_string(), money(metrics.avg_cook_cost_per_day)])
        .add_row(vec!["Groceries / day".to_string(), money(metrics.avg_groceries_cost_per_day)])
        .add_row(vec!["Effective / day".to_string(), money(metrics.effective_daily_cost)])
        .add_row(vec![
            "Baseline / day".to_string(),
            format!(
                "{} (low {}, high {})",
                money(metrics.baseline_cost.avg),
                money(metrics.baseline_cost.low),
                money(metrics.baseline_cost.high)
            ),
        ])
        .add_row(vec!["Savings / day".to_string(), money(metrics.savings.daily)])
        .add_row(vec!["Savings / month".to_string(), money(metrics.savings.monthly)])
        .add_row(vec![
            "Tracking window".to_string(),
            format!(
                "{} to {} ({} days)",
                metrics.tracking_window.start_date,
                metrics.tracking_window.end_date,
                metrics.tracking_window.days
            ),
        ])
        .add_row(vec![
            "Logs".to_string(),
            format!(
                "{} cook, {} grocery, {} payment",
                metrics.stats.total_cook_sessions,
                metrics.stats.total_groceries,
                metrics.stats.total_payments
            ),
        ]);
    println!("{summary}");

    if !metrics.monthly_breakdown.is_empty() {
        let mut months = Table::new();
        months
            .load_preset(UTF8_FULL)
            .set_header(vec!["Month", "Spend", "Cook sessions", "Grocery runs"]);
        for month in &metrics.monthly_breakdown {
            months.add_row(vec![
                month.month.clone(),
                money(month.total_spend),
                month.cook_count.to_string(),
                month.grocery_count.to_string(),
            ]);
        }
        println!("{months}");
    }
    Ok(())
}

fn print_logs(logs: &[Record]) {
    if logs.is_empty() {
        println!("No logs found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Type", "Details", "Amount", "Id"]);
    for log in logs {
        let (details, amount) = match &log.kind {
            RecordKind::Cook(cook) => {
                let lasted = cook
                    .days_food_lasted
                    .map(|d| format!(" ({d} days)"))
                    .unwrap_or_default();
                (format!("{}{lasted}", cook.menu), cook.base_fee.map(money).unwrap_or_default())
            }
            RecordKind::Grocery(grocery) => (
                format!("{} [{}]", grocery.category, grocery.bought_by),
                money(grocery.amount),
            ),
            RecordKind::Payment(payment) => (
                payment.remarks.clone().or_else(|| payment.method.clone()).unwrap_or_default(),
                money(payment.amount_paid),
            ),
        };
        table.add_row(vec![
            log.date.to_string(),
            log.record_type().to_string(),
            details,
            amount,
            log.id.to_string(),
        ]);
    }
    println!("{table}");
}

fn print_settings(settings: &Settings) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Setting", "Value"]);
    table
        .add_row(vec!["Base fee".to_string(), money(settings.base_fee)])
        .add_row(vec!["Baseline low".to_string(), money(settings.baseline_daily_low)])
        .add_row(vec!["Baseline high".to_string(), money(settings.baseline_daily_high)])
        .add_row(vec!["Baseline avg".to_string(), money(settings.baseline_daily_avg)])
        .add_row(vec![
            "Tracking start".to_string(),
            settings
                .tracking_start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    println!("{table}");
}
