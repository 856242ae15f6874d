//! Provident Fund Tracker CLI
//!
//! Command-line interface for running corpus projections over a stored
//! account bundle

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use pf_tracker::{account, generator, ProjectionConfig, TimelineEngine, TimelineResult};

#[derive(Parser)]
#[command(name = "pf_tracker", version, about = "Provident fund corpus tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the projection and print the year/month ledger
    Project {
        /// Path to the account bundle JSON
        #[arg(long)]
        data: PathBuf,

        /// Evaluation date (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Write the month ledger to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the year-level summaries (the advisory input shape)
    Summary {
        #[arg(long)]
        data: PathBuf,

        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },
    /// Batch-generate twelve monthly contributions for a financial year
    Generate {
        #[arg(long)]
        data: PathBuf,

        /// Financial year start year (2024 for FY2024-25)
        #[arg(long)]
        year: i32,

        /// Flat monthly contribution amount
        #[arg(long)]
        amount: f64,

        /// Annual interest rate to record for the year
        #[arg(long)]
        rate: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Project { data, as_of, csv } => {
            let result = run_projection(&data, as_of)?;
            print_ledger(&result);
            if let Some(path) = csv {
                write_month_csv(&path, &result)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nMonth ledger written to: {}", path.display());
            }
        }
        Command::Summary { data, as_of } => {
            let result = run_projection(&data, as_of)?;
            print_summaries(&result);
        }
        Command::Generate {
            data,
            year,
            amount,
            rate,
        } => {
            let mut bundle = account::load_bundle(&data)
                .with_context(|| format!("loading {}", data.display()))?;
            generator::apply_batch(&mut bundle, year, amount, rate)?;
            account::save_bundle(&data, &bundle)
                .with_context(|| format!("saving {}", data.display()))?;
            println!(
                "Generated 12 monthly contributions of {:.2} for FY{}-{:02}",
                amount,
                year,
                (year + 1).rem_euclid(100)
            );
        }
    }

    Ok(())
}

fn run_projection(data: &PathBuf, as_of: Option<NaiveDate>) -> anyhow::Result<TimelineResult> {
    let bundle =
        account::load_bundle(data).with_context(|| format!("loading {}", data.display()))?;

    let config = match as_of {
        Some(date) => ProjectionConfig::as_of(date),
        None => ProjectionConfig::default(),
    };

    let engine = TimelineEngine::new(bundle.rate_table(), config);
    let result = engine.project(&bundle.profile, &bundle.transactions)?;
    Ok(result)
}

fn print_ledger(result: &TimelineResult) {
    for year in &result.years {
        println!(
            "\n{} ({} - {}){}",
            year.label,
            year.start_date,
            year.end_date,
            if year.is_projected { "  [projected]" } else { "" }
        );
        println!(
            "{:>10} {:>5} {:>14} {:>12} {:>12} {:>12} {:>14}",
            "Month", "Year", "Opening", "Credits", "Debits", "Interest", "Closing"
        );
        println!("{}", "-".repeat(86));
        for month in &year.monthly_breakdown {
            println!(
                "{:>10} {:>5} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                month.month_name,
                month.year,
                month.opening_balance,
                month.total_credits,
                month.total_debits,
                month.interest_accrued,
                month.closing_balance,
            );
        }
        println!(
            "Year total: contributions {:.2}, withdrawals {:.2}, interest {:.2} @ {:.2}%, closing {:.2}",
            year.total_contributions,
            year.total_withdrawals,
            year.interest_earned,
            year.interest_rate,
            year.closing_balance,
        );
    }

    println!("\nProjected corpus: {:.2}", result.total_balance);
}

fn print_summaries(result: &TimelineResult) {
    println!(
        "{:>10} {:>14} {:>14} {:>12} {:>12} {:>7} {:>14}",
        "Year", "Opening", "Contribution", "Withdrawal", "Interest", "Rate", "Closing"
    );
    println!("{}", "-".repeat(88));
    for summary in result.year_summaries() {
        println!(
            "{:>10} {:>14.2} {:>14.2} {:>12.2} {:>12.2} {:>7.2} {:>14.2}",
            summary.label,
            summary.opening_balance,
            summary.total_contribution,
            summary.total_withdrawal,
            summary.total_interest,
            summary.interest_rate,
            summary.closing_balance,
        );
    }
    println!("\nProjected corpus: {:.2}", result.total_balance);
}

/// Flat month ledger export, one row per calendar month
fn write_month_csv(path: &PathBuf, result: &TimelineResult) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "fy",
        "month",
        "year",
        "opening_balance",
        "total_credits",
        "total_debits",
        "interest_accrued",
        "closing_balance",
    ])?;

    for year in &result.years {
        for month in &year.monthly_breakdown {
            writer.write_record([
                year.label.clone(),
                month.month_name.clone(),
                month.year.to_string(),
                format!("{:.2}", month.opening_balance),
                format!("{:.2}", month.total_credits),
                format!("{:.2}", month.total_debits),
                format!("{:.2}", month.interest_accrued),
                format!("{:.2}", month.closing_balance),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
