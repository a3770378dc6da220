mod render;
mod session;

pub use session::run_session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};

use crate::application::RemitService;
use crate::domain::{InputSnapshot, format_money};

use render::{write_expenses, write_final, write_inputs, write_sales};

/// Remitcalc - Butane sales tally and cash remit calculator
#[derive(Parser)]
#[command(name = "remitcalc")]
#[command(about = "Tally butane canister sales and work out the cash to remit after expenses")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "remitcalc.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Calculate sales (omitted values are taken from the last saved inputs)
    Sales {
        /// Price of a refill (e.g., "2.50")
        #[arg(long, allow_hyphen_values = true)]
        refill_price: Option<String>,

        /// Price of a brand new canister
        #[arg(long, allow_hyphen_values = true)]
        brand_new_price: Option<String>,

        /// Canisters taken out of stock at the start
        #[arg(long, allow_hyphen_values = true)]
        stocks_out: Option<String>,

        /// Canisters brought back unsold
        #[arg(long, allow_hyphen_values = true)]
        back_out: Option<String>,

        /// Canisters still on hand
        #[arg(long, allow_hyphen_values = true)]
        remaining_items: Option<String>,

        /// Empty canisters received (one per refill sold)
        #[arg(long, allow_hyphen_values = true)]
        empty_cans: Option<String>,
    },

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Recalculate sales from the saved inputs and compute the final money to remit
    Remit,

    /// Show the saved inputs
    Inputs,

    /// Start an interactive session reading commands from stdin
    Session,

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses (CSV), session (JSON)
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import expenses from CSV (name,amount)
    Import {
        /// What to import: expenses
        import_type: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense (adds to an existing expense with the same name)
    Add {
        /// Expense name (case-insensitive)
        name: String,

        /// Amount (e.g., "50.00" or "1,200")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove an expense by its position in `expense list`
    Remove {
        /// Position, starting at 1
        position: usize,
    },

    /// List all expenses
    List,

    /// Remove all expenses
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut service = RemitService::init(&self.database).await?;

        match self.command {
            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Sales {
                refill_price,
                brand_new_price,
                stocks_out,
                back_out,
                remaining_items,
                empty_cans,
            } => {
                let entered = InputSnapshot {
                    refill_price,
                    brand_new_price,
                    stocks_out,
                    back_out,
                    remaining_items,
                    empty_cans,
                };
                let inputs = entered.prefill_from(service.inputs());
                let report = service.calculate_sales(inputs).await;
                write_sales(&mut io::stdout(), service.results(), Some(report.calculated_at))?;
            }

            Commands::Expense(expense_cmd) => {
                run_expense_command(&mut service, expense_cmd).await?;
            }

            Commands::Remit => {
                if service.inputs().is_empty() {
                    eprintln!("No saved inputs; run `remitcalc sales` first. Using zero sales.");
                }
                service.recalculate_saved().await;
                let report = service.final_calculation();
                write_final(&mut io::stdout(), &report)?;
            }

            Commands::Inputs => {
                write_inputs(&mut io::stdout(), service.inputs())?;
            }

            Commands::Session => {
                let stdin = io::stdin();
                run_session(&mut service, stdin.lock(), &mut io::stdout()).await?;
            }

            Commands::Export {
                export_type,
                output,
            } => {
                run_export_command(&service, &export_type, output.as_deref())?;
            }

            Commands::Import { import_type, input } => {
                run_import_command(&mut service, &import_type, input.as_deref()).await?;
            }
        }

        Ok(())
    }
}

async fn run_expense_command(service: &mut RemitService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add { name, amount } => {
            let added = service.add_expense(&name, &amount).await?;
            if added.outcome.is_merge() {
                println!(
                    "Added to expense: {} (now {})",
                    added.expense.name,
                    format_money(added.expense.amount)
                );
            } else {
                println!(
                    "Added expense: {} {}",
                    added.expense.name,
                    format_money(added.expense.amount)
                );
            }
        }

        ExpenseCommands::Remove { position } => {
            let index = position
                .checked_sub(1)
                .context("Positions start at 1 (see `remitcalc expense list`)")?;
            let removed = service.remove_expense(index).await?;
            println!(
                "Removed expense: {} {}",
                removed.name,
                format_money(removed.amount)
            );
        }

        ExpenseCommands::List => {
            write_expenses(
                &mut io::stdout(),
                service.expenses(),
                service.total_expenses(),
            )?;
        }

        ExpenseCommands::Clear => {
            let removed = service.clear_expenses().await;
            println!("Removed {} expense(s)", removed);
        }
    }
    Ok(())
}

fn run_export_command(service: &RemitService, export_type: &str, output: Option<&str>) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "session" => {
            let snapshot = exporter.export_session_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported session: {} expenses, final money to remit {}",
                    snapshot.expenses.len(),
                    format_money(snapshot.results.final_money_to_remit)
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, session",
                export_type
            );
        }
    }

    Ok(())
}

async fn run_import_command(
    service: &mut RemitService,
    import_type: &str,
    input: Option<&str>,
) -> Result<()> {
    use crate::io::Importer;
    use std::fs::File;
    use std::io::{Read, stdin};

    // Determine input reader
    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let result = match import_type {
        "expenses" => Importer::new(service).import_expenses_csv(reader).await?,
        _ => {
            anyhow::bail!("Invalid import type '{}'. Valid types: expenses", import_type);
        }
    };

    println!("Import complete");
    println!("  New:     {}", result.imported);
    println!("  Merged:  {}", result.merged);
    println!("  Errors:  {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            println!("  Line {}: {}", error.line, error.error);
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}
