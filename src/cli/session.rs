use anyhow::Result;
use std::io::{BufRead, Write};

use crate::application::RemitService;
use crate::domain::InputSnapshot;
use crate::storage::KeyValueStore;

use super::render::{write_expenses, write_final, write_inputs, write_sales};

const HELP: &str = "\
Commands:
  calc [REFILL_PRICE BRAND_NEW_PRICE STOCKS_OUT BACK_OUT REMAINING EMPTY_CANS]
                        calculate sales (missing values come from the saved inputs)
  add NAME... AMOUNT    add an expense (same name adds to it)
  rm POSITION           remove an expense by its list position
  list                  show expenses
  clear                 remove all expenses
  final                 compute the final money to remit
  show                  show the current sales figures
  inputs                show the saved inputs
  help                  show this help
  quit                  leave the session";

/// Run an interactive session over `input`, writing responses to `out`.
///
/// One controller serves the whole session, so figures from `calc` carry
/// into `final` exactly as they do on the calculator page.
pub async fn run_session<S, R, W>(service: &mut RemitService<S>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Butane remit calculator. Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "calc" => {
                let entered = snapshot_from_args(&args);
                let inputs = entered.prefill_from(service.inputs());
                let report = service.calculate_sales(inputs).await;
                write_sales(out, service.results(), Some(report.calculated_at))?;
                writeln!(out, "Sales calculations updated!")?;
            }
            "add" => {
                let Some((amount, name)) = args.split_last() else {
                    writeln!(out, "Usage: add NAME... AMOUNT")?;
                    continue;
                };
                let name = name.join(" ");
                match service.add_expense(&name, amount).await {
                    Ok(added) if added.outcome.is_merge() => writeln!(
                        out,
                        "Added to {}: now {:.2}",
                        added.expense.name, added.expense.amount
                    )?,
                    Ok(added) => writeln!(
                        out,
                        "Added {}: {:.2}",
                        added.expense.name, added.expense.amount
                    )?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            "rm" => match args.first().and_then(|p| p.parse::<usize>().ok()) {
                Some(position) if position >= 1 => {
                    match service.remove_expense(position - 1).await {
                        Ok(removed) => writeln!(out, "Removed {}", removed.name)?,
                        Err(e) => writeln!(out, "Error: {}", e)?,
                    }
                }
                _ => writeln!(out, "Usage: rm POSITION (1-based)")?,
            },
            "list" => write_expenses(out, service.expenses(), service.total_expenses())?,
            "clear" => {
                let removed = service.clear_expenses().await;
                writeln!(out, "Removed {} expense(s)", removed)?;
            }
            "final" => {
                let report = service.final_calculation();
                write_final(out, &report)?;
                writeln!(out, "Final calculation completed!")?;
            }
            "show" => write_sales(out, service.results(), service.sales_calculated_at())?,
            "inputs" => write_inputs(out, service.inputs())?,
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => break,
            other => writeln!(out, "Unknown command '{}'. Type 'help'.", other)?,
        }
    }

    Ok(())
}

fn snapshot_from_args(args: &[&str]) -> InputSnapshot {
    let field = |i: usize| args.get(i).map(|s| s.to_string());
    InputSnapshot {
        refill_price: field(0),
        brand_new_price: field(1),
        stocks_out: field(2),
        back_out: field(3),
        remaining_items: field(4),
        empty_cans: field(5),
    }
}
