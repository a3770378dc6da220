use chrono::{DateTime, Local};
use std::io::{self, Write};

use crate::application::FinalReport;
use crate::domain::{Expense, InputSnapshot, Money, ResultLabel, ResultsRecord, format_money};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn write_sales(
    out: &mut dyn Write,
    results: &ResultsRecord,
    calculated_at: Option<DateTime<Local>>,
) -> io::Result<()> {
    for label in ResultLabel::SALES {
        writeln!(out, "{:<26} {:>14}", format!("{}:", label), results.display(label))?;
    }
    if let Some(at) = calculated_at {
        writeln!(out, "Sales Calculated: {}", at.format(TIMESTAMP_FORMAT))?;
    }
    Ok(())
}

pub fn write_final(out: &mut dyn Write, report: &FinalReport) -> io::Result<()> {
    writeln!(
        out,
        "{:<26} {:>14}",
        "Total Money to Remit:",
        format_money(report.total_money_to_remit)
    )?;
    writeln!(
        out,
        "{:<26} {:>14}",
        "Total Expenses:",
        format_money(report.total_expenses)
    )?;
    writeln!(out, "{}", "-".repeat(41))?;
    writeln!(
        out,
        "{:<26} {:>14}",
        "Final Money to Remit:",
        format_money(report.final_money_to_remit)
    )?;
    writeln!(
        out,
        "Final Calculated: {}",
        report.calculated_at.format(TIMESTAMP_FORMAT)
    )
}

pub fn write_expenses(out: &mut dyn Write, expenses: &[Expense], total: Money) -> io::Result<()> {
    if expenses.is_empty() {
        return writeln!(out, "No expenses added yet.");
    }
    writeln!(out, "{:>3}  {:<24} {:>12}", "#", "NAME", "AMOUNT")?;
    writeln!(out, "{}", "-".repeat(41))?;
    for (i, expense) in expenses.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<24} {:>12}",
            i + 1,
            truncate(&expense.name, 24),
            format_money(expense.amount)
        )?;
    }
    writeln!(out, "{}", "-".repeat(41))?;
    writeln!(out, "{:>3}  {:<24} {:>12}", "", "TOTAL", format_money(total))
}

pub fn write_inputs(out: &mut dyn Write, inputs: &InputSnapshot) -> io::Result<()> {
    let fields = [
        ("Refill price", &inputs.refill_price),
        ("Brand new price", &inputs.brand_new_price),
        ("Stocks out", &inputs.stocks_out),
        ("Back out", &inputs.back_out),
        ("Remaining items", &inputs.remaining_items),
        ("Empty cans", &inputs.empty_cans),
    ];
    for (label, value) in fields {
        writeln!(out, "{:<18} {}", format!("{}:", label), value.as_deref().unwrap_or("-"))?;
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
