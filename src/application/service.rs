use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::domain::{
    AddOutcome, Expense, ExpenseLedger, InputSnapshot, Money, ResultsRecord, SalesFigures,
    calculate_sales,
};
use crate::storage::{EXPENSES_KEY, Gateway, INPUTS_KEY, KeyValueStore, Repository};

use super::AppError;

/// Session controller for the remit calculator.
/// This is the primary interface for any client (CLI, interactive session, import).
///
/// Owns the results record and the expense ledger for as long as it lives;
/// the input snapshot and the ledger are written through to the store.
pub struct RemitService<S = Repository> {
    gateway: Gateway<S>,
    results: ResultsRecord,
    ledger: ExpenseLedger,
    inputs: InputSnapshot,
    sales_calculated_at: Option<DateTime<Local>>,
    final_calculated_at: Option<DateTime<Local>>,
}

/// Result of a sales calculation
pub struct SalesReport {
    pub figures: SalesFigures,
    pub calculated_at: DateTime<Local>,
}

/// Result of the final remit calculation
pub struct FinalReport {
    pub total_money_to_remit: Money,
    pub total_expenses: Money,
    pub final_money_to_remit: Money,
    pub calculated_at: DateTime<Local>,
}

/// Result of adding an expense
#[derive(Debug)]
pub struct ExpenseAdded {
    pub expense: Expense,
    pub outcome: AddOutcome,
}

impl RemitService<Repository> {
    /// Open (creating if needed) the database at the given path and load the
    /// saved session.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::load(repo).await)
    }
}

impl<S: KeyValueStore> RemitService<S> {
    /// Build a controller over `store`, restoring the saved inputs and
    /// expenses. Unreadable data falls back to an empty session.
    pub async fn load(store: S) -> Self {
        let gateway = Gateway::new(store);
        let inputs: InputSnapshot = gateway.load(INPUTS_KEY, InputSnapshot::default()).await;
        let entries: Vec<Expense> = gateway.load(EXPENSES_KEY, Vec::new()).await;
        debug!(expenses = entries.len(), "loaded session");

        Self {
            gateway,
            results: ResultsRecord::default(),
            ledger: ExpenseLedger::from_entries(entries),
            inputs,
            sales_calculated_at: None,
            final_calculated_at: None,
        }
    }

    // ========================
    // Sales
    // ========================

    /// Save `inputs` as the new snapshot, then derive and record sales figures.
    pub async fn calculate_sales(&mut self, inputs: InputSnapshot) -> SalesReport {
        self.gateway.save(INPUTS_KEY, &inputs).await;
        self.inputs = inputs;

        let coerced = self.inputs.to_inputs();
        let figures = calculate_sales(&coerced);
        self.results.apply_sales(&figures);

        let calculated_at = Local::now();
        self.sales_calculated_at = Some(calculated_at);
        debug!(
            total_sold = figures.total_sold,
            total_money_to_remit = figures.total_money_to_remit,
            "sales calculated"
        );

        SalesReport {
            figures,
            calculated_at,
        }
    }

    /// Re-run the sales calculation with the saved snapshot.
    pub async fn recalculate_saved(&mut self) -> SalesReport {
        let inputs = self.inputs.clone();
        self.calculate_sales(inputs).await
    }

    /// The snapshot used to prefill the form.
    pub fn inputs(&self) -> &InputSnapshot {
        &self.inputs
    }

    pub fn results(&self) -> &ResultsRecord {
        &self.results
    }

    pub fn sales_calculated_at(&self) -> Option<DateTime<Local>> {
        self.sales_calculated_at
    }

    // ========================
    // Expenses
    // ========================

    /// Add an expense (or top up one with the same name) and persist the list.
    pub async fn add_expense(
        &mut self,
        name: &str,
        amount_text: &str,
    ) -> Result<ExpenseAdded, AppError> {
        let outcome = self.ledger.add(name, Some(amount_text))?;
        self.persist_expenses().await;

        let expense = self.ledger.entries()[outcome.index()].clone();
        info!(
            name = %expense.name,
            amount = expense.amount,
            merged = outcome.is_merge(),
            "expense recorded"
        );
        Ok(ExpenseAdded { expense, outcome })
    }

    /// Remove the expense at `index` (0-based) and persist the list.
    pub async fn remove_expense(&mut self, index: usize) -> Result<Expense, AppError> {
        let removed = self.ledger.remove(index)?;
        self.persist_expenses().await;
        info!(name = %removed.name, index, "expense removed");
        Ok(removed)
    }

    /// Drop every expense and persist the empty list.
    pub async fn clear_expenses(&mut self) -> usize {
        let removed = self.ledger.clear();
        self.persist_expenses().await;
        info!(removed, "expenses cleared");
        removed
    }

    pub fn expenses(&self) -> &[Expense] {
        self.ledger.entries()
    }

    pub fn total_expenses(&self) -> Money {
        self.ledger.total()
    }

    async fn persist_expenses(&self) {
        self.gateway.save(EXPENSES_KEY, self.ledger.entries()).await;
    }

    // ========================
    // Final remit
    // ========================

    /// Deduct the ledger total from the last sales total.
    ///
    /// Uses zero for the sales total if sales were never calculated in this
    /// session. The result may be negative.
    pub fn final_calculation(&mut self) -> FinalReport {
        let total_expenses = self.ledger.total();
        let final_money_to_remit = self.results.apply_final(total_expenses);

        let calculated_at = Local::now();
        self.final_calculated_at = Some(calculated_at);
        debug!(total_expenses, final_money_to_remit, "final remit calculated");

        FinalReport {
            total_money_to_remit: self.results.total_money_to_remit,
            total_expenses,
            final_money_to_remit,
            calculated_at,
        }
    }

    pub fn final_calculated_at(&self) -> Option<DateTime<Local>> {
        self.final_calculated_at
    }
}
