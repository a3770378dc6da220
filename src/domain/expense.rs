use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{Money, safe_float};

/// A named cash expense paid out of the day's takings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Money,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Names are compared without regard to case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

// Older saves may hold the amount as a string.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => safe_float(Some(&s)),
        _ => 0.0,
    })
}

/// How an accepted expense landed in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was pushed at `index`.
    Appended { index: usize },
    /// The amount was added to the existing entry at `index`.
    Merged { index: usize },
}

impl AddOutcome {
    pub fn index(&self) -> usize {
        match self {
            AddOutcome::Appended { index } | AddOutcome::Merged { index } => *index,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, AddOutcome::Merged { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyExpenseName,
    NonPositiveAmount(Money),
    ExpenseIndexOutOfRange { index: usize, len: usize },
    AmountOverflow { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyExpenseName => write!(f, "Please enter an expense name."),
            ValidationError::NonPositiveAmount(_) => {
                write!(f, "Please enter a valid amount greater than 0.")
            }
            ValidationError::ExpenseIndexOutOfRange { index, len } => write!(
                f,
                "No expense at position {} (ledger has {} entries)",
                index.saturating_add(1),
                len
            ),
            ValidationError::AmountOverflow { name } => {
                write!(f, "Total for expense \"{}\" is too large.", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Ordered list of expenses, unique by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseLedger {
    entries: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Expense>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Expense] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an expense, merging into an existing entry with the same name.
    ///
    /// The name is trimmed and the amount text coerced; an empty name or an
    /// amount that is not strictly positive is rejected without touching the
    /// ledger. A merge keeps the existing entry's spelling and position.
    pub fn add(&mut self, name: &str, amount_text: Option<&str>) -> Result<AddOutcome, ValidationError> {
        let name = name.trim();
        let amount = safe_float(amount_text);

        if name.is_empty() {
            return Err(ValidationError::EmptyExpenseName);
        }
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        match self.entries.iter().position(|e| e.matches_name(name)) {
            Some(index) => {
                let merged = self.entries[index].amount + amount;
                if !merged.is_finite() {
                    return Err(ValidationError::AmountOverflow {
                        name: self.entries[index].name.clone(),
                    });
                }
                self.entries[index].amount = merged;
                Ok(AddOutcome::Merged { index })
            }
            None => {
                self.entries.push(Expense::new(name, amount));
                Ok(AddOutcome::Appended {
                    index: self.entries.len() - 1,
                })
            }
        }
    }

    /// Remove the entry at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Result<Expense, ValidationError> {
        if index >= self.entries.len() {
            return Err(ValidationError::ExpenseIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }
}
