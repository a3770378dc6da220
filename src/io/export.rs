use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::RemitService;
use crate::domain::{Expense, InputSnapshot, ResultsRecord};
use crate::storage::KeyValueStore;

/// Current session state for JSON export
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub inputs: InputSnapshot,
    pub expenses: Vec<Expense>,
    pub results: ResultsRecord,
}

/// Exporter for writing session data to CSV or JSON
pub struct Exporter<'a, S> {
    service: &'a RemitService<S>,
}

impl<'a, S: KeyValueStore> Exporter<'a, S> {
    pub fn new(service: &'a RemitService<S>) -> Self {
        Self { service }
    }

    /// Export expenses to CSV format
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["name", "amount"])?;

        let mut count = 0;
        for expense in self.service.expenses() {
            let amount = expense.amount.to_string();
            csv_writer.write_record([expense.name.as_str(), amount.as_str()])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export inputs, expenses and current figures as a JSON snapshot
    pub fn export_session_json<W: Write>(&self, mut writer: W) -> Result<SessionSnapshot> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            inputs: self.service.inputs().clone(),
            expenses: self.service.expenses().to_vec(),
            results: *self.service.results(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}
