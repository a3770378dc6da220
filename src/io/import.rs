use anyhow::Result;
use std::io::Read;

use crate::application::RemitService;
use crate::storage::KeyValueStore;

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub merged: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Importer for loading expenses into the ledger
pub struct Importer<'a, S> {
    service: &'a mut RemitService<S>,
}

impl<'a, S: KeyValueStore> Importer<'a, S> {
    pub fn new(service: &'a mut RemitService<S>) -> Self {
        Self { service }
    }

    /// Import `name,amount` rows from CSV (with a header row).
    ///
    /// Each row goes through the same validation and merging as a manual
    /// entry. Bad rows are reported and skipped.
    pub async fn import_expenses_csv<R: Read>(&mut self, reader: R) -> Result<ImportResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut result = ImportResult::default();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let name = record.get(0).unwrap_or("");
            let amount = record.get(1).unwrap_or("");

            match self.service.add_expense(name, amount).await {
                Ok(added) if added.outcome.is_merge() => result.merged += 1,
                Ok(_) => result.imported += 1,
                Err(e) => result.errors.push(ImportError {
                    line,
                    error: e.to_string(),
                }),
            }
        }

        Ok(result)
    }
}
