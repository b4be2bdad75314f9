// ==========================================
// Safety Operations Platform - Import result aggregator
// ==========================================
// Folds per-row outcomes into the summary returned to the caller.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ImportOutcome - one row's fate
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported,
    Updated,
    Errored(String),
}

// ==========================================
// ImportSummary - aggregate result of one import call
// ==========================================
// Serializes as {totalRows, imported, updated, errors, errorDetails}.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub updated: usize,
    pub errors: usize,
    pub error_details: Vec<String>,
}

impl ImportSummary {
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            imported: 0,
            updated: 0,
            errors: 0,
            error_details: Vec::new(),
        }
    }

    /// Fold one row outcome into the summary
    ///
    /// Error details read "Row {n}: {reason}" where n is the running
    /// processed-row count (imported + updated + errored, 1-based),
    /// not the source file's line number. Kept as-is for parity with
    /// the summaries users already archive; see DESIGN.md.
    pub fn record(&mut self, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Imported => self.imported += 1,
            ImportOutcome::Updated => self.updated += 1,
            ImportOutcome::Errored(reason) => {
                self.errors += 1;
                let n = self.imported + self.updated + self.errors;
                self.error_details.push(format!("Row {}: {}", n, reason));
            }
        }
    }

    /// Rows that reached the store
    pub fn written(&self) -> usize {
        self.imported + self.updated
    }
}
