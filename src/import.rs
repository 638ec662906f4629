// 📥 CSV Import - bulk-load cards into a registry
//
// Expected header: name,card_number,limit
// Bad rows are reported and skipped; only I/O and CSV syntax errors abort.

use crate::card::Card;
use crate::error::ImportError;
use crate::registry::CardRegistry;
use crate::validation::{describe, CardRequest};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ImportRow {
    name: Option<String>,
    card_number: Option<String>,
    limit: Option<String>,
}

/// A row that was not added, with its 1-based line number in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub added: Vec<Card>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Added: {}, Rejected: {}",
            self.added.len(),
            self.rejected.len()
        )
    }
}

/// Load cards from a CSV file into `registry`
pub fn import_csv(path: &Path, registry: &CardRegistry) -> Result<ImportReport, ImportError> {
    let file = std::fs::File::open(path)?;
    tracing::info!(path = %path.display(), "importing cards");
    import_reader(file, registry)
}

/// Load cards from any CSV source into `registry`
pub fn import_reader<R: Read>(
    reader: R,
    registry: &CardRegistry,
) -> Result<ImportReport, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut report = ImportReport::default();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: ImportRow = record.deserialize(Some(&headers))?;

        let request = CardRequest {
            name: row.name,
            card_number: row.card_number,
            limit: row.limit,
        };

        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                report.rejected.push(RejectedRow {
                    line,
                    reason: describe(&errors),
                });
                continue;
            }
        };

        match registry.add_card(&valid.name, &valid.card_number, valid.limit) {
            Ok(card) => report.added.push(card),
            Err(e) => report.rejected.push(RejectedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    tracing::info!("{}", report.summary());
    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
