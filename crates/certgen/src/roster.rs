//! CSV roster loading and validation

use crate::{CertgenError, Result};
use overlay::RecipientRecord;
use std::io::Read;
use std::path::Path;

/// Columns every roster must carry; extra columns are ignored
const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "identifier",
    "module1_score",
    "module2_score",
    "module3_score",
    "module4_score",
];

/// The validated recipient list for one batch run
///
/// Header validation happens here, before any rendering: all missing
/// required columns are reported together in one error.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<RecipientRecord>,
}

impl Roster {
    /// Load a roster from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(csv::Reader::from_path(path)?)
    }

    /// Load a roster from any reader producing CSV text
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::load(csv::Reader::from_reader(reader))
    }

    fn load<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|required| !headers.iter().any(|h| h == *required))
            .collect();
        if !missing.is_empty() {
            return Err(CertgenError::MissingColumns(missing.join(", ")));
        }

        let index_of = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .unwrap_or_default()
        };
        let name_idx = index_of("name");
        let id_idx = index_of("identifier");
        let score_idx: [usize; 4] = [
            index_of("module1_score"),
            index_of("module2_score"),
            index_of("module3_score"),
            index_of("module4_score"),
        ];

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |idx: usize| row.get(idx).unwrap_or("").to_string();
            records.push(RecipientRecord {
                name: cell(name_idx),
                identifier: cell(id_idx),
                scores: score_idx.map(|idx| {
                    let value = cell(idx);
                    if value.trim().is_empty() {
                        None
                    } else {
                        Some(value)
                    }
                }),
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[RecipientRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
