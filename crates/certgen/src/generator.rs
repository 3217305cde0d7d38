//! Sequential batch driver

use crate::output::{sanitize_name, OutputLayout};
use crate::roster::Roster;
use crate::Result;
use overlay::{OverlayEngine, RecipientRecord, Template};
use std::path::Path;

/// One recipient that failed, with enough context to find the row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 1-based data row number
    pub row: usize,
    pub name: String,
    pub reason: String,
}

/// Outcome of a batch run
///
/// A failed recipient never aborts the run; it is recorded here and the
/// run moves on.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: usize,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives one batch: renders both pages per recipient, then composes the
/// document
pub struct Generator {
    engine: OverlayEngine,
    front: Template,
    back: Template,
    layout: OutputLayout,
}

impl Generator {
    /// Load both templates and prepare the output layout
    pub fn new(
        front_template: impl AsRef<Path>,
        back_template: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self {
            engine: OverlayEngine::new(),
            front: Template::open(front_template)?,
            back: Template::open(back_template)?,
            layout: OutputLayout::create(output_root)?,
        })
    }

    /// Engine access for style/coordinate overrides, applied before `run`
    pub fn engine_mut(&mut self) -> &mut OverlayEngine {
        &mut self.engine
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Process the whole roster sequentially
    ///
    /// `progress(done, total)` fires after each record completes, whether
    /// it succeeded or failed.
    pub fn run<F>(&self, roster: &Roster, mut progress: F) -> BatchReport
    where
        F: FnMut(usize, usize),
    {
        let total = roster.len();
        log::info!("processing {total} certificates");

        let mut report = BatchReport::default();
        for (index, record) in roster.records().iter().enumerate() {
            match self.generate_one(record) {
                Ok(()) => {
                    report.generated += 1;
                    log::info!("certificate completed for {}", record.name);
                }
                Err(e) => {
                    log::error!("row {}: {} failed: {e}", index + 1, record.name);
                    report.failures.push(RowFailure {
                        row: index + 1,
                        name: record.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            progress(index + 1, total);
        }
        report
    }

    fn generate_one(&self, record: &RecipientRecord) -> Result<()> {
        let safe_name = sanitize_name(&record.name);
        let front_path = self.layout.front_path(&safe_name);
        let back_path = self.layout.back_path(&safe_name);

        self.engine
            .render_front(&self.front, &record.name, &record.identifier)
            .save(&front_path)?;
        self.engine.render_back(&self.back, record).save(&back_path)?;

        compose::compose(
            front_path.as_path(),
            back_path.as_path(),
            self.layout.document_path(&safe_name).as_path(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_starts_clean() {
        let report = BatchReport::default();
        assert!(report.is_clean());
        assert_eq!(report.generated, 0);
    }

    #[test]
    fn test_report_with_failure() {
        let mut report = BatchReport::default();
        report.failures.push(RowFailure {
            row: 3,
            name: "Jane".to_string(),
            reason: "boom".to_string(),
        });
        assert!(!report.is_clean());
    }

    #[test]
    fn test_generator_rejects_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(Generator::new(&missing, &missing, dir.path()).is_err());
    }
}
