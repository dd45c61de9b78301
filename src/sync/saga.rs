//! Compensation ledger for multi-step publishes.
//!
//! Object storage and the catalog share no commit point. Each step that
//! changes a remote system records how to undo itself; if a later step
//! fails, the recorded undos run newest first.

use crate::error::MockupError;

use super::storage::ObjectStorage;

/// Undo action for a completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Remove an object written to storage.
    DeleteObject(String),
}

/// Completed steps awaiting either commit or compensation.
#[derive(Debug, Default)]
pub struct Saga {
    completed: Vec<Compensation>,
}

impl Saga {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the undo action of a step that just succeeded.
    pub fn record(&mut self, compensation: Compensation) {
        self.completed.push(compensation);
    }

    /// Undo actions recorded so far, oldest first.
    pub fn pending(&self) -> &[Compensation] {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Finish successfully, dropping all undo actions.
    pub fn commit(self) -> usize {
        self.completed.len()
    }

    /// Run the recorded undo actions in reverse order.
    ///
    /// Consecutive object deletions are sent as one batch. Every batch is
    /// attempted even if an earlier one fails; the failures are returned.
    pub fn compensate(self, storage: &dyn ObjectStorage) -> Vec<MockupError> {
        let mut failures = Vec::new();
        let mut batch: Vec<String> = Vec::new();

        for compensation in self.completed.into_iter().rev() {
            match compensation {
                Compensation::DeleteObject(key) => batch.push(key),
            }
        }

        flush_deletes(storage, &mut batch, &mut failures);

        failures
    }
}

fn flush_deletes(storage: &dyn ObjectStorage, batch: &mut Vec<String>, failures: &mut Vec<MockupError>) {
    if batch.is_empty() {
        return;
    }

    tracing::debug!("Deleting {} object(s)", batch.len());
    if let Err(e) = storage.delete(batch) {
        failures.push(e);
    }
    batch.clear();
}
