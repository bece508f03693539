//! In-memory record stores.
//!
//! A [`RecordStore`] is an ordered collection of one record type. It is owned
//! by exactly one screen; every mutation goes through `&mut self`, so the
//! borrow checker enforces the single-writer rule. Identifiers come from a
//! per-store sequence that starts after the largest identifier present when
//! the store is built and never hands out the same value twice.

use std::fmt::{Debug, Display};

use tracing::info;

use crate::error::AdminError;

/// A record that can live in a [`RecordStore`].
pub trait Record {
    /// Typed identifier for this record kind.
    type Id: Copy + Eq + Debug + Display + From<i64> + Into<i64>;

    /// Singular record kind, used in logs and errors.
    const KIND: &'static str;

    /// This record's identifier.
    fn id(&self) -> Self::Id;
}

/// Allocates identifiers for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    /// Start a sequence that continues after the largest of `existing`.
    pub fn after<I: Into<i64>>(existing: impl IntoIterator<Item = I>) -> Self {
        let last = existing.into_iter().map(Into::into).max().unwrap_or(0);
        Self { last }
    }

    /// Allocate the next identifier.
    pub fn allocate<I: From<i64>>(&mut self) -> I {
        self.last += 1;
        I::from(self.last)
    }
}

/// Asks the person at the keyboard to confirm a destructive action.
pub trait Confirm {
    /// Return `true` to proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A fixed answer to every confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Confirmation answered by a closure (e.g. a terminal prompt).
pub struct ConfirmWith<F>(pub F);

impl<F: FnMut(&str) -> bool> Confirm for ConfirmWith<F> {
    fn confirm(&mut self, prompt: &str) -> bool {
        (self.0)(prompt)
    }
}

/// Result of a confirmation-gated delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome<R> {
    /// The record was removed.
    Deleted(R),
    /// The user declined; nothing changed.
    Declined,
}

impl<R> DeleteOutcome<R> {
    /// Whether a record was removed.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// Ordered, exclusively owned collection of records.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    ids: IdSequence,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            ids: IdSequence::default(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    /// Build a store from existing records, preserving their order.
    #[must_use]
    pub fn from_records(records: Vec<R>) -> Self {
        let ids = IdSequence::after(records.iter().map(Record::id));
        Self { records, ids }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by identifier.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Look up a record, failing with [`AdminError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier.
    pub fn require(&self, id: R::Id) -> Result<&R, AdminError> {
        self.get(id).ok_or_else(|| not_found::<R>(id))
    }

    /// Append a record built around a freshly allocated identifier.
    pub fn insert_with(&mut self, build: impl FnOnce(R::Id) -> R) -> R::Id {
        let id = self.ids.allocate::<R::Id>();
        self.records.push(build(id));
        info!(kind = R::KIND, %id, total = self.records.len(), "Record created");
        id
    }

    /// Like [`insert_with`](Self::insert_with) for builders that can fail.
    ///
    /// The identifier handed to a failing builder is not reused.
    ///
    /// # Errors
    ///
    /// Returns the builder's error; the store is unchanged.
    pub fn try_insert_with<E>(
        &mut self,
        build: impl FnOnce(R::Id) -> Result<R, E>,
    ) -> Result<R::Id, E> {
        let id = self.ids.allocate::<R::Id>();
        self.records.push(build(id)?);
        info!(kind = R::KIND, %id, total = self.records.len(), "Record created");
        Ok(id)
    }

    /// Replace the record matching `id` in place.
    ///
    /// Every other record keeps its value and position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier.
    pub fn replace_with(
        &mut self,
        id: R::Id,
        merge: impl FnOnce(&R) -> R,
    ) -> Result<&R, AdminError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        *slot = merge(slot);
        info!(kind = R::KIND, %id, "Record updated");
        Ok(&*slot)
    }

    /// Apply `change` to every record.
    pub fn update_all(&mut self, mut change: impl FnMut(&mut R)) {
        self.records.iter_mut().for_each(&mut change);
    }

    /// Remove the record matching `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier.
    pub fn remove(&mut self, id: R::Id) -> Result<R, AdminError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        let removed = self.records.remove(index);
        info!(kind = R::KIND, %id, total = self.records.len(), "Record deleted");
        Ok(removed)
    }

    /// Remove every record. Identifiers are not reused afterwards.
    pub fn clear(&mut self) {
        let removed = self.records.len();
        self.records.clear();
        info!(kind = R::KIND, removed, "Store cleared");
    }
}

fn not_found<R: Record>(id: R::Id) -> AdminError {
    AdminError::NotFound {
        kind: R::KIND,
        id: id.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use backoffice_core::define_id;

    define_id!(NoteId, "note");

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: NoteId,
        text: &'static str,
    }

    impl Record for Note {
        type Id = NoteId;
        const KIND: &'static str = "note";

        fn id(&self) -> NoteId {
            self.id
        }
    }

    fn note(id: i64, text: &'static str) -> Note {
        Note {
            id: NoteId::new(id),
            text,
        }
    }

    fn store() -> RecordStore<Note> {
        RecordStore::from_records(vec![note(1, "a"), note(5, "b"), note(3, "c")])
    }

    #[test]
    fn test_insert_allocates_after_largest_existing_id() {
        let mut store = store();
        let id = store.insert_with(|id| Note { id, text: "d" });
        assert_eq!(id, NoteId::new(6));
        assert_eq!(store.len(), 4);
        assert_eq!(store.records().last().unwrap().text, "d");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = store();
        let first = store.insert_with(|id| Note { id, text: "d" });
        store.remove(first).unwrap();
        let second = store.insert_with(|id| Note { id, text: "e" });
        assert_ne!(first, second);
    }

    #[test]
    fn test_failed_insert_leaves_store_unchanged() {
        let mut store = store();
        let result: Result<NoteId, &str> = store.try_insert_with(|_| Err("rejected"));
        assert_eq!(result, Err("rejected"));
        assert_eq!(store.len(), 3);

        let id = store.try_insert_with(|id| Ok::<_, &str>(Note { id, text: "d" })).unwrap();
        assert_eq!(id, NoteId::new(7));
    }

    #[test]
    fn test_replace_keeps_order_and_neighbours() {
        let mut store = store();
        let before = store.records().to_vec();
        store
            .replace_with(NoteId::new(5), |n| Note { text: "B", ..n.clone() })
            .unwrap();

        assert_eq!(store.len(), before.len());
        assert_eq!(store.records()[0], before[0]);
        assert_eq!(store.records()[1].text, "B");
        assert_eq!(store.records()[2], before[2]);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let mut store = store();
        let err = store.remove(NoteId::new(42)).unwrap_err();
        assert!(matches!(err, AdminError::NotFound { kind: "note", .. }));
        assert_eq!(store.len(), 3);
        assert!(store.require(NoteId::new(42)).is_err());
    }

    #[test]
    fn test_remove_exactly_one() {
        let mut store = store();
        let removed = store.remove(NoteId::new(5)).unwrap();
        assert_eq!(removed.text, "b");
        let ids: Vec<_> = store.records().iter().map(|n| n.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_confirmers() {
        assert!(AutoConfirm(true).confirm("sure?"));
        assert!(!AutoConfirm(false).confirm("sure?"));

        let mut seen = Vec::new();
        let mut confirm = ConfirmWith(|prompt: &str| {
            seen.push(prompt.to_string());
            false
        });
        assert!(!confirm.confirm("delete?"));
        drop(confirm);
        assert_eq!(seen, vec!["delete?".to_string()]);
    }
}
