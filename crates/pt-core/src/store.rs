//! Owned, ordered record collections.
//!
//! Every mutation takes `&self` and returns a new snapshot, leaving the
//! original untouched. A declined or failed operation therefore has no
//! partial effect.

use std::fmt;

use thiserror::Error;

use crate::customer::Customer;
use crate::training::Training;
use crate::types::{CustomerId, TrainingId, ValidationError};

/// Store operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this ID is already stored.
    #[error("{kind} already exists: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// No record has this ID.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The record failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A record that can live in a [`Store`].
pub trait Record: Clone {
    type Id: PartialEq + fmt::Display;

    /// Human-readable record kind, used in prompts and errors.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

impl Record for Customer {
    type Id = CustomerId;
    const KIND: &'static str = "customer";

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

impl Record for Training {
    type Id = TrainingId;
    const KIND: &'static str = "training session";

    fn id(&self) -> &TrainingId {
        &self.id
    }
}

/// Asks the user before a destructive change.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome<T> {
    /// The record was removed; `store` is the new snapshot.
    Deleted { store: Store<T>, removed: T },
    /// The user declined; nothing changed.
    Declined,
}

/// An ordered collection of records with unique IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store<T> {
    records: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

pub type CustomerStore = Store<Customer>;
pub type TrainingStore = Store<Training>;

fn not_found<T: Record>(id: &T::Id) -> StoreError {
    StoreError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    }
}

impl<T: Record> Store<T> {
    /// Builds a store, rejecting duplicate IDs.
    pub fn new(records: Vec<T>) -> Result<Self, StoreError> {
        records
            .into_iter()
            .try_fold(Self::default(), |store, record| store.add(record))
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record.
    pub fn add(&self, record: T) -> Result<Self, StoreError> {
        if self.contains(record.id()) {
            return Err(StoreError::DuplicateId {
                kind: T::KIND,
                id: record.id().to_string(),
            });
        }
        let mut records = self.records.clone();
        records.push(record);
        Ok(Self { records })
    }

    /// Removes a record once the user confirms.
    pub fn delete<C>(&self, id: &T::Id, confirm: &mut C) -> Result<DeleteOutcome<T>, StoreError>
    where
        C: Confirm + ?Sized,
    {
        let Some(position) = self.records.iter().position(|r| r.id() == id) else {
            return Err(not_found::<T>(id));
        };

        let prompt = format!("Are you sure you want to delete this {}?", T::KIND);
        if !confirm.confirm(&prompt) {
            tracing::debug!(kind = T::KIND, %id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let mut records = self.records.clone();
        let removed = records.remove(position);
        Ok(DeleteOutcome::Deleted {
            store: Self { records },
            removed,
        })
    }
}

impl Store<Customer> {
    /// Replaces the customer with the same ID wholesale, keeping its position.
    ///
    /// Training sessions have no counterpart; they can only be added or deleted.
    pub fn update(&self, customer: Customer) -> Result<Self, StoreError> {
        let Some(position) = self.records.iter().position(|c| c.id == customer.id) else {
            return Err(not_found::<Customer>(&customer.id));
        };
        let mut records = self.records.clone();
        records[position] = customer;
        Ok(Self { records })
    }
}
