//! Top-level application state owning both stores.

use tracing::{info, warn};

use crate::customer::{Customer, CustomerDraft};
use crate::lookup::CustomerNames;
use crate::seed;
use crate::store::{Confirm, CustomerStore, DeleteOutcome, Store, StoreError, TrainingStore};
use crate::training::{Training, TrainingDraft, is_suggested_activity};
use crate::types::{CustomerId, TrainingId};

/// Customers and training sessions for one session of use.
///
/// Each command swaps in the snapshot its store operation returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    customers: CustomerStore,
    trainings: TrainingStore,
}

impl AppState {
    /// State built from the sample customers and sessions.
    pub fn seeded() -> Result<Self, StoreError> {
        Ok(Self {
            customers: Store::new(seed::customers())?,
            trainings: Store::new(seed::trainings())?,
        })
    }

    pub const fn customers(&self) -> &CustomerStore {
        &self.customers
    }

    pub const fn trainings(&self) -> &TrainingStore {
        &self.trainings
    }

    /// Display name for a session's customer, `Unknown` if deleted.
    pub fn customer_name(&self, id: &CustomerId) -> String {
        self.customers.all().display_name(id)
    }

    /// Validates the draft and stores it under a freshly generated ID.
    pub fn add_customer(&mut self, draft: CustomerDraft) -> Result<Customer, StoreError> {
        let customer = Customer::new(CustomerId::generate(), draft)?;
        self.customers = self.customers.add(customer.clone())?;
        info!(id = %customer.id, "customer added");
        Ok(customer)
    }

    /// Replaces an existing customer's fields, keeping its ID.
    pub fn update_customer(
        &mut self,
        id: &CustomerId,
        draft: CustomerDraft,
    ) -> Result<Customer, StoreError> {
        let existing = self.customers.get(id).ok_or_else(|| StoreError::NotFound {
            kind: "customer",
            id: id.to_string(),
        })?;
        let customer = existing.revise(draft)?;
        self.customers = self.customers.update(customer.clone())?;
        info!(%id, "customer updated");
        Ok(customer)
    }

    /// Deletes a customer after confirmation. Returns whether it was removed.
    ///
    /// Their training sessions stay; their names resolve to `Unknown`.
    pub fn delete_customer<C>(
        &mut self,
        id: &CustomerId,
        confirm: &mut C,
    ) -> Result<bool, StoreError>
    where
        C: Confirm + ?Sized,
    {
        match self.customers.delete(id, confirm)? {
            DeleteOutcome::Deleted { store, .. } => {
                self.customers = store;
                let orphaned = self
                    .trainings
                    .all()
                    .iter()
                    .filter(|t| &t.customer_id == id)
                    .count();
                info!(%id, orphaned, "customer deleted");
                Ok(true)
            }
            DeleteOutcome::Declined => Ok(false),
        }
    }

    /// Validates the draft and stores it under a freshly generated ID.
    pub fn add_training(&mut self, draft: TrainingDraft) -> Result<Training, StoreError> {
        if !is_suggested_activity(&draft.activity) {
            warn!(activity = %draft.activity, "activity is not one of the suggested options");
        }
        if !self.customers.contains(&draft.customer_id) {
            warn!(customer = %draft.customer_id, "training references an unknown customer");
        }
        let training = Training::new(TrainingId::generate(), draft)?;
        self.trainings = self.trainings.add(training.clone())?;
        info!(id = %training.id, "training added");
        Ok(training)
    }

    /// Deletes a session after confirmation. Returns whether it was removed.
    pub fn delete_training<C>(
        &mut self,
        id: &TrainingId,
        confirm: &mut C,
    ) -> Result<bool, StoreError>
    where
        C: Confirm + ?Sized,
    {
        match self.trainings.delete(id, confirm)? {
            DeleteOutcome::Deleted { store, .. } => {
                self.trainings = store;
                info!(%id, "training deleted");
                Ok(true)
            }
            DeleteOutcome::Declined => Ok(false),
        }
    }
}
