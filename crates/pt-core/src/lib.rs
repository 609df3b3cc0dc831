//! Core domain logic for the personal trainer workspace.
//!
//! This crate contains the fundamental types and logic for:
//! - Stores: customers and training sessions with snapshot-returning mutations
//! - Query: case-insensitive search and stable multi-field sorting
//! - Stats: minutes per activity, ranked
//! - Calendar: sessions projected to time intervals, plus month/week/day views
//! - CSV: the customer export format

pub mod calendar;
pub mod csv;
pub mod customer;
pub mod lookup;
pub mod query;
pub mod seed;
mod state;
pub mod stats;
pub mod store;
pub mod training;
pub mod types;

pub use calendar::{CalendarEvent, CalendarView, TimeRange, events_in_range, project, view_range};
pub use csv::customers_to_csv;
pub use customer::{Customer, CustomerDraft};
pub use lookup::{CustomerLookup, CustomerNames, UNKNOWN_CUSTOMER};
pub use query::{
    CustomerField, CustomerQuery, SortDirection, SortKey, SortState, TrainingField, TrainingQuery,
};
pub use state::AppState;
pub use stats::{ActivityReport, ActivityTotal, aggregate_by_activity};
pub use store::{Confirm, CustomerStore, DeleteOutcome, Store, StoreError, TrainingStore};
pub use training::{ACTIVITY_OPTIONS, Training, TrainingDraft, parse_session_time};
pub use types::{CustomerId, TrainingId, ValidationError};
