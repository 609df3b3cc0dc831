//! Search and sort over store snapshots.
//!
//! Everything here is pure: callers own the search text and sort state and
//! pass a snapshot in, getting a filtered, reordered copy back.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::lookup::{CustomerLookup, CustomerNames};
use crate::training::Training;
use crate::types::ValidationError;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The column a list is sorted by and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub const fn ascending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Header-click semantics: the same field flips direction, a new field
    /// starts ascending.
    #[must_use]
    pub fn toggle(self, field: F) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self::ascending(field)
        }
    }
}

/// A comparable sort key extracted from a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Lowercased string form of the field.
    Text(String),
    /// Time fields compare chronologically.
    Time(NaiveDateTime),
}

impl SortKey {
    pub fn text(value: impl AsRef<str>) -> Self {
        Self::Text(value.as_ref().to_lowercase())
    }
}

/// Keeps records whose haystack contains `query`, ignoring case.
///
/// An empty query keeps everything in its original order.
pub fn search<T, F>(records: &[T], query: &str, haystack: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|&record| needle.is_empty() || haystack(record).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort on a key computed once per record.
///
/// Records with equal keys keep their input order in both directions.
pub fn sort_by_key<T, F>(records: &[T], direction: SortDirection, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> SortKey,
{
    let mut keyed: Vec<(SortKey, &T)> = records.iter().map(|r| (key(r), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Normalizes `lastName`, `last-name` and `last_name` to `lastname`.
fn normalize_field_name(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// ========== Customers ==========

/// Sortable customer columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
}

impl CustomerField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
        }
    }

    /// Optional fields default to the empty string, so they sort first.
    pub fn key(self, customer: &Customer) -> SortKey {
        let value = match self {
            Self::FirstName => &customer.first_name,
            Self::LastName => &customer.last_name,
            Self::Email => &customer.email,
            Self::Phone => &customer.phone,
            Self::Address => &customer.address,
            Self::City => &customer.city,
        };
        SortKey::text(value)
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_field_name(s).as_str() {
            "firstname" => Ok(Self::FirstName),
            "lastname" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            "city" => Ok(Self::City),
            _ => Err(ValidationError::UnknownField {
                entity: "customer",
                value: s.to_string(),
            }),
        }
    }
}

/// Search text: first name, last name and email.
pub fn customer_haystack(customer: &Customer) -> String {
    format!(
        "{} {} {}",
        customer.first_name, customer.last_name, customer.email
    )
}

/// Search text plus sort state for the customer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerQuery {
    pub search: String,
    pub sort: SortState<CustomerField>,
}

impl Default for CustomerQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortState::ascending(CustomerField::LastName),
        }
    }
}

impl CustomerQuery {
    /// Filters, then sorts.
    pub fn apply(&self, customers: &[Customer]) -> Vec<Customer> {
        let matches = search(customers, &self.search, customer_haystack);
        let field = self.sort.field;
        sort_by_key(&matches, self.sort.direction, |c| field.key(c))
    }
}

// ========== Trainings ==========

/// Sortable training columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrainingField {
    Date,
    Activity,
    Duration,
    /// Derived: the referenced customer's display name.
    Customer,
}

impl TrainingField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Activity => "activity",
            Self::Duration => "duration",
            Self::Customer => "customer",
        }
    }

    /// Duration sorts by its string form like every other plain column.
    pub fn key<N>(self, training: &Training, names: &N) -> SortKey
    where
        N: CustomerNames + ?Sized,
    {
        match self {
            Self::Date => SortKey::Time(training.date),
            Self::Activity => SortKey::text(&training.activity),
            Self::Duration => SortKey::text(training.duration.to_string()),
            Self::Customer => SortKey::text(names.display_name(&training.customer_id)),
        }
    }
}

impl fmt::Display for TrainingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_field_name(s).as_str() {
            "date" => Ok(Self::Date),
            "activity" => Ok(Self::Activity),
            "duration" => Ok(Self::Duration),
            "customer" => Ok(Self::Customer),
            _ => Err(ValidationError::UnknownField {
                entity: "training",
                value: s.to_string(),
            }),
        }
    }
}

/// Search text: customer display name and activity.
pub fn training_haystack<N>(training: &Training, names: &N) -> String
where
    N: CustomerNames + ?Sized,
{
    format!(
        "{} {}",
        names.display_name(&training.customer_id),
        training.activity
    )
}

/// Search text plus sort state for the training list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingQuery {
    pub search: String,
    pub sort: SortState<TrainingField>,
}

impl Default for TrainingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortState::ascending(TrainingField::Date),
        }
    }
}

impl TrainingQuery {
    /// Filters, then sorts, resolving customer names through `customers`.
    pub fn apply(&self, trainings: &[Training], customers: &[Customer]) -> Vec<Training> {
        let lookup = CustomerLookup::new(customers);
        let matches = search(trainings, &self.search, |t| training_haystack(t, &lookup));
        let field = self.sort.field;
        sort_by_key(&matches, self.sort.direction, |t| field.key(t, &lookup))
    }
}
