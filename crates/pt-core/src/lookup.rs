//! Resolving a session's customer reference to a display name.

use std::collections::HashMap;

use crate::customer::Customer;
use crate::types::CustomerId;

/// Placeholder shown when a customer reference no longer resolves.
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Resolves customer IDs to names.
///
/// A miss is a normal outcome: sessions keep pointing at deleted customers.
pub trait CustomerNames {
    /// Full name of the customer, if it still exists.
    fn full_name(&self, id: &CustomerId) -> Option<String>;

    /// Full name, or [`UNKNOWN_CUSTOMER`] when the reference dangles.
    fn display_name(&self, id: &CustomerId) -> String {
        self.full_name(id)
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
    }
}

impl CustomerNames for [Customer] {
    fn full_name(&self, id: &CustomerId) -> Option<String> {
        self.iter().find(|c| &c.id == id).map(Customer::full_name)
    }
}

/// Customer index built once for repeated lookups.
#[derive(Debug, Default)]
pub struct CustomerLookup<'a> {
    by_id: HashMap<&'a CustomerId, &'a Customer>,
}

impl<'a> CustomerLookup<'a> {
    pub fn new(customers: &'a [Customer]) -> Self {
        Self {
            by_id: customers.iter().map(|c| (&c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: &CustomerId) -> Option<&'a Customer> {
        self.by_id.get(id).copied()
    }
}

impl CustomerNames for CustomerLookup<'_> {
    fn full_name(&self, id: &CustomerId) -> Option<String> {
        self.get(id).map(Customer::full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn resolves_existing_customer() {
        let customers = seed::customers();
        let id = CustomerId::new("c2").unwrap();
        assert_eq!(customers.display_name(&id), "Jane Smith");
        assert_eq!(CustomerLookup::new(&customers).display_name(&id), "Jane Smith");
    }

    #[test]
    fn dangling_reference_uses_placeholder() {
        let customers = seed::customers();
        let id = CustomerId::new("gone").unwrap();
        assert_eq!(customers.full_name(&id), None);
        assert_eq!(customers.display_name(&id), UNKNOWN_CUSTOMER);
        assert_eq!(
            CustomerLookup::new(&customers).display_name(&id),
            UNKNOWN_CUSTOMER
        );
    }
}
