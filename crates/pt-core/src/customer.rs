//! Customers of the trainer.

use serde::Serialize;

use crate::types::{CustomerId, ValidationError, require};

/// A customer record.
///
/// Contact details are required; address and city default to empty strings.
/// Email and phone formats are not checked, and nothing prevents two
/// customers from sharing an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// Customer fields as entered, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl Customer {
    /// Builds a customer from a draft, rejecting blank required fields.
    pub fn new(id: CustomerId, draft: CustomerDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            first_name: require(&draft.first_name, "first name")?,
            last_name: require(&draft.last_name, "last name")?,
            email: require(&draft.email, "email")?,
            phone: require(&draft.phone, "phone")?,
            address: draft.address.unwrap_or_default(),
            city: draft.city.unwrap_or_default(),
        })
    }

    /// Returns a replacement record carrying this customer's ID.
    pub fn revise(&self, draft: CustomerDraft) -> Result<Self, ValidationError> {
        Self::new(self.id.clone(), draft)
    }

    /// Returns a draft prefilled with this customer's current values.
    pub fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
        }
    }

    /// First and last name separated by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: "555-123-4567".to_string(),
            address: None,
            city: None,
        }
    }

    #[test]
    fn new_defaults_optional_fields_to_empty() {
        let customer = Customer::new(CustomerId::new("c1").unwrap(), draft()).unwrap();
        assert_eq!(customer.address, "");
        assert_eq!(customer.city, "");
        assert_eq!(customer.full_name(), "John Doe");
    }

    #[test]
    fn new_rejects_missing_required_fields() {
        let id = CustomerId::new("c1").unwrap();
        let missing_email = CustomerDraft {
            email: String::new(),
            ..draft()
        };
        assert_eq!(
            Customer::new(id.clone(), missing_email).unwrap_err(),
            ValidationError::Empty { field: "email" }
        );

        let blank_first = CustomerDraft {
            first_name: "  ".to_string(),
            ..draft()
        };
        assert!(Customer::new(id, blank_first).is_err());
    }

    #[test]
    fn revise_keeps_id_and_replaces_fields() {
        let original = Customer::new(CustomerId::new("c1").unwrap(), draft()).unwrap();
        let revised = original
            .revise(CustomerDraft {
                city: Some("Anytown".to_string()),
                ..original.to_draft()
            })
            .unwrap();

        assert_eq!(revised.id, original.id);
        assert_eq!(revised.city, "Anytown");
        assert_eq!(revised.first_name, "John");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let customer = Customer::new(CustomerId::new("c1").unwrap(), draft()).unwrap();
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["city"], "");
    }
}
