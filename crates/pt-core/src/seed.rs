//! Sample data loaded on every start.

use chrono::{NaiveDate, NaiveDateTime};

use crate::customer::Customer;
use crate::training::Training;
use crate::types::{CustomerId, TrainingId};

struct CustomerSeed {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    city: &'static str,
}

const CUSTOMERS: [CustomerSeed; 5] = [
    CustomerSeed {
        id: "c1",
        first_name: "John",
        last_name: "Doe",
        email: "john.doe@example.com",
        phone: "555-123-4567",
        address: "123 Main St",
        city: "Anytown",
    },
    CustomerSeed {
        id: "c2",
        first_name: "Jane",
        last_name: "Smith",
        email: "jane.smith@example.com",
        phone: "555-987-6543",
        address: "456 Oak Ave",
        city: "Somewhere",
    },
    CustomerSeed {
        id: "c3",
        first_name: "Robert",
        last_name: "Johnson",
        email: "robert@example.com",
        phone: "555-555-5555",
        address: "789 Pine Rd",
        city: "Nowhere",
    },
    CustomerSeed {
        id: "c4",
        first_name: "Sarah",
        last_name: "Williams",
        email: "sarah@example.com",
        phone: "555-222-3333",
        address: "101 Elm St",
        city: "Elsewhere",
    },
    CustomerSeed {
        id: "c5",
        first_name: "Michael",
        last_name: "Brown",
        email: "michael@example.com",
        phone: "555-444-7777",
        address: "202 Cedar Ln",
        city: "Anytown",
    },
];

// (id, (day, hour, minute) in April 2025, activity, minutes, customer)
const TRAININGS: [(&str, (u32, u32, u32), &str, u32, &str); 7] = [
    ("t1", (15, 10, 30), "Running", 30, "c1"),
    ("t2", (16, 14, 0), "Yoga", 60, "c2"),
    ("t3", (17, 9, 15), "Strength Training", 45, "c1"),
    ("t4", (18, 16, 30), "Spinning", 45, "c3"),
    ("t5", (19, 11, 0), "Swimming", 60, "c4"),
    ("t6", (20, 13, 45), "Yoga", 75, "c2"),
    ("t7", (21, 8, 0), "Running", 45, "c5"),
];

fn april_2025(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// The five sample customers, `c1` through `c5`.
pub fn customers() -> Vec<Customer> {
    CUSTOMERS
        .iter()
        .map(|seed| Customer {
            id: CustomerId(seed.id.to_string()),
            first_name: seed.first_name.to_string(),
            last_name: seed.last_name.to_string(),
            email: seed.email.to_string(),
            phone: seed.phone.to_string(),
            address: seed.address.to_string(),
            city: seed.city.to_string(),
        })
        .collect()
}

/// The seven sample sessions, `t1` through `t7`.
pub fn trainings() -> Vec<Training> {
    TRAININGS
        .iter()
        .map(|&(id, (day, hour, minute), activity, duration, customer)| Training {
            id: TrainingId(id.to_string()),
            date: april_2025(day, hour, minute),
            activity: activity.to_string(),
            duration,
            customer_id: CustomerId(customer.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::parse_session_time;

    #[test]
    fn seed_counts() {
        assert_eq!(customers().len(), 5);
        assert_eq!(trainings().len(), 7);
    }

    #[test]
    fn seed_dates_match_sample_timestamps() {
        let trainings = trainings();
        assert_eq!(
            trainings[0].date,
            parse_session_time("2025-04-15T10:30:00").unwrap()
        );
        assert_eq!(
            trainings[5].date,
            parse_session_time("2025-04-20T13:45:00").unwrap()
        );
    }

    #[test]
    fn every_seed_session_references_a_seed_customer() {
        let customers = customers();
        for training in trainings() {
            assert!(customers.iter().any(|c| c.id == training.customer_id));
        }
    }
}
