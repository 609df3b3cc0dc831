//! CSV encoding of the customer list.
//!
//! The layout is fixed: a header row, then one row per customer with every
//! value double-quoted and inner quotes doubled. Each row, including the
//! last, ends with `\n`.

use crate::customer::Customer;

/// Column headers, in output order.
pub const CUSTOMER_COLUMNS: [&str; 6] = [
    "First Name",
    "Last Name",
    "Email",
    "Phone",
    "Address",
    "City",
];

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Encodes customers as CSV text in the given order.
pub fn customers_to_csv(customers: &[Customer]) -> String {
    let mut csv = CUSTOMER_COLUMNS.join(",");
    csv.push('\n');

    for customer in customers {
        let row = [
            &customer.first_name,
            &customer.last_name,
            &customer.email,
            &customer.phone,
            &customer.address,
            &customer.city,
        ]
        .map(|value| quote(value));
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}
