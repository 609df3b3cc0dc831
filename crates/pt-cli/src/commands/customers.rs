//! Customer list with search and sorting.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use pt_core::{Customer, CustomerField, CustomerQuery, SortDirection, SortState};
use serde::Serialize;

use super::util::{fit, header, rule};

const WIDTHS: [usize; 4] = [12, 12, 26, 14];

/// Format the customer table.
pub fn format_customers(customers: &[Customer], query: &CustomerQuery, total: usize) -> String {
    let mut output = String::new();

    writeln!(output, "CUSTOMERS ({} of {total})", customers.len()).unwrap();
    writeln!(output).unwrap();

    if customers.is_empty() {
        if query.search.is_empty() {
            writeln!(output, "No customers yet.").unwrap();
        } else {
            writeln!(output, "No customers match \"{}\".", query.search).unwrap();
        }
        return output;
    }

    let sort = &query.sort;
    let [first, last, email, phone] = WIDTHS;
    writeln!(
        output,
        "{:<first$}  {:<last$}  {:<email$}  {:<phone$}  ID",
        header("First Name", CustomerField::FirstName, sort),
        header("Last Name", CustomerField::LastName, sort),
        header("Email", CustomerField::Email, sort),
        header("Phone", CustomerField::Phone, sort),
    )
    .unwrap();
    writeln!(output, "{}", rule(&[first, last, email, phone, 2])).unwrap();

    for customer in customers {
        writeln!(
            output,
            "{:<first$}  {:<last$}  {:<email$}  {:<phone$}  {}",
            fit(&customer.first_name, first),
            fit(&customer.last_name, last),
            fit(&customer.email, email),
            fit(&customer.phone, phone),
            customer.id,
        )
        .unwrap();
    }

    output
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonCustomers<'a> {
    pub search: &'a str,
    pub sort: SortState<CustomerField>,
    pub total: usize,
    pub customers: &'a [Customer],
}

/// Format the customer list as JSON.
pub fn format_customers_json(
    customers: &[Customer],
    query: &CustomerQuery,
    total: usize,
) -> Result<String> {
    let json = JsonCustomers {
        search: &query.search,
        sort: query.sort,
        total,
        customers,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Builds the query for the one-shot `customers` command.
pub fn query_from_args(search: &str, field: CustomerField, desc: bool) -> CustomerQuery {
    CustomerQuery {
        search: search.to_string(),
        sort: SortState {
            field,
            direction: if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        },
    }
}

/// Runs the customers command.
pub fn run<W: Write>(
    writer: &mut W,
    customers: &[Customer],
    query: &CustomerQuery,
    json: bool,
) -> Result<()> {
    let shown = query.apply(customers);
    tracing::debug!(shown = shown.len(), total = customers.len(), "listing customers");

    if json {
        writeln!(writer, "{}", format_customers_json(&shown, query, customers.len())?)?;
    } else {
        write!(writer, "{}", format_customers(&shown, query, customers.len()))?;
    }
    Ok(())
}
