//! Training session list with search and sorting.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Result, bail};
use chrono::format::{Item, StrftimeItems};
use pt_core::{
    ACTIVITY_OPTIONS, Customer, CustomerLookup, CustomerNames, SortDirection, SortState,
    Training, TrainingField, TrainingQuery,
};
use serde::Serialize;

use super::util::{fit, header, rule};

const WIDTHS: [usize; 4] = [16, 18, 9, 16];

/// Rejects `chrono` format strings that would fail while rendering.
pub fn check_date_format(date_format: &str) -> Result<()> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid date_format {date_format:?}: not a valid chrono format string");
    }
    Ok(())
}

/// Format the training table.
///
/// `date_format` must have passed [`check_date_format`].
pub fn format_trainings(
    trainings: &[Training],
    customers: &[Customer],
    query: &TrainingQuery,
    date_format: &str,
    total: usize,
) -> String {
    let mut output = String::new();

    writeln!(output, "TRAINING SESSIONS ({} of {total})", trainings.len()).unwrap();
    writeln!(output).unwrap();

    if trainings.is_empty() {
        if query.search.is_empty() {
            writeln!(output, "No training sessions yet.").unwrap();
        } else {
            writeln!(output, "No training sessions match \"{}\".", query.search).unwrap();
        }
        return output;
    }

    let sort = &query.sort;
    let [date, activity, minutes, customer] = WIDTHS;
    writeln!(
        output,
        "{:<date$}  {:<activity$}  {:>minutes$}  {:<customer$}  ID",
        header("Date", TrainingField::Date, sort),
        header("Activity", TrainingField::Activity, sort),
        header("Minutes", TrainingField::Duration, sort),
        header("Customer", TrainingField::Customer, sort),
    )
    .unwrap();
    writeln!(output, "{}", rule(&[date, activity, minutes, customer, 2])).unwrap();

    let lookup = CustomerLookup::new(customers);
    for training in trainings {
        writeln!(
            output,
            "{:<date$}  {:<activity$}  {:>minutes$}  {:<customer$}  {}",
            training.date.format(date_format).to_string(),
            fit(&training.activity, activity),
            training.duration,
            fit(&lookup.display_name(&training.customer_id), customer),
            training.id,
        )
        .unwrap();
    }

    output
}

/// A session with its customer's name resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTraining<'a> {
    #[serde(flatten)]
    pub training: &'a Training,
    pub customer_name: String,
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonTrainings<'a> {
    pub search: &'a str,
    pub sort: SortState<TrainingField>,
    pub total: usize,
    pub trainings: Vec<JsonTraining<'a>>,
}

/// Format the training list as JSON.
pub fn format_trainings_json(
    trainings: &[Training],
    customers: &[Customer],
    query: &TrainingQuery,
    total: usize,
) -> Result<String> {
    let lookup = CustomerLookup::new(customers);
    let json = JsonTrainings {
        search: &query.search,
        sort: query.sort,
        total,
        trainings: trainings
            .iter()
            .map(|training| JsonTraining {
                training,
                customer_name: lookup.display_name(&training.customer_id),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Builds the query for the one-shot `trainings` command.
pub fn query_from_args(search: &str, field: TrainingField, desc: bool) -> TrainingQuery {
    TrainingQuery {
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

/// Runs the trainings command.
pub fn run<W: Write>(
    writer: &mut W,
    trainings: &[Training],
    customers: &[Customer],
    query: &TrainingQuery,
    date_format: &str,
    json: bool,
) -> Result<()> {
    check_date_format(date_format)?;
    let shown = query.apply(trainings, customers);
    tracing::debug!(shown = shown.len(), total = trainings.len(), "listing trainings");

    if json {
        let output = format_trainings_json(&shown, customers, query, trainings.len())?;
        writeln!(writer, "{output}")?;
    } else {
        let output = format_trainings(&shown, customers, query, date_format, trainings.len());
        write!(writer, "{output}")?;
    }
    Ok(())
}

/// Runs the activities command.
pub fn run_activities<W: Write>(writer: &mut W, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&ACTIVITY_OPTIONS)?)?;
    } else {
        for activity in ACTIVITY_OPTIONS {
            writeln!(writer, "{activity}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use pt_core::{CustomerId, seed};

    const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

    fn render(customers: &[Customer], query: &TrainingQuery) -> String {
        let mut output = Vec::new();
        run(
            &mut output,
            &seed::trainings(),
            customers,
            query,
            DATE_FORMAT,
            false,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_trainings_sorted_by_date() {
        assert_snapshot!(render(&seed::customers(), &TrainingQuery::default()), @r"
        TRAINING SESSIONS (7 of 7)

        Date ▲            Activity              Minutes  Customer          ID
        ────────────────  ──────────────────  ─────────  ────────────────  ──
        15.04.2025 10:30  Running                    30  John Doe          t1
        16.04.2025 14:00  Yoga                       60  Jane Smith        t2
        17.04.2025 09:15  Strength Training          45  John Doe          t3
        18.04.2025 16:30  Spinning                   45  Robert Johnson    t4
        19.04.2025 11:00  Swimming                   60  Sarah Williams    t5
        20.04.2025 13:45  Yoga                       75  Jane Smith        t6
        21.04.2025 08:00  Running                    45  Michael Brown     t7
        ");
    }

    #[test]
    fn test_trainings_show_unknown_for_deleted_customer() {
        let c1 = CustomerId::new("c1").unwrap();
        let customers: Vec<Customer> = seed::customers()
            .into_iter()
            .filter(|c| c.id != c1)
            .collect();
        let query = query_from_args("unknown", TrainingField::Customer, false);
        let output = render(&customers, &query);

        assert!(output.starts_with("TRAINING SESSIONS (2 of 7)"));
        assert!(output.contains("Customer ▲"));
        let rows: Vec<&str> = output.lines().skip(4).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.contains("Unknown")));
    }

    #[test]
    fn test_trainings_json_resolves_names() {
        let query = query_from_args("yoga", TrainingField::Duration, true);
        let customers = seed::customers();
        let shown = query.apply(&seed::trainings(), &customers);
        let output = format_trainings_json(&shown, &customers, &query, 7).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["sort"]["field"], "duration");
        assert_eq!(value["sort"]["direction"], "descending");
        assert_eq!(value["trainings"][0]["id"], "t6");
        assert_eq!(value["trainings"][0]["customerId"], "c2");
        assert_eq!(value["trainings"][0]["customerName"], "Jane Smith");
        assert_eq!(value["trainings"][0]["date"], "2025-04-20T13:45:00");
    }

    #[test]
    fn test_invalid_date_format_is_an_error() {
        let mut output = Vec::new();
        let err = run(
            &mut output,
            &seed::trainings(),
            &seed::customers(),
            &TrainingQuery::default(),
            "%Q",
            false,
        )
        .unwrap_err();

        assert!(err.to_string().contains("invalid date_format \"%Q\""));
        assert!(output.is_empty());
    }

    #[test]
    fn test_activities_lists_suggestions() {
        let mut output = Vec::new();
        run_activities(&mut output, false).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 10);
        assert_eq!(output.lines().next(), Some("Running"));
    }
}
