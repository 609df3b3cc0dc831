//! Interactive session: one command per line, state kept until `quit`.
//!
//! Lines are split into words with shell-like quoting, then parsed with the
//! same `clap` machinery as the one-shot commands. A failing command prints
//! its error and the session carries on.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use pt_core::{
    AppState, CustomerDraft, CustomerField, CustomerId, CustomerQuery, StoreError, TrainingDraft,
    TrainingField, TrainingId, TrainingQuery, parse_session_time,
};

use super::{calendar, customers, export, stats, trainings, util};
use crate::Config;
use crate::cli::{CalendarArgs, ExportArgs};
use crate::prompt::Prompt;

// ========== Line Parsing ==========

/// Splits a line into words. Single and double quotes group words and may
/// be empty; adjacent quoted and bare text join into one word.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("unterminated {q} quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[derive(Debug, Parser)]
#[command(name = "pt shell", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// List customers with the current search and sort.
    Customers,

    /// List training sessions with the current search and sort.
    Trainings,

    /// Show total minutes per activity.
    Stats,

    /// Show training sessions on a calendar.
    Calendar(CalendarArgs),

    /// Export customers to a CSV file.
    Export(ExportArgs),

    /// List the suggested activities.
    Activities,

    /// Add a customer.
    AddCustomer(NewCustomer),

    /// Change some fields of a customer.
    EditCustomer(CustomerChanges),

    /// Delete a customer. Their sessions are kept.
    DeleteCustomer { id: String },

    /// Add a training session.
    AddTraining(NewTraining),

    /// Delete a training session.
    DeleteTraining { id: String },

    /// Sort customers by a column; repeating the column flips the direction.
    SortCustomers { field: CustomerField },

    /// Sort sessions by a column; repeating the column flips the direction.
    SortTrainings { field: TrainingField },

    /// Filter customers by name or email. No text clears the filter.
    SearchCustomers { text: Vec<String> },

    /// Filter sessions by customer or activity. No text clears the filter.
    SearchTrainings { text: Vec<String> },

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Args)]
struct NewCustomer {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
}

impl From<NewCustomer> for CustomerDraft {
    fn from(args: NewCustomer) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
        }
    }
}

#[derive(Debug, Args)]
struct CustomerChanges {
    id: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    city: Option<String>,
}

impl CustomerChanges {
    /// Overlays the given fields on a draft of the current values.
    fn apply(self, mut draft: CustomerDraft) -> CustomerDraft {
        if let Some(value) = self.first_name {
            draft.first_name = value;
        }
        if let Some(value) = self.last_name {
            draft.last_name = value;
        }
        if let Some(value) = self.email {
            draft.email = value;
        }
        if let Some(value) = self.phone {
            draft.phone = value;
        }
        if self.address.is_some() {
            draft.address = self.address;
        }
        if self.city.is_some() {
            draft.city = self.city;
        }
        draft
    }
}

#[derive(Debug, Args)]
struct NewTraining {
    /// Start time, e.g. 2025-04-15T10:30.
    #[arg(long)]
    date: String,
    #[arg(long)]
    activity: String,
    /// Minutes.
    #[arg(long, allow_negative_numbers = true)]
    duration: i64,
    /// Customer ID.
    #[arg(long)]
    customer: String,
}

// ========== Session ==========

enum Flow {
    Continue,
    Quit,
}

/// A running interactive session.
pub struct Shell<R, W> {
    input: R,
    output: W,
    state: AppState,
    customer_query: CustomerQuery,
    training_query: TrainingQuery,
    config: Config,
    json: bool,
    interactive: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, state: AppState, config: Config) -> Self {
        Self {
            input,
            output,
            state,
            customer_query: CustomerQuery::default(),
            training_query: TrainingQuery::default(),
            config,
            json: false,
            interactive: false,
        }
    }

    /// Print list output as JSON.
    #[must_use]
    pub const fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Show a `pt> ` prompt before each line.
    #[must_use]
    pub const fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Reads commands until `quit` or end of input and returns the final state.
    pub fn run(mut self) -> Result<AppState> {
        tracing::debug!(interactive = self.interactive, "shell started");

        loop {
            if self.interactive {
                write!(self.output, "pt> ")?;
                self.output.flush()?;
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let words = match tokenize(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(err) => {
                    writeln!(self.output, "error: {err}")?;
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(&words) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    // Covers `help` as well as usage errors.
                    write!(self.output, "{}", err.render())?;
                    continue;
                }
            };

            match self.execute(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "shell command failed");
                    writeln!(self.output, "error: {err:#}")?;
                }
            }
        }

        tracing::debug!("shell finished");
        Ok(self.state)
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Customers => self.show_customers()?,
            ShellCommand::Trainings => self.show_trainings()?,
            ShellCommand::Stats => {
                stats::run(&mut self.output, self.state.trainings().all(), self.json)?;
            }
            ShellCommand::Calendar(args) => {
                let anchor = util::parse_date(args.date.as_deref())?;
                calendar::run(
                    &mut self.output,
                    self.state.trainings().all(),
                    self.state.customers().all(),
                    args.view,
                    anchor,
                    self.json,
                )?;
            }
            ShellCommand::Export(args) => {
                let path = args.output.unwrap_or_else(|| self.config.export_path.clone());
                export::run(&mut self.output, self.state.customers().all(), &path)?;
            }
            ShellCommand::Activities => trainings::run_activities(&mut self.output, self.json)?,
            ShellCommand::AddCustomer(args) => {
                let customer = self.state.add_customer(args.into())?;
                writeln!(
                    self.output,
                    "Added customer {} ({})",
                    customer.full_name(),
                    customer.id
                )?;
            }
            ShellCommand::EditCustomer(changes) => {
                let id = CustomerId::new(changes.id.as_str())?;
                let current = self
                    .state
                    .customers()
                    .get(&id)
                    .ok_or_else(|| StoreError::NotFound {
                        kind: "customer",
                        id: id.to_string(),
                    })?
                    .to_draft();
                let customer = self.state.update_customer(&id, changes.apply(current))?;
                writeln!(
                    self.output,
                    "Updated customer {} ({})",
                    customer.full_name(),
                    customer.id
                )?;
            }
            ShellCommand::DeleteCustomer { id } => {
                let id = CustomerId::new(id)?;
                let mut prompt =
                    Prompt::new(&mut self.input, &mut self.output, self.config.assume_yes);
                let removed = self.state.delete_customer(&id, &mut prompt)?;
                if removed {
                    writeln!(self.output, "Deleted customer {id}")?;
                } else {
                    writeln!(self.output, "Kept customer {id}")?;
                }
            }
            ShellCommand::AddTraining(args) => {
                let draft = TrainingDraft {
                    date: parse_session_time(&args.date)?,
                    activity: args.activity,
                    duration: args.duration,
                    customer_id: CustomerId::new(args.customer)?,
                };
                let training = self.state.add_training(draft)?;
                writeln!(
                    self.output,
                    "Added training session {}: {} with {}",
                    training.id,
                    training.activity,
                    self.state.customer_name(&training.customer_id)
                )?;
            }
            ShellCommand::DeleteTraining { id } => {
                let id = TrainingId::new(id)?;
                let mut prompt =
                    Prompt::new(&mut self.input, &mut self.output, self.config.assume_yes);
                let removed = self.state.delete_training(&id, &mut prompt)?;
                if removed {
                    writeln!(self.output, "Deleted training session {id}")?;
                } else {
                    writeln!(self.output, "Kept training session {id}")?;
                }
            }
            ShellCommand::SortCustomers { field } => {
                self.customer_query.sort = self.customer_query.sort.toggle(field);
                self.show_customers()?;
            }
            ShellCommand::SortTrainings { field } => {
                self.training_query.sort = self.training_query.sort.toggle(field);
                self.show_trainings()?;
            }
            ShellCommand::SearchCustomers { text } => {
                self.customer_query.search = text.join(" ");
                self.show_customers()?;
            }
            ShellCommand::SearchTrainings { text } => {
                self.training_query.search = text.join(" ");
                self.show_trainings()?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_customers(&mut self) -> Result<()> {
        customers::run(
            &mut self.output,
            self.state.customers().all(),
            &self.customer_query,
            self.json,
        )
    }

    fn show_trainings(&mut self) -> Result<()> {
        trainings::run(
            &mut self.output,
            self.state.trainings().all(),
            self.state.customers().all(),
            &self.training_query,
            &self.config.date_format,
            self.json,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_shell(script: &str, config: Config) -> (AppState, String) {
        let mut output = Vec::new();
        let state = Shell::new(
            script.as_bytes(),
            &mut output,
            AppState::seeded().unwrap(),
            config,
        )
        .run()
        .unwrap();
        (state, String::from_utf8(output).unwrap())
    }

    fn run_script(script: &str) -> (AppState, String) {
        run_shell(script, Config::default())
    }

    // ========== Tokenizer ==========

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add-customer --first-name "Mary Ann" --city 'St. Paul'"#).unwrap(),
            ["add-customer", "--first-name", "Mary Ann", "--city", "St. Paul"]
        );
        assert_eq!(tokenize(r#"say "it's""#).unwrap(), ["say", "it's"]);
        assert_eq!(tokenize(r#"search-customers """#).unwrap(), ["search-customers", ""]);
        assert_eq!(tokenize("  \n").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        let err = tokenize("search-customers \"jo").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    // ========== Commands ==========

    #[test]
    fn test_add_customer_then_list() {
        let (state, output) = run_script(
            "add-customer --first-name Anna --last-name Lee --email anna@example.com --phone 555-000-1111\n\
             customers\n",
        );

        assert_eq!(state.customers().len(), 6);
        assert!(output.contains("Added customer Anna Lee ("));
        assert!(output.contains("CUSTOMERS (6 of 6)"));
        let added = state
            .customers()
            .all()
            .iter()
            .find(|c| c.first_name == "Anna")
            .unwrap();
        assert_eq!(added.address, "");
        assert_eq!(added.city, "");
    }

    #[test]
    fn test_add_customer_rejects_blank_name() {
        let (state, output) = run_script(
            "add-customer --first-name ' ' --last-name Lee --email a@b.c --phone 1\n",
        );
        assert_eq!(state.customers().len(), 5);
        assert!(output.contains("error: first name cannot be empty"));
    }

    #[test]
    fn test_edit_customer_keeps_unchanged_fields() {
        let (state, output) = run_script("edit-customer c2 --city Boston\n");
        let jane = state
            .customers()
            .get(&CustomerId::new("c2").unwrap())
            .unwrap();

        assert!(output.contains("Updated customer Jane Smith (c2)"));
        assert_eq!(jane.city, "Boston");
        assert_eq!(jane.email, "jane.smith@example.com");
    }

    #[test]
    fn test_edit_unknown_customer_reports_not_found() {
        let (_, output) = run_script("edit-customer zz --city Boston\n");
        assert!(output.contains("error: customer not found: zz"));
    }

    #[test]
    fn test_delete_customer_confirmed_orphans_sessions() {
        let (state, output) = run_script("delete-customer c1\ny\ntrainings\n");

        assert!(output.contains("Are you sure you want to delete this customer? [y/N] "));
        assert!(output.contains("Deleted customer c1"));
        assert_eq!(state.customers().len(), 4);
        assert_eq!(state.trainings().len(), 7);
        assert_eq!(
            state.customer_name(&CustomerId::new("c1").unwrap()),
            "Unknown"
        );
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_delete_customer_declined() {
        let (state, output) = run_script("delete-customer c1\nn\n");
        assert!(output.contains("Kept customer c1"));
        assert_eq!(state.customers().len(), 5);
    }

    #[test]
    fn test_delete_with_assume_yes_does_not_read_answer() {
        let config = Config {
            assume_yes: true,
            ..Config::default()
        };
        let (state, output) = run_shell("delete-training t1\ndelete-training t2\n", config);

        assert!(!output.contains("[y/N]"));
        assert_eq!(state.trainings().len(), 5);
    }

    #[test]
    fn test_delete_unknown_training_does_not_prompt() {
        let (state, output) = run_script("delete-training t99\n");
        assert!(!output.contains("[y/N]"));
        assert!(output.contains("error: training session not found: t99"));
        assert_eq!(state.trainings().len(), 7);
    }

    #[test]
    fn test_add_training_validates_duration() {
        let (state, output) = run_script(
            "add-training --date 2025-04-22T09:00 --activity Yoga --duration 0 --customer c1\n\
             add-training --date 2025-04-22T09:00 --activity Yoga --duration -5 --customer c1\n",
        );
        assert_eq!(state.trainings().len(), 7);
        assert!(output.contains("got 0"));
        assert!(output.contains("got -5"));
    }

    #[test]
    fn test_add_training_with_off_list_activity() {
        let (state, output) = run_script(
            "add-training --date '2025-04-22 09:00' --activity 'Aqua Jogging' --duration 40 --customer c4\n",
        );
        assert_eq!(state.trainings().len(), 8);
        assert!(output.contains(": Aqua Jogging with Sarah Williams"));
    }

    #[test]
    fn test_sort_toggles_direction() {
        let (_, output) = run_script("sort-customers email\nsort-customers email\n");
        assert!(output.contains("Email ▲"));
        assert!(output.contains("Email ▼"));
    }

    #[test]
    fn test_search_then_clear() {
        let (_, output) = run_script("search-trainings yoga\nsearch-trainings\n");
        assert!(output.contains("TRAINING SESSIONS (2 of 7)"));
        assert!(output.contains("TRAINING SESSIONS (7 of 7)"));
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (_, output) = run_script("search-customers \"jo\nsort-customers weight\nstats\n");
        assert!(output.contains("error: unterminated \" quote"));
        assert!(output.contains("TRAINING STATISTICS"));
    }

    #[test]
    fn test_bad_date_format_keeps_session_alive() {
        let config = Config {
            date_format: "%Q".to_string(),
            ..Config::default()
        };
        let (_, output) = run_shell("trainings\nstats\n", config);
        assert!(output.contains("error: invalid date_format"));
        assert!(output.contains("TRAINING STATISTICS"));
    }

    #[test]
    fn test_session_at_end_of_time_does_not_break_calendar() {
        let (_, output) = run_script(
            "add-training --date +262142-12-31T23:50 --activity Yoga --duration 30 --customer c1\n\
             calendar --view month --date 2025-04-01\n\
             calendar --view day --date +262142-12-31\n\
             stats\n",
        );
        assert!(output.contains("CALENDAR: April 2025"));
        assert!(output.contains("TRAINING STATISTICS"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (_, output) = run_script("quit\nstats\n");
        assert!(!output.contains("TRAINING STATISTICS"));
    }

    #[test]
    fn test_help_lists_commands() {
        let (_, output) = run_script("help\n");
        assert!(output.contains("add-customer"));
        assert!(output.contains("sort-trainings"));
    }

    #[test]
    fn test_interactive_prints_prompt() {
        let mut output = Vec::new();
        Shell::new(
            "quit\n".as_bytes(),
            &mut output,
            AppState::seeded().unwrap(),
            Config::default(),
        )
        .interactive(true)
        .run()
        .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "pt> ");
    }
}
