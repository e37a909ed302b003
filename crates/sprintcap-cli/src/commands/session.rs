//! Interactive sprint form.
//!
//! Each input line is one form action and maps onto exactly one store
//! operation (or, for `add-country NAME`, an add followed by a rename).
//! The report is re-rendered after every change.

use sprintcap_core::{
    Config, CountryId, CountryUpdate, OutputFormat, PtoId, PtoUpdate, ScalarUpdate,
    SprintStore, ValidationError,
};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::render::{write_state, RenderOptions};

const HELP: &str = "\
commands:
  add-country [NAME]             add a country
  remove-country ID              remove a country and its PTO
  set-country ID FIELD VALUE     FIELD: name | devCount | holidays
  add-pto                        add PTO for the first country
  remove-pto ID                  remove a PTO entry
  set-pto ID FIELD VALUE         FIELD: country | devName | days
  set FIELD VALUE                FIELD: totalDays | velocity | carryover
  reset                          restore defaults
  show                           print the report
  help                           print this help
  quit                           leave the session";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddCountry(Option<String>),
    RemoveCountry(CountryId),
    SetCountry {
        id: CountryId,
        field: String,
        value: String,
    },
    AddPto,
    RemovePto(PtoId),
    SetPto {
        id: PtoId,
        field: String,
        value: String,
    },
    Set {
        field: String,
        value: String,
    },
    Reset,
    Show,
    Help,
    Quit,
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State changed; the report should be re-rendered.
    Changed,
    /// Nothing changed; tell the user why.
    Unchanged(String),
    Show,
    Help,
    Quit,
}

fn usage(message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: "command".to_string(),
        message: message.to_string(),
    }
}

fn parse_id(raw: Option<&str>, what: &str) -> Result<u64, ValidationError> {
    let raw = raw.ok_or_else(|| usage(&format!("missing {what} id")))?;
    raw.parse::<u64>()
        .map_err(|_| usage(&format!("'{raw}' is not a {what} id")))
}

/// Split `FIELD VALUE...` where the value may contain spaces or be empty.
fn field_and_value(rest: Option<&str>) -> Result<(String, String), ValidationError> {
    let rest = rest.map(str::trim_start).unwrap_or_default();
    let mut parts = rest.splitn(2, char::is_whitespace);
    let field = parts
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| usage("missing field name"))?;
    let value = parts.next().unwrap_or_default().trim();
    Ok((field.to_string(), value.to_string()))
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ValidationError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut head = line.splitn(2, char::is_whitespace);
        let verb = head.next().unwrap_or_default().to_ascii_lowercase();
        let rest = head.next().map(str::trim);

        let command = match verb.as_str() {
            "add-country" => {
                Self::AddCountry(rest.filter(|r| !r.is_empty()).map(str::to_string))
            }
            "remove-country" => Self::RemoveCountry(CountryId(parse_id(rest, "country")?)),
            "set-country" => {
                let mut parts = rest.unwrap_or_default().splitn(2, char::is_whitespace);
                let id = CountryId(parse_id(parts.next(), "country")?);
                let (field, value) = field_and_value(parts.next())?;
                Self::SetCountry { id, field, value }
            }
            "add-pto" => Self::AddPto,
            "remove-pto" => Self::RemovePto(PtoId(parse_id(rest, "pto")?)),
            "set-pto" => {
                let mut parts = rest.unwrap_or_default().splitn(2, char::is_whitespace);
                let id = PtoId(parse_id(parts.next(), "pto")?);
                let (field, value) = field_and_value(parts.next())?;
                Self::SetPto { id, field, value }
            }
            "set" => {
                let (field, value) = field_and_value(rest)?;
                Self::Set { field, value }
            }
            "reset" => Self::Reset,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(usage(&format!("unknown command '{other}' (try 'help')"))),
        };
        Ok(Some(command))
    }
}

/// An editing session over one store.
pub struct Session {
    store: SprintStore,
}

impl Session {
    pub fn new(store: SprintStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SprintStore {
        &self.store
    }

    pub fn apply(&mut self, command: SessionCommand) -> Result<Outcome, ValidationError> {
        debug!(?command, "session command");
        let store = &mut self.store;
        let outcome = match command {
            SessionCommand::AddCountry(name) => {
                let id = store.add_country();
                if let Some(name) = name {
                    store.update_country(id, CountryUpdate::Name(name));
                }
                Outcome::Changed
            }
            SessionCommand::RemoveCountry(id) => changed_or(
                store.remove_country(id),
                format!("no country #{id}"),
            ),
            SessionCommand::SetCountry { id, field, value } => {
                let update = CountryUpdate::from_field(&field, &value)?;
                changed_or(store.update_country(id, update), format!("no country #{id}"))
            }
            SessionCommand::AddPto => match store.add_pto() {
                Some(_) => Outcome::Changed,
                None => Outcome::Unchanged("add a country before adding PTO".to_string()),
            },
            SessionCommand::RemovePto(id) => {
                changed_or(store.remove_pto(id), format!("no PTO entry #{id}"))
            }
            SessionCommand::SetPto { id, field, value } => {
                if store.pto(id).is_none() {
                    Outcome::Unchanged(format!("no PTO entry #{id}"))
                } else {
                    let update = PtoUpdate::from_field(&field, &value, store.config())?;
                    changed_or(store.update_pto(id, update), format!("no PTO entry #{id}"))
                }
            }
            SessionCommand::Set { field, value } => {
                store.update_scalar(ScalarUpdate::from_field(&field, &value)?);
                Outcome::Changed
            }
            SessionCommand::Reset => {
                store.reset();
                Outcome::Changed
            }
            SessionCommand::Show => Outcome::Show,
            SessionCommand::Help => Outcome::Help,
            SessionCommand::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }
}

fn changed_or(changed: bool, notice: String) -> Outcome {
    if changed {
        Outcome::Changed
    } else {
        Outcome::Unchanged(notice)
    }
}

/// Text output goes with the report; in JSON mode it goes to `err` so
/// `out` stays one snapshot per line.
fn notify<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    options: RenderOptions,
    message: &str,
) -> std::io::Result<()> {
    match options.format {
        OutputFormat::Text => writeln!(out, "{message}"),
        OutputFormat::Json => writeln!(err, "{message}"),
    }
}

/// Drive a session from `input` until EOF or `quit`.
///
/// Errors in a line are reported and the session continues; only I/O
/// failures end it early. `prompt` is only honoured for text output.
pub fn run_session<R: BufRead, W: Write, E: Write>(
    input: R,
    out: &mut W,
    err: &mut E,
    session: &mut Session,
    options: RenderOptions,
    prompt: bool,
) -> sprintcap_core::Result<()> {
    let prompt = prompt && options.format == OutputFormat::Text;
    write_state(out, session.store(), options, false)?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                notify(out, err, options, &format!("error: {e}"))?;
                continue;
            }
        };

        match session.apply(command) {
            Ok(Outcome::Changed) | Ok(Outcome::Show) => {
                write_state(out, session.store(), options, false)?
            }
            Ok(Outcome::Unchanged(notice)) => notify(out, err, options, &notice)?,
            Ok(Outcome::Help) => notify(out, err, options, HELP)?,
            Ok(Outcome::Quit) => break,
            Err(e) => notify(out, err, options, &format!("error: {e}"))?,
        }
    }
    Ok(())
}

pub fn run(json: bool) -> sprintcap_core::Result<()> {
    let config = Config::load_or_default();
    let options = RenderOptions::resolve(json, &config);
    let mut session = Session::new(SprintStore::with_defaults(config.defaults.clone()));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    run_session(stdin.lock(), &mut stdout, &mut stderr, &mut session, options, true)
}
