//! One-shot capacity calculation from command-line flags.

use clap::Args;
use sprintcap_core::{
    coerce_int, resolve_country, Config, CountryUpdate, PtoUpdate, ScalarUpdate, SprintStore,
    ValidationError,
};
use tracing::debug;

use crate::render::{write_state, RenderOptions};

#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Working days in the sprint
    #[arg(long)]
    total_days: Option<String>,
    /// Rolling average velocity in points
    #[arg(long)]
    velocity: Option<String>,
    /// Points carried over from the previous sprint (fractions allowed)
    #[arg(long)]
    carryover: Option<String>,
    /// Country as NAME:DEVS[:HOLIDAYS]; replaces the seed countries (repeatable)
    #[arg(long = "country", value_name = "NAME:DEVS[:HOLIDAYS]")]
    countries: Vec<String>,
    /// PTO as COUNTRY:DEVELOPER:DAYS, COUNTRY being a name or id (repeatable)
    #[arg(long = "pto", value_name = "COUNTRY:DEV:DAYS")]
    pto: Vec<String>,
    /// Print state and results as JSON
    #[arg(long)]
    json: bool,
}

/// A country given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryArg {
    pub name: String,
    pub dev_count: i64,
    pub holidays: i64,
}

impl CountryArg {
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim().to_string();
        let dev_count = parts.next().map(coerce_int).unwrap_or(0);
        let holidays = parts.next().map(coerce_int).unwrap_or(0);
        Self {
            name,
            dev_count,
            holidays,
        }
    }
}

/// A PTO entry given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PtoArg {
    pub country: String,
    pub dev_name: String,
    pub days: String,
}

impl PtoArg {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = raw.splitn(3, ':').collect();
        match parts.as_slice() {
            [country, dev_name, days] => Ok(Self {
                country: country.trim().to_string(),
                dev_name: dev_name.trim().to_string(),
                days: days.to_string(),
            }),
            _ => Err(ValidationError::InvalidValue {
                field: "pto".to_string(),
                message: format!("expected COUNTRY:DEV:DAYS, got '{raw}'"),
            }),
        }
    }
}

/// Build the store described by the flags, starting from configured defaults.
pub fn build_store(args: &CalcArgs, config: &Config) -> Result<SprintStore, ValidationError> {
    let mut store = SprintStore::with_defaults(config.defaults.clone());

    if let Some(raw) = &args.total_days {
        store.update_scalar(ScalarUpdate::from_field("totalDays", raw)?);
    }
    if let Some(raw) = &args.velocity {
        store.update_scalar(ScalarUpdate::from_field("rollingAverageVelocity", raw)?);
    }
    if let Some(raw) = &args.carryover {
        store.update_scalar(ScalarUpdate::from_field("carryoverPoints", raw)?);
    }

    if !args.countries.is_empty() {
        let seeds: Vec<_> = store.config().countries.iter().map(|c| c.id).collect();
        for id in seeds {
            store.remove_country(id);
        }
        for raw in &args.countries {
            let arg = CountryArg::parse(raw);
            let id = store.add_country();
            store.update_country(id, CountryUpdate::Name(arg.name));
            store.update_country(id, CountryUpdate::DevCount(arg.dev_count));
            store.update_country(id, CountryUpdate::Holidays(arg.holidays));
        }
    }

    for raw in &args.pto {
        let arg = PtoArg::parse(raw)?;
        let country_id = resolve_country(&arg.country, store.config())?;
        let Some(id) = store.add_pto() else {
            return Err(ValidationError::UnknownCountry(arg.country));
        };
        store.update_pto(id, PtoUpdate::Country(country_id));
        store.update_pto(id, PtoUpdate::DevName(arg.dev_name));
        store.update_pto(id, PtoUpdate::from_field("days", &arg.days, store.config())?);
    }

    debug!(
        countries = store.config().countries.len(),
        pto = store.config().pto_list.len(),
        "calc store built"
    );
    Ok(store)
}

pub fn run(args: CalcArgs) -> sprintcap_core::Result<()> {
    let config = Config::load_or_default();
    let store = build_store(&args, &config)?;
    let options = RenderOptions::resolve(args.json, &config);
    write_state(&mut std::io::stdout().lock(), &store, options, true)
}
