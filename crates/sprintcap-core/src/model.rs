//! Sprint data model.
//!
//! A sprint is a list of countries (developer head count plus public
//! holidays), a list of PTO entries that each point at one country, and
//! three scalars: working days in the sprint, the team's rolling average
//! velocity and the points carried over from the previous sprint.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TOTAL_DAYS: i64 = 9;
pub const DEFAULT_ROLLING_AVERAGE_VELOCITY: f64 = 25.0;
pub const DEFAULT_CARRYOVER_POINTS: f64 = 0.0;
pub const DEFAULT_SEED_COUNTRIES: [&str; 3] = ["Colombia", "Canada", "US"];

/// Identifier of a [`Country`] within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryId(pub u64);

/// Identifier of a [`PtoEntry`] within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PtoId(pub u64);

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for PtoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Developers located in one country and the public holidays they observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub dev_count: i64,
    /// Holidays per developer during the sprint.
    pub holidays: i64,
}

impl Country {
    pub fn new(id: CountryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            dev_count: 0,
            holidays: 0,
        }
    }
}

/// Paid time off taken by one developer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PtoEntry {
    pub id: PtoId,
    pub country_id: CountryId,
    pub dev_name: String,
    pub days: f64,
}

/// Full editable sprint state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintConfig {
    pub countries: Vec<Country>,
    pub pto_list: Vec<PtoEntry>,
    pub total_days: i64,
    pub rolling_average_velocity: f64,
    pub carryover_points: f64,
}

impl SprintConfig {
    /// Sprint state built from seed country names and default scalars.
    ///
    /// Seed countries receive ids `1..=n` in order.
    pub fn seeded(defaults: &SprintDefaults) -> Self {
        let countries = defaults
            .seed_countries
            .iter()
            .enumerate()
            .map(|(i, name)| Country::new(CountryId(i as u64 + 1), name.clone()))
            .collect();

        Self {
            countries,
            pto_list: Vec::new(),
            total_days: defaults.total_days,
            rolling_average_velocity: defaults.rolling_average_velocity,
            carryover_points: defaults.carryover_points,
        }
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    pub fn pto(&self, id: PtoId) -> Option<&PtoEntry> {
        self.pto_list.iter().find(|p| p.id == id)
    }

    /// First country whose name matches, ignoring ASCII case.
    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Total PTO days booked against a country.
    pub fn pto_days(&self, id: CountryId) -> f64 {
        self.pto_list
            .iter()
            .filter(|p| p.country_id == id)
            .map(|p| p.days)
            .sum()
    }
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self::seeded(&SprintDefaults::default())
    }
}

/// Values a fresh or reset sprint starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintDefaults {
    #[serde(default = "default_total_days")]
    pub total_days: i64,
    #[serde(default = "default_rolling_average_velocity")]
    pub rolling_average_velocity: f64,
    #[serde(default)]
    pub carryover_points: f64,
    #[serde(default = "default_seed_countries")]
    pub seed_countries: Vec<String>,
}

fn default_total_days() -> i64 {
    DEFAULT_TOTAL_DAYS
}
fn default_rolling_average_velocity() -> f64 {
    DEFAULT_ROLLING_AVERAGE_VELOCITY
}
fn default_seed_countries() -> Vec<String> {
    DEFAULT_SEED_COUNTRIES.iter().map(|s| s.to_string()).collect()
}

impl Default for SprintDefaults {
    fn default() -> Self {
        Self {
            total_days: DEFAULT_TOTAL_DAYS,
            rolling_average_velocity: DEFAULT_ROLLING_AVERAGE_VELOCITY,
            carryover_points: DEFAULT_CARRYOVER_POINTS,
            seed_countries: default_seed_countries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_three_seed_countries() {
        let cfg = SprintConfig::default();
        let names: Vec<_> = cfg.countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Colombia", "Canada", "US"]);
        assert_eq!(cfg.countries[0].id, CountryId(1));
        assert_eq!(cfg.countries[2].id, CountryId(3));
        assert!(cfg.countries.iter().all(|c| c.dev_count == 0 && c.holidays == 0));
        assert!(cfg.pto_list.is_empty());
        assert_eq!(cfg.total_days, 9);
        assert_eq!(cfg.rolling_average_velocity, 25.0);
        assert_eq!(cfg.carryover_points, 0.0);
    }

    #[test]
    fn country_by_name_ignores_case_and_whitespace() {
        let cfg = SprintConfig::default();
        assert_eq!(cfg.country_by_name(" canada ").map(|c| c.id), Some(CountryId(2)));
        assert!(cfg.country_by_name("Mexico").is_none());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let cfg = SprintConfig::default();
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["totalDays"], 9);
        assert_eq!(json["countries"][0]["devCount"], 0);
        assert_eq!(json["countries"][0]["id"], 1);
        assert!(json["ptoList"].as_array().unwrap().is_empty());
    }
}
