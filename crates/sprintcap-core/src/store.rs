//! Sprint state store.
//!
//! `SprintStore` is the single writer of a [`SprintConfig`]. Every mutation
//! re-runs [`derive`] before returning, so [`SprintStore::results`] never
//! lags behind [`SprintStore::config`].
//!
//! All operations are total. Lookups by an id that is not live are
//! silently ignored and reported through the `bool` return value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{derive, DerivedResults};
use crate::model::{Country, CountryId, PtoEntry, PtoId, SprintConfig, SprintDefaults};

/// A single-field change to a [`Country`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum CountryUpdate {
    Name(String),
    DevCount(i64),
    Holidays(i64),
}

/// A single-field change to a [`PtoEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PtoUpdate {
    Country(CountryId),
    DevName(String),
    Days(f64),
}

/// A change to one of the sprint-wide scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ScalarUpdate {
    TotalDays(i64),
    RollingAverageVelocity(f64),
    CarryoverPoints(f64),
}

/// Owner of the editable sprint state and its derived results.
#[derive(Debug, Clone)]
pub struct SprintStore {
    config: SprintConfig,
    results: DerivedResults,
    defaults: SprintDefaults,
    /// Next id handed out to a new country or PTO entry.
    next_id: u64,
}

impl Default for SprintStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SprintStore {
    /// Store in the reset state: Colombia, Canada and US, 9 days, velocity 25.
    pub fn new() -> Self {
        Self::with_defaults(SprintDefaults::default())
    }

    /// Store whose initial and reset state come from `defaults`.
    pub fn with_defaults(defaults: SprintDefaults) -> Self {
        let config = SprintConfig::seeded(&defaults);
        let results = derive(&config);
        // Seeds occupy ids 1..=n.
        let next_id = defaults.seed_countries.len() as u64 + 1;
        Self {
            config,
            results,
            defaults,
            next_id,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &SprintConfig {
        &self.config
    }

    pub fn results(&self) -> &DerivedResults {
        &self.results
    }

    pub fn defaults(&self) -> &SprintDefaults {
        &self.defaults
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.config.country(id)
    }

    pub fn pto(&self, id: PtoId) -> Option<&PtoEntry> {
        self.config.pto(id)
    }

    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.config.country_by_name(name)
    }

    // ── Countries ────────────────────────────────────────────────────

    /// Append an empty country and return its id.
    pub fn add_country(&mut self) -> CountryId {
        let id = CountryId(self.fresh_id());
        self.config.countries.push(Country::new(id, ""));
        debug!(country = %id, "country added");
        self.recompute();
        id
    }

    /// Remove a country together with every PTO entry booked against it.
    pub fn remove_country(&mut self, id: CountryId) -> bool {
        let before = self.config.countries.len();
        self.config.countries.retain(|c| c.id != id);
        if self.config.countries.len() == before {
            return false;
        }

        let pto_before = self.config.pto_list.len();
        self.config.pto_list.retain(|p| p.country_id != id);
        debug!(
            country = %id,
            pto_removed = pto_before - self.config.pto_list.len(),
            "country removed"
        );
        self.recompute();
        true
    }

    pub fn update_country(&mut self, id: CountryId, update: CountryUpdate) -> bool {
        let Some(country) = self.config.countries.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        debug!(country = %id, ?update, "country updated");
        match update {
            CountryUpdate::Name(name) => country.name = name,
            CountryUpdate::DevCount(n) => country.dev_count = n,
            CountryUpdate::Holidays(n) => country.holidays = n,
        }
        self.recompute();
        true
    }

    // ── PTO ──────────────────────────────────────────────────────────

    /// Append an empty PTO entry for the first country.
    ///
    /// Returns `None` without touching the state when no country exists.
    pub fn add_pto(&mut self) -> Option<PtoId> {
        let country_id = self.config.countries.first()?.id;
        let id = PtoId(self.fresh_id());
        self.config.pto_list.push(PtoEntry {
            id,
            country_id,
            dev_name: String::new(),
            days: 0.0,
        });
        debug!(pto = %id, country = %country_id, "pto added");
        self.recompute();
        Some(id)
    }

    pub fn remove_pto(&mut self, id: PtoId) -> bool {
        let before = self.config.pto_list.len();
        self.config.pto_list.retain(|p| p.id != id);
        if self.config.pto_list.len() == before {
            return false;
        }
        debug!(pto = %id, "pto removed");
        self.recompute();
        true
    }

    /// Apply a field change to a PTO entry.
    ///
    /// Pointing an entry at a country that is not live is refused so PTO
    /// entries never reference a missing country.
    pub fn update_pto(&mut self, id: PtoId, update: PtoUpdate) -> bool {
        if let PtoUpdate::Country(country_id) = &update {
            let country_id = *country_id;
            if self.config.country(country_id).is_none() {
                debug!(pto = %id, country = %country_id, "pto country change refused");
                return false;
            }
        }

        let Some(pto) = self.config.pto_list.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        debug!(pto = %id, ?update, "pto updated");
        match update {
            PtoUpdate::Country(country_id) => pto.country_id = country_id,
            PtoUpdate::DevName(name) => pto.dev_name = name,
            PtoUpdate::Days(days) => pto.days = days,
        }
        self.recompute();
        true
    }

    // ── Scalars ──────────────────────────────────────────────────────

    pub fn update_scalar(&mut self, update: ScalarUpdate) {
        debug!(?update, "scalar updated");
        match update {
            ScalarUpdate::TotalDays(n) => self.config.total_days = n,
            ScalarUpdate::RollingAverageVelocity(v) => self.config.rolling_average_velocity = v,
            ScalarUpdate::CarryoverPoints(p) => self.config.carryover_points = p,
        }
        self.recompute();
    }

    /// Restore seed countries and default scalars, drop all PTO entries.
    pub fn reset(&mut self) {
        self.config = SprintConfig::seeded(&self.defaults);
        let seeds = self.defaults.seed_countries.len() as u64 + 1;
        self.next_id = self.next_id.max(seeds);
        debug!("sprint reset");
        self.recompute();
    }

    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn recompute(&mut self) {
        self.results = derive(&self.config);
    }
}
