//! Capacity derivation.
//!
//! `derive` is a pure function of the sprint state. It is re-run in full
//! after every mutation; nothing is cached between runs.
//!
//! ```text
//! dev_days(c)  = c.dev_count * total_days - pto_days(c) - c.dev_count * c.holidays
//! capacity     = Σ dev_days / Σ (c.dev_count * total_days)     (0 when the divisor is 0)
//! target       = velocity * capacity - carryover
//! ```
//!
//! Neither per-country dev-days nor the target are clamped, so
//! overcommitted countries show up as negative numbers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{CountryId, SprintConfig};

/// Values computed from a [`SprintConfig`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedResults {
    /// Available dev-days per country, in country order.
    pub dev_days_by_country: IndexMap<CountryId, f64>,
    pub total_dev_days: f64,
    pub full_capacity_dev_days: f64,
    /// Available / nominal dev-days. 0 when there is no nominal capacity.
    pub capacity: f64,
    pub target_points: f64,
}

impl DerivedResults {
    pub fn dev_days_for(&self, id: CountryId) -> f64 {
        self.dev_days_by_country.get(&id).copied().unwrap_or(0.0)
    }

    /// 0.0 .. 100.0+ capacity as a percentage.
    pub fn capacity_percent(&self) -> f64 {
        self.capacity * 100.0
    }

    /// Fill level of the capacity indicator, capped to `0.0..=1.0`.
    pub fn capacity_bar_fraction(&self) -> f64 {
        self.capacity.clamp(0.0, 1.0)
    }

    /// Target points as shown to the user: rounded, never below zero.
    pub fn display_target_points(&self) -> i64 {
        (self.target_points.round() as i64).max(0)
    }
}

/// Recompute every derived value from scratch.
pub fn derive(config: &SprintConfig) -> DerivedResults {
    let total_days = config.total_days as f64;

    let mut dev_days_by_country = IndexMap::with_capacity(config.countries.len());
    let mut total_dev_days = 0.0;
    let mut full_capacity_dev_days = 0.0;

    for country in &config.countries {
        let devs = country.dev_count as f64;
        let nominal = devs * total_days;
        let dev_days = nominal - config.pto_days(country.id) - devs * country.holidays as f64;

        dev_days_by_country.insert(country.id, dev_days);
        total_dev_days += dev_days;
        full_capacity_dev_days += nominal;
    }

    let capacity = if full_capacity_dev_days > 0.0 {
        total_dev_days / full_capacity_dev_days
    } else {
        0.0
    };

    let target_points = config.rolling_average_velocity * capacity - config.carryover_points;

    DerivedResults {
        dev_days_by_country,
        total_dev_days,
        full_capacity_dev_days,
        capacity,
        target_points,
    }
}
