//! Presentation-independent report.
//!
//! Formatting rules shared by every front end: dev-day figures carry one
//! decimal, capacity is shown as a percentage with one decimal and a bar
//! that never fills past 100%, and the target is the rounded,
//! non-negative display value.

use serde::Serialize;
use std::fmt;

use crate::engine::DerivedResults;
use crate::model::{Country, SprintConfig};

const UNNAMED: &str = "(unnamed)";

/// Widest capacity bar drawn, whatever the configured width.
pub const MAX_BAR_WIDTH: usize = 200;

/// State plus results, as emitted by `--json` output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub sprint: &'a SprintConfig,
    pub results: &'a DerivedResults,
    pub display_target_points: i64,
}

impl<'a> Snapshot<'a> {
    pub fn new(sprint: &'a SprintConfig, results: &'a DerivedResults) -> Self {
        Self {
            sprint,
            results,
            display_target_points: results.display_target_points(),
        }
    }
}

fn display_name(country: &Country) -> &str {
    if country.name.trim().is_empty() {
        UNNAMED
    } else {
        &country.name
    }
}

/// `[#########.........]` with `width` cells filled to `fraction`.
pub fn capacity_bar(fraction: f64, width: usize) -> String {
    let width = width.min(MAX_BAR_WIDTH);
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// One-line explanation of how the target was reached.
pub fn target_explanation(config: &SprintConfig, results: &DerivedResults) -> String {
    format!(
        "Based on {} velocity × {:.1}% capacity − {} carryover points",
        config.rolling_average_velocity,
        results.capacity_percent(),
        config.carryover_points
    )
}

/// The sprint configuration section: scalars, countries and PTO.
pub struct ConfigurationView<'a>(pub &'a SprintConfig);

impl fmt::Display for ConfigurationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        writeln!(f, "Sprint Configuration")?;
        writeln!(f, "  Total days for development: {}", config.total_days)?;
        writeln!(f, "  Rolling average velocity:   {}", config.rolling_average_velocity)?;
        writeln!(f, "  Carryover points:           {}", config.carryover_points)?;

        writeln!(f)?;
        writeln!(f, "Countries")?;
        if config.countries.is_empty() {
            writeln!(f, "  No countries added yet.")?;
        }
        for c in &config.countries {
            writeln!(
                f,
                "  #{:<4} {:<20} devs: {:<4} holidays: {}",
                c.id,
                display_name(c),
                c.dev_count,
                c.holidays
            )?;
        }

        writeln!(f)?;
        writeln!(f, "PTO")?;
        if config.pto_list.is_empty() {
            writeln!(f, "  No PTO entries.")?;
        }
        for p in &config.pto_list {
            let country = config.country(p.country_id).map(display_name).unwrap_or(UNNAMED);
            let dev = if p.dev_name.trim().is_empty() {
                UNNAMED
            } else {
                &p.dev_name
            };
            writeln!(
                f,
                "  #{:<4} {:<20} {:<16} days: {}",
                p.id, dev, country, p.days
            )?;
        }
        Ok(())
    }
}

/// The calculations section: dev-days, capacity and target.
pub struct ResultsView<'a> {
    pub config: &'a SprintConfig,
    pub results: &'a DerivedResults,
    pub bar_width: usize,
}

impl fmt::Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            config,
            results,
            bar_width,
        } = *self;
        writeln!(f, "Sprint Calculations")?;
        writeln!(f, "  Developer days by country")?;
        for c in &config.countries {
            writeln!(
                f,
                "    {:<20} {:>8.1}",
                display_name(c),
                results.dev_days_for(c.id)
            )?;
        }
        writeln!(f, "  Total dev days:          {:.1}", results.total_dev_days)?;
        writeln!(f, "  Full capacity dev days:  {:.1}", results.full_capacity_dev_days)?;
        writeln!(
            f,
            "  Team capacity:           {:.1}% {}",
            results.capacity_percent(),
            capacity_bar(results.capacity_bar_fraction(), bar_width)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Target points for sprint: {}",
            results.display_target_points()
        )?;
        writeln!(f, "  {}", target_explanation(config, results))
    }
}

pub fn format_configuration(config: &SprintConfig) -> String {
    ConfigurationView(config).to_string()
}

pub fn format_results(config: &SprintConfig, results: &DerivedResults, bar_width: usize) -> String {
    ResultsView {
        config,
        results,
        bar_width,
    }
    .to_string()
}

/// Full text report: configuration followed by calculations.
pub fn format_report(config: &SprintConfig, results: &DerivedResults, bar_width: usize) -> String {
    format!(
        "{}\n{}",
        ConfigurationView(config),
        ResultsView {
            config,
            results,
            bar_width,
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::derive;
    use crate::model::CountryId;

    fn worked_example() -> SprintConfig {
        let mut cfg = SprintConfig::default();
        cfg.countries.truncate(1);
        cfg.countries[0].dev_count = 5;
        cfg.countries[0].holidays = 1;
        cfg.carryover_points = 2.0;
        cfg
    }

    #[test]
    fn bar_is_capped_and_floored() {
        assert_eq!(capacity_bar(0.5, 10), "[#####.....]");
        assert_eq!(capacity_bar(1.7, 4), "[####]");
        assert_eq!(capacity_bar(-0.2, 4), "[....]");
        assert_eq!(capacity_bar(f64::NAN, 2), "[..]");
    }

    #[test]
    fn oversized_bar_width_is_capped() {
        let bar = capacity_bar(1.0, u32::MAX as usize);
        assert_eq!(bar.len(), MAX_BAR_WIDTH + 2);
    }

    #[test]
    fn explanation_uses_plain_numbers() {
        let cfg = worked_example();
        let results = derive(&cfg);
        assert_eq!(
            target_explanation(&cfg, &results),
            "Based on 25 velocity × 88.9% capacity − 2 carryover points"
        );
    }

    #[test]
    fn results_section_shows_worked_example() {
        let cfg = worked_example();
        let results = derive(&cfg);
        let text = format_results(&cfg, &results, 10);
        assert!(text.contains("Colombia"));
        assert!(text.contains("40.0"));
        assert!(text.contains("Full capacity dev days:  45.0"));
        assert!(text.contains("88.9% [#########.]"));
        assert!(text.contains("Target points for sprint: 20"));
    }

    #[test]
    fn empty_country_list_is_called_out() {
        let mut cfg = SprintConfig::default();
        cfg.countries.clear();
        let text = format_configuration(&cfg);
        assert!(text.contains("No countries added yet."));
    }

    #[test]
    fn unnamed_records_get_a_placeholder() {
        let mut cfg = SprintConfig::default();
        cfg.countries[0].name.clear();
        let text = format_report(&cfg, &derive(&cfg), 10);
        assert!(text.contains(UNNAMED));
    }

    #[test]
    fn snapshot_carries_display_value() {
        let mut cfg = SprintConfig::default();
        cfg.carryover_points = 3.0;
        let results = derive(&cfg);
        let json = serde_json::to_value(Snapshot::new(&cfg, &results)).unwrap();
        assert_eq!(json["displayTargetPoints"], 0);
        assert_eq!(json["results"]["targetPoints"], -3.0);
        assert_eq!(json["sprint"]["carryoverPoints"], 3.0);
        assert_eq!(
            json["results"]["devDaysByCountry"][CountryId(1).to_string()],
            0.0
        );
    }
}
