//! Output of the sprint state and its results.

use sprintcap_core::report::{format_report, MAX_BAR_WIDTH};
use sprintcap_core::{OutputFormat, Snapshot, SprintStore};
use std::io::Write;

/// Report output settings resolved from flags and configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub bar_width: usize,
}

impl RenderOptions {
    /// `--json` wins over the configured format.
    pub fn resolve(json_flag: bool, config: &sprintcap_core::Config) -> Self {
        Self {
            format: if json_flag {
                OutputFormat::Json
            } else {
                config.display.format
            },
            bar_width: (config.display.bar_width as usize).min(MAX_BAR_WIDTH),
        }
    }
}

/// Write the current state and results.
///
/// Text output is the full report; JSON output is one compact snapshot
/// per call unless `pretty` is set.
pub fn write_state<W: Write>(
    out: &mut W,
    store: &SprintStore,
    options: RenderOptions,
    pretty: bool,
) -> sprintcap_core::Result<()> {
    match options.format {
        OutputFormat::Text => {
            let text = format_report(store.config(), store.results(), options.bar_width);
            write!(out, "{text}")?;
        }
        OutputFormat::Json => {
            let snapshot = Snapshot::new(store.config(), store.results());
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintcap_core::Config;

    #[test]
    fn json_flag_overrides_config() {
        let config = Config::default();
        assert_eq!(RenderOptions::resolve(true, &config).format, OutputFormat::Json);
        assert_eq!(RenderOptions::resolve(false, &config).format, OutputFormat::Text);
        assert_eq!(RenderOptions::resolve(false, &config).bar_width, 30);
    }

    #[test]
    fn configured_bar_width_is_capped() {
        let mut config = Config::default();
        config.set("display.bar_width", "4000000000").unwrap();
        assert_eq!(RenderOptions::resolve(false, &config).bar_width, MAX_BAR_WIDTH);
    }

    #[test]
    fn writes_compact_json_line() {
        let store = SprintStore::new();
        let options = RenderOptions {
            format: OutputFormat::Json,
            bar_width: 10,
        };
        let mut out = Vec::new();
        write_state(&mut out, &store, options, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["sprint"]["totalDays"], 9);
        assert_eq!(json["displayTargetPoints"], 0);
    }

    #[test]
    fn writes_text_report() {
        let store = SprintStore::new();
        let options = RenderOptions {
            format: OutputFormat::Text,
            bar_width: 10,
        };
        let mut out = Vec::new();
        write_state(&mut out, &store, options, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sprint Configuration"));
        assert!(text.contains("Colombia"));
        assert!(text.contains("Target points for sprint: 0"));
    }
}
