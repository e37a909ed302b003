//! Form input coercion.
//!
//! Numeric fields accept free text and never reject it: the longest
//! numeric prefix is used and anything unparseable becomes 0. Field names
//! are matched loosely (`devCount`, `dev_count` and `dev-count` are the
//! same field).

use crate::error::ValidationError;
use crate::model::{CountryId, SprintConfig};
use crate::store::{CountryUpdate, PtoUpdate, ScalarUpdate};

/// Integer prefix of `raw`, or 0.
///
/// `"12abc"` gives 12, `"3.7"` gives 3, `" -2"` gives -2, `"abc"` gives 0.
/// Values past the `i64` range saturate.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = split_sign(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        let d = i64::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Decimal prefix of `raw` (optional fraction and exponent), or 0.
///
/// Non-finite results are treated as unparseable.
pub fn coerce_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Exponent only counts when it carries at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

/// `devCount`, `dev_count` and `dev-count` all normalise to `devcount`.
fn normalize_field(field: &str) -> String {
    field
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl CountryUpdate {
    /// Map a country form field and its raw text to an update.
    pub fn from_field(field: &str, raw: &str) -> Result<Self, ValidationError> {
        match normalize_field(field).as_str() {
            "name" => Ok(Self::Name(raw.to_string())),
            "devcount" | "devs" => Ok(Self::DevCount(coerce_int(raw))),
            "holidays" => Ok(Self::Holidays(coerce_int(raw))),
            _ => Err(ValidationError::UnknownField {
                record: "country",
                field: field.to_string(),
            }),
        }
    }
}

impl PtoUpdate {
    /// Map a PTO form field and its raw text to an update.
    ///
    /// The `country` field takes either a live country id or a country name.
    pub fn from_field(field: &str, raw: &str, config: &SprintConfig) -> Result<Self, ValidationError> {
        match normalize_field(field).as_str() {
            "country" | "countryid" => resolve_country(raw, config).map(Self::Country),
            "devname" | "developer" | "name" => Ok(Self::DevName(raw.to_string())),
            "days" => Ok(Self::Days(coerce_int(raw) as f64)),
            _ => Err(ValidationError::UnknownField {
                record: "pto",
                field: field.to_string(),
            }),
        }
    }
}

impl ScalarUpdate {
    /// Map a sprint-wide form field and its raw text to an update.
    pub fn from_field(field: &str, raw: &str) -> Result<Self, ValidationError> {
        match normalize_field(field).as_str() {
            "totaldays" => Ok(Self::TotalDays(coerce_int(raw))),
            "rollingaveragevelocity" | "velocity" => {
                Ok(Self::RollingAverageVelocity(coerce_int(raw) as f64))
            }
            "carryoverpoints" | "carryover" => Ok(Self::CarryoverPoints(coerce_float(raw))),
            _ => Err(ValidationError::UnknownField {
                record: "sprint",
                field: field.to_string(),
            }),
        }
    }
}

/// Resolve a country reference given as an id or a name.
pub fn resolve_country(raw: &str, config: &SprintConfig) -> Result<CountryId, ValidationError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        if let Some(country) = config.country(CountryId(n)) {
            return Ok(country.id);
        }
    }
    config
        .country_by_name(raw)
        .map(|c| c.id)
        .ok_or_else(|| ValidationError::UnknownCountry(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_int_takes_leading_digits() {
        assert_eq!(coerce_int("12"), 12);
        assert_eq!(coerce_int("12abc"), 12);
        assert_eq!(coerce_int("3.7"), 3);
        assert_eq!(coerce_int("  -2"), -2);
        assert_eq!(coerce_int("+8"), 8);
    }

    #[test]
    fn coerce_int_falls_back_to_zero() {
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int("-"), 0);
        assert_eq!(coerce_int(".5"), 0);
    }

    #[test]
    fn coerce_int_saturates() {
        assert_eq!(coerce_int("99999999999999999999999"), i64::MAX);
        assert_eq!(coerce_int("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn coerce_float_accepts_fractions() {
        assert_eq!(coerce_float("2.5"), 2.5);
        assert_eq!(coerce_float(".5"), 0.5);
        assert_eq!(coerce_float("1.25pts"), 1.25);
        assert_eq!(coerce_float("-0.75"), -0.75);
        assert_eq!(coerce_float("3."), 3.0);
    }

    #[test]
    fn coerce_float_handles_exponent() {
        assert_eq!(coerce_float("1e2"), 100.0);
        assert_eq!(coerce_float("1e"), 1.0);
        assert_eq!(coerce_float("2E-1x"), 0.2);
    }

    #[test]
    fn coerce_float_falls_back_to_zero() {
        assert_eq!(coerce_float(""), 0.0);
        assert_eq!(coerce_float("."), 0.0);
        assert_eq!(coerce_float("Infinity"), 0.0);
        assert_eq!(coerce_float("1e999"), 0.0);
    }

    #[test]
    fn country_fields_accept_both_spellings() {
        assert_eq!(CountryUpdate::from_field("devCount", "4"), Ok(CountryUpdate::DevCount(4)));
        assert_eq!(CountryUpdate::from_field("dev_count", "x"), Ok(CountryUpdate::DevCount(0)));
        assert_eq!(CountryUpdate::from_field("holidays", "2"), Ok(CountryUpdate::Holidays(2)));
        assert_eq!(
            CountryUpdate::from_field("name", "Peru"),
            Ok(CountryUpdate::Name("Peru".into()))
        );
        assert!(CountryUpdate::from_field("color", "red").is_err());
    }

    #[test]
    fn pto_country_by_id_or_name() {
        let cfg = SprintConfig::default();
        assert_eq!(
            PtoUpdate::from_field("country", "2", &cfg),
            Ok(PtoUpdate::Country(CountryId(2)))
        );
        assert_eq!(
            PtoUpdate::from_field("country", "us", &cfg),
            Ok(PtoUpdate::Country(CountryId(3)))
        );
        assert_eq!(
            PtoUpdate::from_field("country", "9", &cfg),
            Err(ValidationError::UnknownCountry("9".into()))
        );
    }

    #[test]
    fn pto_days_are_integers() {
        let cfg = SprintConfig::default();
        assert_eq!(PtoUpdate::from_field("days", "2.5", &cfg), Ok(PtoUpdate::Days(2.0)));
        assert_eq!(
            PtoUpdate::from_field("devName", "Ana", &cfg),
            Ok(PtoUpdate::DevName("Ana".into()))
        );
    }

    #[test]
    fn scalars_coerce_like_the_form() {
        assert_eq!(ScalarUpdate::from_field("totalDays", "10"), Ok(ScalarUpdate::TotalDays(10)));
        assert_eq!(
            ScalarUpdate::from_field("velocity", "27.9"),
            Ok(ScalarUpdate::RollingAverageVelocity(27.0))
        );
        assert_eq!(
            ScalarUpdate::from_field("carryoverPoints", "2.5"),
            Ok(ScalarUpdate::CarryoverPoints(2.5))
        );
        assert!(matches!(
            ScalarUpdate::from_field("sprintName", "x"),
            Err(ValidationError::UnknownField { record: "sprint", .. })
        ));
    }
}
