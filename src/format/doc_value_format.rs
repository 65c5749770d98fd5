use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::decimal::DecimalPattern;
use super::FormatError;
use crate::stream::{DecodeError, NamedWriteable, StreamInput, StreamOutput, Writeable};

/// How a numeric doc value is turned into a display string.
///
/// The set of variants is closed: the wire tag of each variant is fixed and
/// [`DocValueFormat::read_from`] resolves tags with a plain `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocValueFormat {
    /// Pass-through. Results carrying this format never emit a
    /// `value_as_string` field.
    Raw,
    Boolean,
    Decimal(DecimalPattern),
    DateTime(DateTimeFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    pattern: String,
    zone_id: String,
    offset: FixedOffset,
}

impl DocValueFormat {
    pub const RAW_NAME: &'static str = "raw";
    pub const BOOLEAN_NAME: &'static str = "bool";
    pub const DECIMAL_NAME: &'static str = "decimal";
    pub const DATE_TIME_NAME: &'static str = "date_time";

    pub fn decimal(pattern: &str) -> Result<Self, FormatError> {
        DecimalPattern::parse(pattern).map(Self::Decimal)
    }

    pub fn date_time(pattern: &str, zone_id: &str) -> Result<Self, FormatError> {
        DateTimeFormat::new(pattern, zone_id).map(Self::DateTime)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw)
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Raw => format_raw(value),
            Self::Boolean => (value != 0.0).to_string(),
            Self::Decimal(pattern) => pattern.format(value),
            Self::DateTime(dt) => dt.format(value),
        }
    }

    /// Reads a tag written by [`StreamOutput::write_named_writeable`] and the
    /// body of the matching variant.
    pub fn read_from(input: &mut StreamInput) -> Result<Self, DecodeError> {
        let name = input.read_string()?;
        match name.as_str() {
            Self::RAW_NAME => Ok(Self::Raw),
            Self::BOOLEAN_NAME => Ok(Self::Boolean),
            Self::DECIMAL_NAME => {
                let pattern = input.read_string()?;
                Ok(Self::decimal(&pattern)?)
            }
            Self::DATE_TIME_NAME => {
                let pattern = input.read_string()?;
                let zone_id = input.read_string()?;
                Ok(Self::date_time(&pattern, &zone_id)?)
            }
            _ => {
                tracing::warn!(format = %name, "unknown doc value format on the wire");
                Err(DecodeError::UnknownNamedWriteable {
                    category: "doc value format",
                    name,
                })
            }
        }
    }
}

impl Writeable for DocValueFormat {
    fn write_to(&self, out: &mut StreamOutput) {
        match self {
            Self::Raw | Self::Boolean => {}
            Self::Decimal(pattern) => out.write_string(pattern.as_str()),
            Self::DateTime(dt) => {
                out.write_string(&dt.pattern);
                out.write_string(&dt.zone_id);
            }
        }
    }
}

impl NamedWriteable for DocValueFormat {
    fn writeable_name(&self) -> &'static str {
        match self {
            Self::Raw => Self::RAW_NAME,
            Self::Boolean => Self::BOOLEAN_NAME,
            Self::Decimal(_) => Self::DECIMAL_NAME,
            Self::DateTime(_) => Self::DATE_TIME_NAME,
        }
    }
}

impl DateTimeFormat {
    pub fn new(pattern: &str, zone_id: &str) -> Result<Self, FormatError> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidDatePattern(pattern.to_string()));
        }
        let offset = parse_zone(zone_id)?;
        Ok(Self {
            pattern: pattern.to_string(),
            zone_id: zone_id.to_string(),
            offset,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Treats `value` as epoch milliseconds, truncating any fraction.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format_raw(value);
        }
        // `as` saturates at the i64 bounds, which chrono then rejects.
        match DateTime::<Utc>::from_timestamp_millis(value as i64) {
            Some(ts) => ts
                .with_timezone(&self.offset)
                .format(&self.pattern)
                .to_string(),
            None => format_raw(value),
        }
    }
}

fn parse_zone(zone_id: &str) -> Result<FixedOffset, FormatError> {
    match zone_id {
        "UTC" | "Z" | "GMT" => Ok(Utc.fix()),
        other => FixedOffset::from_str(other)
            .map_err(|_| FormatError::InvalidTimeZone(other.to_string())),
    }
}

/// Shortest round-trip digits, laid out as plain decimal for magnitudes in
/// `[1e-3, 1e7)` and as `d.dddE<exp>` otherwise, always with at least one
/// fraction digit: `1.0`, `350.0`, `0.001`, `1.0E21`, `1.5E-7`.
fn format_raw(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == f64::INFINITY {
        return "Infinity".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let abs = value.abs();
    if abs == 0.0 {
        return format!("{sign}0.0");
    }

    let sci = format!("{abs:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (1e-3..1e7).contains(&abs) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() > int_len {
                format!("{sign}{}.{}", &digits[..int_len], &digits[int_len..])
            } else {
                format!("{sign}{digits:0<int_len$}.0")
            }
        } else {
            let zeros = "0".repeat((-exp - 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        format!("{sign}{lead}.{rest}E{exp}")
    }
}
