//! Fail-soft field readers for project files.
//!
//! Project files carry no schema version and may come from hand edits or older
//! builds, so every field is read through these helpers instead of failing the
//! whole load: numbers may arrive as numeric strings ("75", "75%"), anything
//! non-numeric becomes zero, and unknown units read as BTU/hr.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::appliance::{generate_id, ApplianceEntry};
use crate::reference::DiversityStandard;
use crate::units::{EnergyUnit, DEFAULT_GAS_ENERGY_CONTENT};

/// Coerce a JSON value to a finite number the way a form field is read:
/// numbers pass through, strings are parsed from their leading numeric text.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

/// Parse the longest numeric prefix of `s` ("40000 BTU" -> 40000, "1.5e5" -> 150000,
/// "abc" -> None). An exponent is only taken when at least one digit follows it.
pub(crate) fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).unwrap_or(0.0))
}

pub(crate) fn gas_energy_content<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match coerce_number(&value).filter(|g| *g > 0.0) {
        Some(g) => Ok(g),
        None => {
            log::warn!(
                "gasEnergyContent {} is not a positive number, using {} BTU/ft3",
                value,
                DEFAULT_GAS_ENERGY_CONTENT
            );
            Ok(DEFAULT_GAS_ENERGY_CONTENT)
        }
    }
}

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let id = string(deserializer)?;
    Ok(if id.trim().is_empty() { generate_id() } else { id })
}

pub(crate) fn unit<'de, D>(deserializer: D) -> Result<EnergyUnit, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => EnergyUnit::parse_lenient(&s),
        _ => EnergyUnit::default(),
    })
}

pub(crate) fn standard<'de, D>(deserializer: D) -> Result<DiversityStandard, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => DiversityStandard::from_str_flexible(&s).unwrap_or_default(),
        _ => DiversityStandard::default(),
    })
}

pub(crate) fn object<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

/// Read the appliance list, dropping elements that are not JSON objects.
pub(crate) fn appliances<'de, D>(deserializer: D) -> Result<Vec<ApplianceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<ApplianceEntry>(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping unreadable appliance entry: {}", e);
                None
            }
        })
        .collect())
}
