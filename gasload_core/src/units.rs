//! # Unit Types
//!
//! Energy-rate units for gas appliance ratings and the conversions between
//! them. Every calculation runs on a single canonical base unit, BTU/hr;
//! inputs are converted on the way in and results on the way out.
//!
//! ## Supported Units
//!
//! - `BTU/hr` - the base unit (identity conversion)
//! - `MMBTU/hr` - millions of BTU per hour
//! - `CFH` - cubic feet of gas per hour, converted through the gas energy
//!   content (BTU per cubic foot)
//!
//! ## Example
//!
//! ```rust
//! use gasload_core::units::{to_base, from_base, EnergyUnit};
//!
//! let btu = to_base(100.0, EnergyUnit::Cfh, 1000.0);
//! assert_eq!(btu, 100_000.0);
//!
//! let cfh = from_base(btu, EnergyUnit::Cfh, 1000.0);
//! assert_eq!(cfh, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::errors::{CalcError, CalcResult};

/// Fallback gas energy content in BTU per cubic foot, used whenever the
/// configured value is missing, zero, negative, or not a number.
pub const DEFAULT_GAS_ENERGY_CONTENT: f64 = 1036.0;

/// BTU per MMBTU
pub const BTU_PER_MMBTU: f64 = 1_000_000.0;

// ============================================================================
// Unit Selection
// ============================================================================

/// Energy-rate unit for appliance ratings and displayed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnergyUnit {
    /// BTU per hour (base unit)
    #[default]
    #[serde(rename = "BTU/hr")]
    BtuPerHour,
    /// Millions of BTU per hour
    #[serde(rename = "MMBTU/hr")]
    MmbtuPerHour,
    /// Cubic feet of gas per hour
    #[serde(rename = "CFH")]
    Cfh,
}

impl EnergyUnit {
    /// All units in display order
    pub const ALL: [EnergyUnit; 3] = [EnergyUnit::BtuPerHour, EnergyUnit::MmbtuPerHour, EnergyUnit::Cfh];

    /// Label as it appears in project files and reports
    pub fn label(&self) -> &'static str {
        match self {
            EnergyUnit::BtuPerHour => "BTU/hr",
            EnergyUnit::MmbtuPerHour => "MMBTU/hr",
            EnergyUnit::Cfh => "CFH",
        }
    }

    /// Parse from common string representations ("BTU/hr", "btuh", "mmbtu", "cfh", ...)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "BTU/HR" | "BTUH" | "BTU" | "BTUHR" => Ok(EnergyUnit::BtuPerHour),
            "MMBTU/HR" | "MMBTUH" | "MMBTU" | "MMBTUHR" => Ok(EnergyUnit::MmbtuPerHour),
            "CFH" | "FT3/HR" => Ok(EnergyUnit::Cfh),
            _ => Err(CalcError::invalid_input(
                "units",
                s,
                "Expected one of BTU/hr, MMBTU/hr, CFH",
            )),
        }
    }

    /// Parse the way a loaded project file is read: anything unrecognized is BTU/hr.
    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_default()
    }
}

impl std::fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Energy Rate Units
// ============================================================================

/// Energy rate in BTU per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Btuh(pub f64);

/// Energy rate in millions of BTU per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mmbtuh(pub f64);

impl From<Mmbtuh> for Btuh {
    fn from(mmbtuh: Mmbtuh) -> Self {
        Btuh(mmbtuh.0 * BTU_PER_MMBTU)
    }
}

impl From<Btuh> for Mmbtuh {
    fn from(btuh: Btuh) -> Self {
        Mmbtuh(btuh.0 / BTU_PER_MMBTU)
    }
}

impl Btuh {
    /// The larger of two rates
    pub fn max(self, other: Btuh) -> Btuh {
        Btuh(self.0.max(other.0))
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, x| acc + x)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Btuh);
impl_arithmetic!(Mmbtuh);

// ============================================================================
// Conversions
// ============================================================================

/// Gas energy content actually used for CFH conversions.
///
/// Zero, negative and non-finite values fall back to
/// [`DEFAULT_GAS_ENERGY_CONTENT`], so a CFH division can never divide by zero.
pub fn effective_gas_energy_content(gas_energy_content: f64) -> f64 {
    if gas_energy_content.is_finite() && gas_energy_content > 0.0 {
        gas_energy_content
    } else {
        DEFAULT_GAS_ENERGY_CONTENT
    }
}

/// Convert a rate in `unit` to BTU/hr.
pub fn to_base(value: f64, unit: EnergyUnit, gas_energy_content: f64) -> f64 {
    match unit {
        EnergyUnit::BtuPerHour => value,
        EnergyUnit::MmbtuPerHour => Btuh::from(Mmbtuh(value)).value(),
        EnergyUnit::Cfh => value * effective_gas_energy_content(gas_energy_content),
    }
}

/// Convert a rate in BTU/hr to `unit`. Inverse of [`to_base`].
pub fn from_base(value: f64, unit: EnergyUnit, gas_energy_content: f64) -> f64 {
    match unit {
        EnergyUnit::BtuPerHour => value,
        EnergyUnit::MmbtuPerHour => Mmbtuh::from(Btuh(value)).value(),
        EnergyUnit::Cfh => value / effective_gas_energy_content(gas_energy_content),
    }
}

// ============================================================================
// Display Formatting
// ============================================================================

/// Format a quantity with thousands separators and at most two decimals,
/// trailing zeros trimmed ("89,000", "96.53", "0.1").
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Format a quantity followed by its unit label ("75,000 BTU/hr").
pub fn format_with_unit(value: f64, unit: EnergyUnit) -> String {
    format!("{} {}", format_quantity(value), unit.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_btu_identity() {
        assert_eq!(to_base(42_000.0, EnergyUnit::BtuPerHour, 1036.0), 42_000.0);
        assert_eq!(from_base(42_000.0, EnergyUnit::BtuPerHour, 1036.0), 42_000.0);
    }

    #[test]
    fn test_mmbtu_conversion() {
        assert_eq!(to_base(1.0, EnergyUnit::MmbtuPerHour, 1036.0), 1_000_000.0);
        assert_eq!(from_base(250_000.0, EnergyUnit::MmbtuPerHour, 1036.0), 0.25);
    }

    #[test]
    fn test_cfh_conversion() {
        assert_eq!(to_base(100.0, EnergyUnit::Cfh, 1000.0), 100_000.0);
        assert_relative_eq!(from_base(100_000.0, EnergyUnit::Cfh, 1036.0), 96.525096, epsilon = 1e-5);
    }

    #[test]
    fn test_round_trip_all_units() {
        for unit in EnergyUnit::ALL {
            for value in [0.0, 1.0, 37.5, 125_000.0, 3.3e7] {
                for gas in [950.0, 1000.0, 1036.0, 1100.5] {
                    let back = from_base(to_base(value, unit, gas), unit, gas);
                    assert_relative_eq!(back, value, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_invalid_gas_energy_falls_back() {
        assert_eq!(effective_gas_energy_content(0.0), DEFAULT_GAS_ENERGY_CONTENT);
        assert_eq!(effective_gas_energy_content(-5.0), DEFAULT_GAS_ENERGY_CONTENT);
        assert_eq!(effective_gas_energy_content(f64::NAN), DEFAULT_GAS_ENERGY_CONTENT);
        assert_eq!(effective_gas_energy_content(1020.0), 1020.0);

        let cfh = from_base(1036.0, EnergyUnit::Cfh, 0.0);
        assert!(cfh.is_finite());
        assert_eq!(cfh, 1.0);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(EnergyUnit::from_str_flexible("BTU/hr").unwrap(), EnergyUnit::BtuPerHour);
        assert_eq!(EnergyUnit::from_str_flexible("mmbtu").unwrap(), EnergyUnit::MmbtuPerHour);
        assert_eq!(EnergyUnit::from_str_flexible("cfh").unwrap(), EnergyUnit::Cfh);
        assert!(EnergyUnit::from_str_flexible("kW").is_err());
        assert_eq!(EnergyUnit::parse_lenient("therms"), EnergyUnit::BtuPerHour);
    }

    #[test]
    fn test_unit_serialization() {
        let json = serde_json::to_string(&EnergyUnit::MmbtuPerHour).unwrap();
        assert_eq!(json, "\"MMBTU/hr\"");
        let parsed: EnergyUnit = serde_json::from_str("\"CFH\"").unwrap();
        assert_eq!(parsed, EnergyUnit::Cfh);
    }

    #[test]
    fn test_rate_arithmetic() {
        let a = Btuh(75_000.0);
        let b = Btuh(14_000.0);
        assert_eq!((a + b).0, 89_000.0);
        assert_eq!((a * 0.5).0, 37_500.0);
        assert_eq!(a.max(b), a);
        let total: Btuh = vec![a, b].into_iter().sum();
        assert_eq!(total.value(), 89_000.0);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(89_000.0), "89,000");
        assert_eq!(format_quantity(1_234_567.891), "1,234,567.89");
        assert_eq!(format_quantity(96.525096), "96.53");
        assert_eq!(format_quantity(0.1), "0.1");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(999.999), "1,000");
        assert_eq!(format_quantity(-1500.0), "-1,500");
        assert_eq!(format_with_unit(75_000.0, EnergyUnit::BtuPerHour), "75,000 BTU/hr");
    }
}
