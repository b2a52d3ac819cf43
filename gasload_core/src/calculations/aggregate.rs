//! # Load Aggregation
//!
//! Folds a list of appliance entries into the four totals a gas service is
//! sized from.
//!
//! ## Algorithm
//!
//! For each entry, in list order:
//!
//! 1. Convert the rating to BTU/hr and add it to the connected load.
//! 2. Diversified load = rating x (diversity / 100).
//! 3. Winter and year-round categories add the diversified load to the winter
//!    peak; summer and year-round categories add it to the summer peak.
//!    Year-round loads therefore appear in full in both peaks.
//!
//! The design load is the larger of the two peaks. Malformed ratings and
//! diversities count as zero; aggregation never fails.
//!
//! ## Example
//!
//! ```rust
//! use gasload_core::appliance::ApplianceEntry;
//! use gasload_core::calculations::aggregate;
//! use gasload_core::units::EnergyUnit;
//!
//! let appliances = vec![
//!     ApplianceEntry::new("Heating", "Furnace", 100_000.0, EnergyUnit::BtuPerHour, 75.0),
//!     ApplianceEntry::new("Hot Water", "Tank", 40_000.0, EnergyUnit::BtuPerHour, 35.0),
//! ];
//!
//! let result = aggregate(&appliances, 1036.0);
//! assert!((result.winter_peak_btu.value() - 89_000.0).abs() < 1e-6);
//! assert!((result.summer_peak_btu.value() - 14_000.0).abs() < 1e-6);
//! assert_eq!(result.diversified_btu, result.winter_peak_btu);
//! ```

use serde::{Deserialize, Serialize};

use crate::appliance::ApplianceEntry;
use crate::units::{from_base, Btuh, EnergyUnit};

/// Aggregated load totals, all in BTU/hr.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    /// Sum of maximum input ratings, no diversity applied
    pub connected_btu: Btuh,
    /// Design load: the larger of the winter and summer peaks
    pub diversified_btu: Btuh,
    /// Winter + year-round diversified loads
    pub winter_peak_btu: Btuh,
    /// Summer + year-round diversified loads
    pub summer_peak_btu: Btuh,
}

impl LoadResult {
    /// Design load (alias for `diversified_btu`)
    pub fn design_btu(&self) -> Btuh {
        self.diversified_btu
    }

    /// Which season sets the design load. Ties go to winter.
    pub fn governing_season(&self) -> &'static str {
        if self.summer_peak_btu > self.winter_peak_btu {
            "Summer"
        } else {
            "Winter"
        }
    }

    /// Express the totals in a display unit.
    pub fn in_unit(&self, unit: EnergyUnit, gas_energy_content: f64) -> ConvertedTotals {
        let convert = |btu: Btuh| from_base(btu.value(), unit, gas_energy_content);
        ConvertedTotals {
            unit,
            connected: convert(self.connected_btu),
            winter_peak: convert(self.winter_peak_btu),
            summer_peak: convert(self.summer_peak_btu),
            design: convert(self.diversified_btu),
        }
    }
}

/// Load totals converted into a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedTotals {
    pub unit: EnergyUnit,
    pub connected: f64,
    pub winter_peak: f64,
    pub summer_peak: f64,
    pub design: f64,
}

/// Aggregate appliance entries into connected, seasonal peak and design loads.
///
/// Pure and deterministic; the result does not depend on list order.
pub fn aggregate(appliances: &[ApplianceEntry], gas_energy_content: f64) -> LoadResult {
    let mut connected = Btuh::default();
    let mut winter_peak = Btuh::default();
    let mut summer_peak = Btuh::default();

    for entry in appliances {
        let rating = entry.rating_btu(gas_energy_content);
        connected = connected + rating;

        let diversified = entry.diversified_btu(gas_energy_content);
        let season = entry.seasonal_class();
        if season.in_winter() {
            winter_peak = winter_peak + diversified;
        }
        if season.in_summer() {
            summer_peak = summer_peak + diversified;
        }
    }

    LoadResult {
        connected_btu: connected,
        diversified_btu: winter_peak.max(summer_peak),
        winter_peak_btu: winter_peak,
        summer_peak_btu: summer_peak,
    }
}

/// Totals from the single-standard calculator variant: no seasonal split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatLoadResult {
    pub connected_btu: Btuh,
    /// Sum of every entry's diversified load; also the design load
    pub diversified_btu: Btuh,
}

/// Aggregate without seasonal classification: every diversified load goes
/// into one running total, which is the design load.
pub fn aggregate_flat(appliances: &[ApplianceEntry], gas_energy_content: f64) -> FlatLoadResult {
    FlatLoadResult {
        connected_btu: appliances.iter().map(|e| e.rating_btu(gas_energy_content)).sum(),
        diversified_btu: appliances.iter().map(|e| e.diversified_btu(gas_energy_content)).sum(),
    }
}
