//! # Seasonal Breakdown
//!
//! Per-appliance detail behind the aggregated totals: each entry's rating,
//! diversity and diversified load, grouped by seasonal class with subtotals.
//! This is what the calculation-details listing and the report's peak tables
//! are built from.
//!
//! ```text
//! Winter peak = Σ winter lines + Σ year-round lines
//! Summer peak = Σ summer lines + Σ year-round lines
//! ```

use serde::{Deserialize, Serialize};

use crate::appliance::ApplianceEntry;
use crate::reference::SeasonalClass;
use crate::units::{from_base, Btuh, EnergyUnit};

/// One appliance's contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLine {
    pub id: String,
    /// Equipment text (or category when blank)
    pub name: String,
    pub category: String,
    pub season: SeasonalClass,
    /// Maximum input rating, BTU/hr
    pub rating_btu: Btuh,
    /// Diversity factor actually applied, percent
    pub diversity: f64,
    /// rating x diversity / 100, BTU/hr
    pub diversified_btu: Btuh,
}

impl LoadLine {
    pub fn from_entry(entry: &ApplianceEntry, gas_energy_content: f64) -> Self {
        LoadLine {
            id: entry.id.clone(),
            name: entry.label().to_string(),
            category: entry.category.clone(),
            season: entry.seasonal_class(),
            rating_btu: entry.rating_btu(gas_energy_content),
            diversity: entry.effective_diversity(),
            diversified_btu: entry.diversified_btu(gas_energy_content),
        }
    }

    pub fn rating_in(&self, unit: EnergyUnit, gas_energy_content: f64) -> f64 {
        from_base(self.rating_btu.value(), unit, gas_energy_content)
    }

    pub fn diversified_in(&self, unit: EnergyUnit, gas_energy_content: f64) -> f64 {
        from_base(self.diversified_btu.value(), unit, gas_energy_content)
    }
}

/// Appliance lines grouped by seasonal class, each group in list order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalBreakdown {
    pub winter: Vec<LoadLine>,
    pub summer: Vec<LoadLine>,
    pub year_round: Vec<LoadLine>,
}

impl SeasonalBreakdown {
    /// Lines of one seasonal class
    pub fn lines(&self, season: SeasonalClass) -> &[LoadLine] {
        match season {
            SeasonalClass::Winter => &self.winter,
            SeasonalClass::Summer => &self.summer,
            SeasonalClass::YearRound => &self.year_round,
        }
    }

    /// Sum of diversified loads of one seasonal class
    pub fn subtotal(&self, season: SeasonalClass) -> Btuh {
        self.lines(season).iter().map(|l| l.diversified_btu).sum()
    }

    /// Winter subtotal plus year-round subtotal
    pub fn winter_total(&self) -> Btuh {
        self.subtotal(SeasonalClass::Winter) + self.subtotal(SeasonalClass::YearRound)
    }

    /// Summer subtotal plus year-round subtotal
    pub fn summer_total(&self) -> Btuh {
        self.subtotal(SeasonalClass::Summer) + self.subtotal(SeasonalClass::YearRound)
    }

    /// Larger of the two seasonal totals
    pub fn design_total(&self) -> Btuh {
        self.winter_total().max(self.summer_total())
    }

    pub fn is_empty(&self) -> bool {
        self.winter.is_empty() && self.summer.is_empty() && self.year_round.is_empty()
    }
}

/// One line per appliance, in list order.
pub fn appliance_lines(appliances: &[ApplianceEntry], gas_energy_content: f64) -> Vec<LoadLine> {
    appliances
        .iter()
        .map(|entry| LoadLine::from_entry(entry, gas_energy_content))
        .collect()
}

/// Group appliance lines by seasonal class.
pub fn seasonal_breakdown(appliances: &[ApplianceEntry], gas_energy_content: f64) -> SeasonalBreakdown {
    let mut breakdown = SeasonalBreakdown::default();
    for line in appliance_lines(appliances, gas_energy_content) {
        match line.season {
            SeasonalClass::Winter => breakdown.winter.push(line),
            SeasonalClass::Summer => breakdown.summer.push(line),
            SeasonalClass::YearRound => breakdown.year_round.push(line),
        }
    }
    breakdown
}
