//! # Project Data Structures
//!
//! The `Project` is the caller-owned session: project metadata, the ordered
//! appliance list, and the settings the totals depend on (gas energy content,
//! active diversity standard, display unit). Nothing in the engine keeps
//! state of its own; after any mutation the caller asks for fresh totals with
//! [`Project::recompute`].
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── projectInfo: open key/value map (projectName, streetAddress, ...)
//! ├── appliances: [ApplianceEntry] (ordered)
//! ├── gasEnergyContent: BTU per cubic foot
//! ├── diversityStandard: default | ashrae | iapmo
//! └── resultsUnits: BTU/hr | MMBTU/hr | CFH
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gasload_core::appliance::ApplianceEntry;
//! use gasload_core::project::Project;
//! use gasload_core::reference::{Category, DiversityStandard};
//! use gasload_core::units::EnergyUnit;
//!
//! let mut project = Project::new().with_info("projectName", "Maple St Renovation");
//! project.add_appliance(ApplianceEntry::from_catalog(
//!     Category::Heating,
//!     "Forced Air Furnace (<225k BTU/hr)",
//!     100_000.0,
//!     EnergyUnit::BtuPerHour,
//!     project.diversity_standard,
//! ).unwrap());
//!
//! assert_eq!(project.recompute().winter_peak_btu.value(), 75_000.0);
//!
//! project.set_diversity_standard(DiversityStandard::Ashrae);
//! assert_eq!(project.recompute().winter_peak_btu.value(), 90_000.0);
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::appliance::{generate_id, ApplianceEntry};
use crate::calculations::{
    aggregate, aggregate_flat, appliance_lines, refresh_diversity, seasonal_breakdown, ConvertedTotals,
    FlatLoadResult, LoadLine, LoadResult, RefreshSummary, SeasonalBreakdown,
};
use crate::errors::{CalcError, CalcResult};
use crate::lenient;
use crate::reference::DiversityStandard;
use crate::units::{effective_gas_energy_content, EnergyUnit, DEFAULT_GAS_ENERGY_CONTENT};

/// Well-known `projectInfo` keys used by the report
pub mod info_keys {
    pub const PROJECT_NAME: &str = "projectName";
    pub const STREET_ADDRESS: &str = "streetAddress";
    pub const TOWN: &str = "town";
    pub const STATE: &str = "state";
    pub const DOC: &str = "doc";
    pub const G_INTAKE: &str = "gIntake";
    pub const ASSESSED_BY: &str = "assessedBy";
    pub const ASSESSMENT_DATE: &str = "assessmentDate";
    pub const REVISION_NUMBER: &str = "revisionNumber";
    pub const REVISION_DATE: &str = "revisionDate";
}

fn default_gas_energy_content() -> f64 {
    DEFAULT_GAS_ENERGY_CONTENT
}

/// Root project container, serialized wholesale to the project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Free-form form metadata (project name, address, assessor, ...)
    #[serde(default, deserialize_with = "lenient::object")]
    pub project_info: BTreeMap<String, Value>,

    /// Appliance entries in display order
    #[serde(default, deserialize_with = "lenient::appliances")]
    pub appliances: Vec<ApplianceEntry>,

    /// Gas energy content, BTU per cubic foot
    #[serde(default = "default_gas_energy_content", deserialize_with = "lenient::gas_energy_content")]
    pub gas_energy_content: f64,

    /// Standard the entries' diversity factors were taken from
    #[serde(default, deserialize_with = "lenient::standard")]
    pub diversity_standard: DiversityStandard,

    /// Unit totals are displayed and reported in
    #[serde(default, deserialize_with = "lenient::unit")]
    pub results_units: EnergyUnit,
}

impl Project {
    /// Create an empty project with default settings.
    pub fn new() -> Self {
        Project {
            project_info: BTreeMap::new(),
            appliances: Vec::new(),
            gas_energy_content: DEFAULT_GAS_ENERGY_CONTENT,
            diversity_standard: DiversityStandard::default(),
            results_units: EnergyUnit::default(),
        }
    }

    /// Set a projectInfo value (builder pattern)
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_info(key, value);
        self
    }

    pub fn set_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.project_info.insert(key.into(), Value::String(value.into()));
    }

    /// projectInfo value as text. Numbers are rendered; other JSON types and
    /// blank strings read as absent.
    pub fn info(&self, key: &str) -> Option<String> {
        match self.project_info.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Fill in blank assessment and revision dates with `today` (YYYY-MM-DD).
    /// Dates already set are kept.
    pub fn stamp_default_dates(&mut self, today: NaiveDate) {
        let stamp = today.format("%Y-%m-%d").to_string();
        for key in [info_keys::ASSESSMENT_DATE, info_keys::REVISION_DATE] {
            if self.info(key).is_none() {
                self.set_info(key, stamp.clone());
            }
        }
    }

    /// Append an appliance and return its id. A missing or duplicate id is
    /// replaced with a fresh one.
    pub fn add_appliance(&mut self, mut entry: ApplianceEntry) -> String {
        if entry.id.trim().is_empty() || self.get_appliance(&entry.id).is_some() {
            entry.id = generate_id();
        }
        let id = entry.id.clone();
        self.appliances.push(entry);
        id
    }

    /// Remove an appliance by id, returning it.
    pub fn remove_appliance(&mut self, id: &str) -> CalcResult<ApplianceEntry> {
        let index = self
            .appliances
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalcError::appliance_not_found(id))?;
        Ok(self.appliances.remove(index))
    }

    pub fn get_appliance(&self, id: &str) -> Option<&ApplianceEntry> {
        self.appliances.iter().find(|e| e.id == id)
    }

    pub fn get_appliance_mut(&mut self, id: &str) -> Option<&mut ApplianceEntry> {
        self.appliances.iter_mut().find(|e| e.id == id)
    }

    pub fn appliance_count(&self) -> usize {
        self.appliances.len()
    }

    /// Gas energy content used for CFH conversions (falls back to the default
    /// when the stored value is unusable).
    pub fn gas_energy_content(&self) -> f64 {
        effective_gas_energy_content(self.gas_energy_content)
    }

    pub fn set_gas_energy_content(&mut self, gas_energy_content: f64) {
        self.gas_energy_content = effective_gas_energy_content(gas_energy_content);
    }

    /// Switch the active standard and refresh every entry's diversity factor.
    ///
    /// Must run before the next [`recompute`](Self::recompute) so totals
    /// reflect the selected standard.
    pub fn set_diversity_standard(&mut self, standard: DiversityStandard) -> RefreshSummary {
        self.diversity_standard = standard;
        refresh_diversity(&mut self.appliances, standard)
    }

    pub fn set_results_units(&mut self, unit: EnergyUnit) {
        self.results_units = unit;
    }

    /// Recompute load totals from scratch.
    pub fn recompute(&self) -> LoadResult {
        aggregate(&self.appliances, self.gas_energy_content())
    }

    /// Totals without the seasonal split
    pub fn recompute_flat(&self) -> FlatLoadResult {
        aggregate_flat(&self.appliances, self.gas_energy_content())
    }

    /// Totals converted into the project's results unit
    pub fn display_totals(&self) -> ConvertedTotals {
        self.recompute().in_unit(self.results_units, self.gas_energy_content())
    }

    /// Per-appliance lines in list order
    pub fn lines(&self) -> Vec<LoadLine> {
        appliance_lines(&self.appliances, self.gas_energy_content())
    }

    /// Per-appliance lines grouped by season
    pub fn breakdown(&self) -> SeasonalBreakdown {
        seasonal_breakdown(&self.appliances, self.gas_energy_content())
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new()
    }
}
