//! # Appliance Entries
//!
//! One row of the load assessment: what the appliance is, its maximum input
//! rating, and the diversity factor applied to it.
//!
//! Entries keep their category as the stored string rather than a
//! [`Category`], so a file naming a category this build does not know still
//! loads and aggregates (as year-round).
//!
//! ## Diversity Sources
//!
//! - Catalog entries take diversity from their equipment's per-standard value.
//! - Custom entries carry freeform equipment text and take diversity from the
//!   `diversity_source` category's default, when one is set.
//!
//! Either way the user may override the percentage afterwards.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "appliance-3f0c...",
//!   "category": "Heating",
//!   "equipment": "Forced Air Furnace (<225k BTU/hr)",
//!   "rating": 100000,
//!   "units": "BTU/hr",
//!   "diversity": 75
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::lenient;
use crate::reference::{Category, DiversityStandard, SeasonalClass};
use crate::units::{to_base, Btuh, EnergyUnit};

/// Generate a fresh appliance id
pub fn generate_id() -> String {
    format!("appliance-{}", Uuid::new_v4())
}

/// A single appliance in a load assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceEntry {
    /// Unique id within the project
    #[serde(default = "generate_id", deserialize_with = "lenient::id")]
    pub id: String,

    /// Category name as stored (see [`Category::name`])
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: String,

    /// Equipment name from the catalog, or freeform text for Custom entries
    #[serde(default, deserialize_with = "lenient::string")]
    pub equipment: String,

    /// Maximum input rating in `units`
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: f64,

    /// Units of `rating`
    #[serde(default, deserialize_with = "lenient::unit")]
    pub units: EnergyUnit,

    /// Diversity factor, percent of rating
    #[serde(default, deserialize_with = "lenient::number")]
    pub diversity: f64,

    /// Category whose default diversity a Custom entry borrows
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::optional_string")]
    pub diversity_source: Option<String>,
}

impl ApplianceEntry {
    /// Create an entry with an explicit diversity factor and a generated id.
    pub fn new(
        category: impl Into<String>,
        equipment: impl Into<String>,
        rating: f64,
        units: EnergyUnit,
        diversity: f64,
    ) -> Self {
        ApplianceEntry {
            id: generate_id(),
            category: category.into(),
            equipment: equipment.into(),
            rating,
            units,
            diversity,
            diversity_source: None,
        }
    }

    /// Create an entry for listed equipment, taking its diversity from the catalog.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gasload_core::appliance::ApplianceEntry;
    /// use gasload_core::reference::{Category, DiversityStandard};
    /// use gasload_core::units::EnergyUnit;
    ///
    /// let dryer = ApplianceEntry::from_catalog(
    ///     Category::ClothesDryers,
    ///     "Standard Dryer",
    ///     22_000.0,
    ///     EnergyUnit::BtuPerHour,
    ///     DiversityStandard::Ashrae,
    /// ).unwrap();
    /// assert_eq!(dryer.diversity, 30.0);
    /// ```
    ///
    /// # Errors
    ///
    /// `EquipmentNotFound` if `equipment` is not listed under `category`
    /// (always for Custom, which has no listed equipment).
    pub fn from_catalog(
        category: Category,
        equipment: &str,
        rating: f64,
        units: EnergyUnit,
        standard: DiversityStandard,
    ) -> CalcResult<Self> {
        let item = category.find_equipment(equipment)?;
        Ok(ApplianceEntry::new(
            category.name(),
            item.name,
            rating,
            units,
            item.diversity.get(standard),
        ))
    }

    /// Create a Custom entry. Diversity comes from `source`'s category default,
    /// or is zero until the user enters one.
    pub fn custom(
        name: impl Into<String>,
        rating: f64,
        units: EnergyUnit,
        source: Option<Category>,
        standard: DiversityStandard,
    ) -> Self {
        let diversity = source
            .and_then(|c| c.default_diversity())
            .map(|d| d.get(standard))
            .unwrap_or(0.0);
        let mut entry = ApplianceEntry::new(Category::Custom.name(), name, rating, units, diversity);
        entry.diversity_source = source.map(|c| c.name().to_string());
        entry
    }

    /// Override the diversity factor (builder pattern)
    pub fn with_diversity(mut self, diversity: f64) -> Self {
        self.diversity = diversity;
        self
    }

    /// Replace the generated id (builder pattern)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// The typed category, if the stored name is known
    pub fn category_kind(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }

    pub fn is_custom(&self) -> bool {
        self.category_kind() == Some(Category::Custom)
    }

    /// Seasonal class of this entry's category; unknown categories are year-round.
    pub fn seasonal_class(&self) -> SeasonalClass {
        self.category_kind()
            .map(|c| c.seasonal_class())
            .unwrap_or(SeasonalClass::YearRound)
    }

    /// Rating as used by the calculation: negative or non-finite ratings count as zero.
    pub fn effective_rating(&self) -> f64 {
        if self.rating.is_finite() && self.rating > 0.0 {
            self.rating
        } else {
            0.0
        }
    }

    /// Diversity as used by the calculation: non-finite counts as zero,
    /// everything else is clamped to 0-100.
    pub fn effective_diversity(&self) -> f64 {
        if self.diversity.is_finite() {
            self.diversity.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Maximum input rating in BTU/hr
    pub fn rating_btu(&self, gas_energy_content: f64) -> Btuh {
        Btuh(to_base(self.effective_rating(), self.units, gas_energy_content))
    }

    /// Diversified load in BTU/hr (rating x diversity / 100)
    pub fn diversified_btu(&self, gas_energy_content: f64) -> Btuh {
        self.rating_btu(gas_energy_content) * (self.effective_diversity() / 100.0)
    }

    /// Diversity this entry should carry under `standard`, per the reference data.
    ///
    /// # Errors
    ///
    /// * Custom entries: `CategoryNotFound` when no usable `diversity_source` is set
    /// * Other entries: `CategoryNotFound` / `EquipmentNotFound` from the catalog lookup
    pub fn reference_diversity(&self, standard: DiversityStandard) -> CalcResult<f64> {
        let category = self
            .category_kind()
            .ok_or_else(|| CalcError::category_not_found(&self.category))?;

        if category.is_custom() {
            let source = self
                .diversity_source
                .as_deref()
                .ok_or_else(|| CalcError::category_not_found(""))?;
            crate::reference::category_defaults(source).map(|d| d.get(standard))
        } else {
            Ok(category.find_equipment(&self.equipment)?.diversity.get(standard))
        }
    }

    /// Refresh the diversity factor from the reference data for `standard`.
    ///
    /// Returns `true` if a reference value was found (the diversity now equals
    /// it); entries with nothing resolvable are left unchanged.
    pub fn refresh_diversity(&mut self, standard: DiversityStandard) -> bool {
        match self.reference_diversity(standard) {
            Ok(pct) => {
                self.diversity = pct;
                true
            }
            Err(e) => {
                log::debug!("keeping diversity {}% for '{}': {}", self.diversity, self.id, e);
                false
            }
        }
    }

    /// Move the entry to another category.
    ///
    /// Custom clears the entry (no equipment, rating and diversity 0, no
    /// source). Any other category selects its first listed equipment and
    /// takes that item's diversity under `standard`; the rating is kept.
    pub fn set_category(&mut self, category: Category, standard: DiversityStandard) {
        self.category = category.name().to_string();
        self.diversity_source = None;

        match category.equipment().first() {
            Some(item) if !category.is_custom() => {
                self.equipment = item.name.to_string();
                self.diversity = item.diversity.get(standard);
            }
            _ => {
                self.equipment.clear();
                self.rating = 0.0;
                self.diversity = 0.0;
            }
        }
        log::debug!("'{}' moved to {} ({}%)", self.id, self.category, self.diversity);
    }

    /// Change the equipment.
    ///
    /// Custom entries take `name` as freeform text and keep their diversity.
    /// Listed categories look the item up and take its diversity under `standard`.
    ///
    /// # Errors
    ///
    /// * `CategoryNotFound` if the stored category is unknown
    /// * `EquipmentNotFound` if `name` is not listed under the category
    pub fn set_equipment(&mut self, name: &str, standard: DiversityStandard) -> CalcResult<()> {
        let category = self
            .category_kind()
            .ok_or_else(|| CalcError::category_not_found(&self.category))?;

        if category.is_custom() {
            self.equipment = name.to_string();
        } else {
            let item = category.find_equipment(name)?;
            self.equipment = item.name.to_string();
            self.diversity = item.diversity.get(standard);
        }
        Ok(())
    }

    /// Set or clear the category a Custom entry borrows its diversity from.
    ///
    /// Setting a source replaces the diversity with that category's default
    /// under `standard`. Clearing it keeps the current diversity.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the entry is not Custom, or if `source` is Custom
    /// (which has no default diversity).
    pub fn set_diversity_source(&mut self, source: Option<Category>, standard: DiversityStandard) -> CalcResult<()> {
        if !self.is_custom() {
            return Err(CalcError::invalid_input(
                "diversitySource",
                source.map(|c| c.name()).unwrap_or(""),
                "only Custom appliances take a diversity source",
            ));
        }

        match source {
            Some(category) => {
                let defaults = category.default_diversity().ok_or_else(|| {
                    CalcError::invalid_input("diversitySource", category.name(), "category has no default diversity")
                })?;
                self.diversity = defaults.get(standard);
                self.diversity_source = Some(category.name().to_string());
            }
            None => self.diversity_source = None,
        }
        Ok(())
    }

    /// Display label: the equipment text, or the category when it is blank
    pub fn label(&self) -> &str {
        if self.equipment.trim().is_empty() {
            &self.category
        } else {
            &self.equipment
        }
    }
}
