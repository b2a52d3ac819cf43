//! # Reference Data
//!
//! Static lookup tables for appliance diversity:
//!
//! ```text
//! Category ─┬─ SeasonalClass (winter / summer / year-round)
//!           ├─ default DiversityByStandard (not for Custom)
//!           └─ [Equipment] ── DiversityByStandard ── DiversityStandard → %
//! ```
//!
//! Appliance entries store their category as the string the user picked, so
//! the string-keyed lookups here take `&str` and report misses as
//! [`CalcError::CategoryNotFound`] / [`CalcError::EquipmentNotFound`].
//!
//! ## Example
//!
//! ```rust
//! use gasload_core::reference::{equipment_diversity, seasonal_class, DiversityStandard, SeasonalClass};
//!
//! let pct = equipment_diversity("Hot Water", "Tank Water Heater (<50 gal)", DiversityStandard::Ashrae).unwrap();
//! assert_eq!(pct, 50.0);
//!
//! assert_eq!(seasonal_class("Pool & Spa Heaters"), SeasonalClass::Summer);
//! assert_eq!(seasonal_class("Unknown Category"), SeasonalClass::YearRound);
//! ```

mod catalog;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Diversity Standards
// ============================================================================

/// A named table of diversity factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiversityStandard {
    /// Utility standard (the default)
    #[default]
    Default,
    /// ASHRAE - more conservative
    Ashrae,
    /// IAPMO - more lenient
    Iapmo,
}

impl DiversityStandard {
    /// All standards in display order
    pub const ALL: [DiversityStandard; 3] = [
        DiversityStandard::Default,
        DiversityStandard::Ashrae,
        DiversityStandard::Iapmo,
    ];

    /// Key used in project files ("default", "ashrae", "iapmo")
    pub fn key(&self) -> &'static str {
        match self {
            DiversityStandard::Default => "default",
            DiversityStandard::Ashrae => "ashrae",
            DiversityStandard::Iapmo => "iapmo",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DiversityStandard::Default => "Utility Standard (Default)",
            DiversityStandard::Ashrae => "ASHRAE (Conservative)",
            DiversityStandard::Iapmo => "IAPMO (Lenient)",
        }
    }

    /// Parse from a key or a display-name prefix ("ashrae", "ASHRAE", "utility")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" | "utility" | "utility standard" => Ok(DiversityStandard::Default),
            "ashrae" => Ok(DiversityStandard::Ashrae),
            "iapmo" => Ok(DiversityStandard::Iapmo),
            _ => Err(CalcError::invalid_input(
                "diversity_standard",
                s,
                "Expected one of default, ashrae, iapmo",
            )),
        }
    }
}

impl std::fmt::Display for DiversityStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Diversity percentage (0-100) for each standard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiversityByStandard {
    pub default: f64,
    pub ashrae: f64,
    pub iapmo: f64,
}

impl DiversityByStandard {
    pub const fn new(default: f64, ashrae: f64, iapmo: f64) -> Self {
        DiversityByStandard { default, ashrae, iapmo }
    }

    /// Percentage for the given standard
    pub fn get(&self, standard: DiversityStandard) -> f64 {
        match standard {
            DiversityStandard::Default => self.default,
            DiversityStandard::Ashrae => self.ashrae,
            DiversityStandard::Iapmo => self.iapmo,
        }
    }
}

// ============================================================================
// Seasonal Classification
// ============================================================================

/// Which seasonal peak(s) a category's diversified load counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonalClass {
    /// Winter peak only (space heating, fireplaces)
    Winter,
    /// Summer peak only (pool and spa heating)
    Summer,
    /// Both peaks, in full
    #[default]
    YearRound,
}

impl SeasonalClass {
    pub const ALL: [SeasonalClass; 3] = [SeasonalClass::Winter, SeasonalClass::Summer, SeasonalClass::YearRound];

    /// Whether the load counts toward the winter peak
    pub fn in_winter(&self) -> bool {
        matches!(self, SeasonalClass::Winter | SeasonalClass::YearRound)
    }

    /// Whether the load counts toward the summer peak
    pub fn in_summer(&self) -> bool {
        matches!(self, SeasonalClass::Summer | SeasonalClass::YearRound)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeasonalClass::Winter => "Winter",
            SeasonalClass::Summer => "Summer",
            SeasonalClass::YearRound => "Year-Round",
        }
    }
}

impl std::fmt::Display for SeasonalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Categories and Equipment
// ============================================================================

/// One listed appliance type and its diversity factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equipment {
    pub name: &'static str,
    pub diversity: DiversityByStandard,
}

/// Appliance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Heating")]
    Heating,
    #[serde(rename = "Hot Water")]
    HotWater,
    #[serde(rename = "Cooking")]
    Cooking,
    #[serde(rename = "Clothes Dryers")]
    ClothesDryers,
    #[serde(rename = "Fireplaces & Stoves")]
    FireplacesStoves,
    #[serde(rename = "Pool & Spa Heaters")]
    PoolSpaHeaters,
    #[serde(rename = "Home Generators")]
    HomeGenerators,
    #[serde(rename = "Other Appliances")]
    OtherAppliances,
    /// Freeform entry; diversity is user-entered or borrowed from another category
    #[serde(rename = "Custom")]
    Custom,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Category::Heating,
        Category::HotWater,
        Category::Cooking,
        Category::ClothesDryers,
        Category::FireplacesStoves,
        Category::PoolSpaHeaters,
        Category::HomeGenerators,
        Category::OtherAppliances,
        Category::Custom,
    ];

    /// Name as stored in project files
    pub fn name(&self) -> &'static str {
        match self {
            Category::Heating => "Heating",
            Category::HotWater => "Hot Water",
            Category::Cooking => "Cooking",
            Category::ClothesDryers => "Clothes Dryers",
            Category::FireplacesStoves => "Fireplaces & Stoves",
            Category::PoolSpaHeaters => "Pool & Spa Heaters",
            Category::HomeGenerators => "Home Generators",
            Category::OtherAppliances => "Other Appliances",
            Category::Custom => "Custom",
        }
    }

    /// Exact lookup by stored name
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Lookup ignoring case, spacing and punctuation ("hot-water", "pool and spa heaters")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        if let Some(category) = Category::from_name(s) {
            return Ok(category);
        }
        let wanted = normalize(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.name()) == wanted)
            .ok_or_else(|| CalcError::category_not_found(s))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom)
    }

    pub fn seasonal_class(&self) -> SeasonalClass {
        match self {
            Category::Heating | Category::FireplacesStoves => SeasonalClass::Winter,
            Category::PoolSpaHeaters => SeasonalClass::Summer,
            Category::HotWater
            | Category::Cooking
            | Category::ClothesDryers
            | Category::HomeGenerators
            | Category::OtherAppliances
            | Category::Custom => SeasonalClass::YearRound,
        }
    }

    /// Listed equipment, in display order. Empty for Custom.
    pub fn equipment(&self) -> &'static [Equipment] {
        match self {
            Category::Heating => catalog::HEATING,
            Category::HotWater => catalog::HOT_WATER,
            Category::Cooking => catalog::COOKING,
            Category::ClothesDryers => catalog::CLOTHES_DRYERS,
            Category::FireplacesStoves => catalog::FIREPLACES_STOVES,
            Category::PoolSpaHeaters => catalog::POOL_SPA_HEATERS,
            Category::HomeGenerators => catalog::HOME_GENERATORS,
            Category::OtherAppliances => catalog::OTHER_APPLIANCES,
            Category::Custom => &[],
        }
    }

    /// Default diversity used when a Custom entry borrows this category's factors.
    /// Custom itself has none.
    pub fn default_diversity(&self) -> Option<DiversityByStandard> {
        match self {
            Category::Heating => Some(catalog::HEATING_DEFAULT),
            Category::HotWater => Some(catalog::HOT_WATER_DEFAULT),
            Category::Cooking => Some(catalog::COOKING_DEFAULT),
            Category::ClothesDryers => Some(catalog::CLOTHES_DRYERS_DEFAULT),
            Category::FireplacesStoves => Some(catalog::FIREPLACES_STOVES_DEFAULT),
            Category::PoolSpaHeaters => Some(catalog::POOL_SPA_HEATERS_DEFAULT),
            Category::HomeGenerators => Some(catalog::HOME_GENERATORS_DEFAULT),
            Category::OtherAppliances => Some(catalog::OTHER_APPLIANCES_DEFAULT),
            Category::Custom => None,
        }
    }

    /// Find listed equipment by exact name
    pub fn find_equipment(&self, name: &str) -> CalcResult<&'static Equipment> {
        self.equipment()
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| CalcError::equipment_not_found(self.name(), name))
    }

    /// Categories a Custom entry may borrow diversity from
    pub fn diversity_sources() -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(|c| c.default_diversity().is_some())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

// ============================================================================
// String-keyed Lookups
// ============================================================================

/// Diversity percentage for a listed piece of equipment under `standard`.
///
/// # Errors
///
/// * `CategoryNotFound` - `category` is not a known category name
/// * `EquipmentNotFound` - the category has no equipment named `equipment`
///   (always the case for Custom)
pub fn equipment_diversity(category: &str, equipment: &str, standard: DiversityStandard) -> CalcResult<f64> {
    let category = Category::from_name(category).ok_or_else(|| CalcError::category_not_found(category))?;
    Ok(category.find_equipment(equipment)?.diversity.get(standard))
}

/// Default diversity mapping for a category.
///
/// Fails with `CategoryNotFound` for unknown names and for Custom, which has
/// no defaults of its own.
pub fn category_defaults(category: &str) -> CalcResult<DiversityByStandard> {
    Category::from_name(category)
        .and_then(|c| c.default_diversity())
        .ok_or_else(|| CalcError::category_not_found(category))
}

/// Seasonal class for a stored category name. Unknown names are year-round.
pub fn seasonal_class(category: &str) -> SeasonalClass {
    Category::from_name(category)
        .map(|c| c.seasonal_class())
        .unwrap_or(SeasonalClass::YearRound)
}

// ============================================================================
// Catalog Documentation
// ============================================================================

/// Render the full reference data as Markdown (used by the `gen-catalog` binary).
pub fn generate_catalog_markdown() -> String {
    let mut md = String::new();
    md.push_str("# Appliance Diversity Catalog\n\n");
    md.push_str("Diversity factors are percentages of each appliance's maximum input rating.\n\n");
    md.push_str("## Standards\n\n");
    for standard in DiversityStandard::ALL {
        md.push_str(&format!("- `{}` - {}\n", standard.key(), standard.display_name()));
    }

    md.push_str("\n## Category Defaults\n\n");
    md.push_str("| Category | Season |");
    for standard in DiversityStandard::ALL {
        md.push_str(&format!(" {} |", standard.key()));
    }
    md.push_str("\n|---|---|---|---|---|\n");
    for category in Category::ALL {
        md.push_str(&format!("| {} | {} |", category.name(), category.seasonal_class()));
        match category.default_diversity() {
            Some(defaults) => {
                for standard in DiversityStandard::ALL {
                    md.push_str(&format!(" {}% |", defaults.get(standard)));
                }
            }
            None => md.push_str(" - | - | - |"),
        }
        md.push('\n');
    }

    for category in Category::ALL {
        let equipment = category.equipment();
        if equipment.is_empty() {
            continue;
        }
        md.push_str(&format!("\n## {}\n\n", category.name()));
        md.push_str("| Equipment | default | ashrae | iapmo |\n");
        md.push_str("|---|---|---|---|\n");
        for item in equipment {
            md.push_str(&format!(
                "| {} | {}% | {}% | {}% |\n",
                item.name, item.diversity.default, item.diversity.ashrae, item.diversity.iapmo
            ));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_lookup_per_standard() {
        let furnace = "Forced Air Furnace (<225k BTU/hr)";
        assert_eq!(equipment_diversity("Heating", furnace, DiversityStandard::Default).unwrap(), 75.0);
        assert_eq!(equipment_diversity("Heating", furnace, DiversityStandard::Ashrae).unwrap(), 90.0);
        assert_eq!(equipment_diversity("Heating", furnace, DiversityStandard::Iapmo).unwrap(), 70.0);
        assert_eq!(equipment_diversity("Cooking", "Cooktop", DiversityStandard::Iapmo).unwrap(), 8.0);
    }

    #[test]
    fn test_lookup_not_found() {
        let err = equipment_diversity("Sauna", "Heater", DiversityStandard::Default).unwrap_err();
        assert_eq!(err, CalcError::category_not_found("Sauna"));

        let err = equipment_diversity("Heating", "Pool Heater", DiversityStandard::Default).unwrap_err();
        assert_eq!(err.error_code(), "EQUIPMENT_NOT_FOUND");

        // Custom has no reference equipment
        assert!(equipment_diversity("Custom", "Custom Appliance", DiversityStandard::Default).is_err());
        assert!(Category::Custom.equipment().is_empty());
    }

    #[test]
    fn test_category_defaults() {
        let defaults = category_defaults("Other Appliances").unwrap();
        assert_eq!(defaults, DiversityByStandard::new(50.0, 60.0, 40.0));
        assert!(category_defaults("Custom").is_err());
        assert!(category_defaults("Nope").is_err());
        assert_eq!(Category::diversity_sources().count(), 8);
    }

    #[test]
    fn test_seasonal_classes() {
        assert_eq!(seasonal_class("Heating"), SeasonalClass::Winter);
        assert_eq!(seasonal_class("Fireplaces & Stoves"), SeasonalClass::Winter);
        assert_eq!(seasonal_class("Pool & Spa Heaters"), SeasonalClass::Summer);
        assert_eq!(seasonal_class("Hot Water"), SeasonalClass::YearRound);
        assert_eq!(seasonal_class("Custom"), SeasonalClass::YearRound);
        assert_eq!(seasonal_class(""), SeasonalClass::YearRound);

        assert!(SeasonalClass::YearRound.in_winter() && SeasonalClass::YearRound.in_summer());
        assert!(SeasonalClass::Winter.in_winter() && !SeasonalClass::Winter.in_summer());
        assert!(!SeasonalClass::Summer.in_winter() && SeasonalClass::Summer.in_summer());
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Category::Heating.equipment().len(), 11);
        assert_eq!(Category::HotWater.equipment().len(), 7);
        assert_eq!(Category::Cooking.equipment().len(), 7);
        assert_eq!(Category::ClothesDryers.equipment().len(), 3);
        assert_eq!(Category::FireplacesStoves.equipment().len(), 6);
        assert_eq!(Category::PoolSpaHeaters.equipment().len(), 3);
        assert_eq!(Category::HomeGenerators.equipment().len(), 2);
        assert_eq!(Category::OtherAppliances.equipment().len(), 3);
    }

    #[test]
    fn test_all_percentages_in_range() {
        for category in Category::ALL {
            for item in category.equipment() {
                for standard in DiversityStandard::ALL {
                    let pct = item.diversity.get(standard);
                    assert!((0.0..=100.0).contains(&pct), "{} out of range", item.name);
                }
            }
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_name("Hot Water"), Some(Category::HotWater));
        assert_eq!(Category::from_name("hot water"), None);
        assert_eq!(Category::from_str_flexible("hot-water").unwrap(), Category::HotWater);
        assert_eq!(Category::from_str_flexible("pool and spa heaters").unwrap(), Category::PoolSpaHeaters);
        assert!(Category::from_str_flexible("garage").is_err());
    }

    #[test]
    fn test_serialization_names() {
        assert_eq!(serde_json::to_string(&Category::FireplacesStoves).unwrap(), "\"Fireplaces & Stoves\"");
        assert_eq!(serde_json::to_string(&SeasonalClass::YearRound).unwrap(), "\"year-round\"");
        assert_eq!(serde_json::to_string(&DiversityStandard::Ashrae).unwrap(), "\"ashrae\"");
        let parsed: DiversityStandard = serde_json::from_str("\"iapmo\"").unwrap();
        assert_eq!(parsed, DiversityStandard::Iapmo);
    }

    #[test]
    fn test_standard_parsing() {
        assert_eq!(DiversityStandard::from_str_flexible("ASHRAE").unwrap(), DiversityStandard::Ashrae);
        assert_eq!(DiversityStandard::from_str_flexible("utility").unwrap(), DiversityStandard::Default);
        assert!(DiversityStandard::from_str_flexible("nfpa").is_err());
    }

    #[test]
    fn test_catalog_markdown() {
        let md = generate_catalog_markdown();
        assert!(md.contains("## Heating"));
        assert!(md.contains("| Rooftop Unit (RTU) | 90% | 95% | 85% |"));
        assert!(md.contains("| Custom | Year-Round | - | - | - |"));
        assert!(!md.contains("## Custom"));
    }
}
