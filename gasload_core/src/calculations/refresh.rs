//! # Standard Switch
//!
//! When the active diversity standard changes, every entry's diversity factor
//! is re-derived from the reference data:
//!
//! - catalog entries from their equipment's value for the new standard,
//! - Custom entries from their `diversity_source` category's default.
//!
//! Entries with no resolvable equipment or source keep their current value.
//! Ratings, units and categories are never touched.

use serde::{Deserialize, Serialize};

use crate::appliance::ApplianceEntry;
use crate::reference::DiversityStandard;

/// Outcome of a refresh pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub standard: DiversityStandard,
    /// Ids of entries whose diversity was re-derived
    pub updated: Vec<String>,
    /// Ids of entries left unchanged (nothing to look up)
    pub unchanged: Vec<String>,
}

/// Refresh every entry's diversity factor for `standard`.
pub fn refresh_diversity(appliances: &mut [ApplianceEntry], standard: DiversityStandard) -> RefreshSummary {
    let mut summary = RefreshSummary {
        standard,
        ..RefreshSummary::default()
    };

    for entry in appliances.iter_mut() {
        if entry.refresh_diversity(standard) {
            summary.updated.push(entry.id.clone());
        } else {
            summary.unchanged.push(entry.id.clone());
        }
    }

    log::debug!(
        "refreshed diversity for {}: {} updated, {} unchanged",
        standard.key(),
        summary.updated.len(),
        summary.unchanged.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Category;
    use crate::units::EnergyUnit;

    fn appliances() -> Vec<ApplianceEntry> {
        vec![
            ApplianceEntry::from_catalog(
                Category::Heating,
                "Radiant Tube Heater",
                80_000.0,
                EnergyUnit::BtuPerHour,
                DiversityStandard::Default,
            )
            .unwrap()
            .with_id("a-1"),
            ApplianceEntry::from_catalog(
                Category::Cooking,
                "Range/Oven",
                65.0,
                EnergyUnit::Cfh,
                DiversityStandard::Default,
            )
            .unwrap()
            .with_id("a-2"),
            ApplianceEntry::custom(
                "Kiln",
                120_000.0,
                EnergyUnit::BtuPerHour,
                Some(Category::HotWater),
                DiversityStandard::Default,
            )
            .with_id("a-3"),
            ApplianceEntry::custom("Forge", 90_000.0, EnergyUnit::BtuPerHour, None, DiversityStandard::Default)
                .with_diversity(55.0)
                .with_id("a-4"),
            ApplianceEntry::new("Sauna", "Stove", 30_000.0, EnergyUnit::BtuPerHour, 12.0).with_id("a-5"),
        ]
    }

    #[test]
    fn test_switch_to_ashrae() {
        let mut list = appliances();
        let summary = refresh_diversity(&mut list, DiversityStandard::Ashrae);

        assert_eq!(list[0].diversity, 95.0);
        assert_eq!(list[1].diversity, 20.0);
        assert_eq!(list[2].diversity, 50.0);
        assert_eq!(list[3].diversity, 55.0);
        assert_eq!(list[4].diversity, 12.0);

        assert_eq!(summary.standard, DiversityStandard::Ashrae);
        assert_eq!(summary.updated, vec!["a-1", "a-2", "a-3"]);
        assert_eq!(summary.unchanged, vec!["a-4", "a-5"]);
    }

    #[test]
    fn test_only_diversity_changes() {
        let before = appliances();
        let mut after = before.clone();
        refresh_diversity(&mut after, DiversityStandard::Iapmo);

        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.category, new.category);
            assert_eq!(old.equipment, new.equipment);
            assert_eq!(old.rating, new.rating);
            assert_eq!(old.units, new.units);
            assert_eq!(old.diversity_source, new.diversity_source);
        }
        assert_eq!(after[0].diversity, 85.0);
        assert_eq!(after[1].diversity, 10.0);
        assert_eq!(after[2].diversity, 30.0);
    }

    #[test]
    fn test_user_override_is_replaced() {
        let mut list = vec![appliances().remove(0).with_diversity(10.0)];
        refresh_diversity(&mut list, DiversityStandard::Default);
        assert_eq!(list[0].diversity, 90.0);
    }

    #[test]
    fn test_empty_list() {
        let summary = refresh_diversity(&mut [], DiversityStandard::Iapmo);
        assert!(summary.updated.is_empty());
        assert!(summary.unchanged.is_empty());
    }
}
