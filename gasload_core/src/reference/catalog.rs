//! Equipment catalog
//!
//! Diversity factors per standard for every listed appliance type, grouped by
//! category. Values are percentages of the appliance's maximum input rating.

use super::{DiversityByStandard, Equipment};

const fn eq(name: &'static str, default: f64, ashrae: f64, iapmo: f64) -> Equipment {
    Equipment {
        name,
        diversity: DiversityByStandard::new(default, ashrae, iapmo),
    }
}

pub(super) const HEATING: &[Equipment] = &[
    eq("Forced Air Furnace (<225k BTU/hr)", 75.0, 90.0, 70.0),
    eq("Forced Air Furnace (>225k BTU/hr)", 70.0, 85.0, 65.0),
    eq("Hydronic Boiler (<300k BTU/hr)", 75.0, 90.0, 70.0),
    eq("Hydronic Boiler (>300k BTU/hr)", 70.0, 85.0, 65.0),
    eq("Combination Boiler (Combi)", 80.0, 85.0, 75.0),
    eq("Unit Heater (e.g., Garage)", 75.0, 80.0, 70.0),
    eq("Direct-Vent Wall Furnace", 75.0, 85.0, 70.0),
    eq("Radiant Tube Heater", 90.0, 95.0, 85.0),
    eq("Rooftop Unit (RTU)", 90.0, 95.0, 85.0),
    eq("Makeup Air Unit (MUA)", 100.0, 100.0, 100.0),
    eq("Driveway Boiler", 100.0, 100.0, 100.0),
];

pub(super) const HOT_WATER: &[Equipment] = &[
    eq("Tank Water Heater (<50 gal)", 35.0, 50.0, 30.0),
    eq("Tank Water Heater (50-100 gal)", 30.0, 45.0, 25.0),
    eq("Tank Water Heater (>100 gal)", 25.0, 40.0, 20.0),
    eq("Power-Vent Water Heater", 35.0, 50.0, 30.0),
    eq("On-Demand Water Heater", 25.0, 30.0, 20.0),
    eq("Indirect Water Heater (from Boiler)", 20.0, 30.0, 15.0),
    eq("Booster Heater", 20.0, 25.0, 15.0),
];

pub(super) const COOKING: &[Equipment] = &[
    eq("Range/Oven", 15.0, 20.0, 10.0),
    eq("Cooktop", 10.0, 15.0, 8.0),
    eq("Double Wall Oven", 15.0, 20.0, 10.0),
    eq("Commercial-Style Range", 20.0, 25.0, 15.0),
    eq("Grill (Built-in)", 5.0, 10.0, 3.0),
    eq("Outdoor Kitchen (Grill + Burners)", 8.0, 12.0, 5.0),
    eq("Deep Fryer", 10.0, 15.0, 8.0),
];

pub(super) const CLOTHES_DRYERS: &[Equipment] = &[
    eq("Standard Dryer", 25.0, 30.0, 20.0),
    eq("High-Capacity Dryer", 25.0, 30.0, 20.0),
    eq("Gas Dryer/Steamer Combo", 25.0, 30.0, 20.0),
];

pub(super) const FIREPLACES_STOVES: &[Equipment] = &[
    eq("Gas Fireplace Insert", 20.0, 25.0, 15.0),
    eq("Direct-Vent Fireplace", 20.0, 25.0, 15.0),
    eq("Gas Stove", 20.0, 25.0, 15.0),
    eq("Gas Log Set", 15.0, 20.0, 10.0),
    eq("Outdoor Fire Pit", 10.0, 15.0, 5.0),
    eq("Patio Heater", 50.0, 60.0, 40.0),
];

pub(super) const POOL_SPA_HEATERS: &[Equipment] = &[
    eq("Pool Heater", 100.0, 100.0, 100.0),
    eq("Spa Heater", 100.0, 100.0, 100.0),
    eq("Combined Pool/Spa Heater", 100.0, 100.0, 100.0),
];

pub(super) const HOME_GENERATORS: &[Equipment] = &[
    eq("Air-cooled (7-22kW)", 100.0, 100.0, 100.0),
    eq("Liquid-cooled (>22kW)", 100.0, 100.0, 100.0),
];

pub(super) const OTHER_APPLIANCES: &[Equipment] = &[
    eq("Gas Lighting (e.g., Lanterns)", 40.0, 50.0, 30.0),
    eq("Incinerator", 5.0, 10.0, 3.0),
    eq("Gas Refrigerator", 50.0, 60.0, 40.0),
];

// Category defaults, applied to Custom entries that borrow a category's factors.
pub(super) const HEATING_DEFAULT: DiversityByStandard = DiversityByStandard::new(75.0, 90.0, 70.0);
pub(super) const HOT_WATER_DEFAULT: DiversityByStandard = DiversityByStandard::new(35.0, 50.0, 30.0);
pub(super) const COOKING_DEFAULT: DiversityByStandard = DiversityByStandard::new(15.0, 20.0, 10.0);
pub(super) const CLOTHES_DRYERS_DEFAULT: DiversityByStandard = DiversityByStandard::new(25.0, 30.0, 20.0);
pub(super) const FIREPLACES_STOVES_DEFAULT: DiversityByStandard = DiversityByStandard::new(20.0, 25.0, 15.0);
pub(super) const POOL_SPA_HEATERS_DEFAULT: DiversityByStandard = DiversityByStandard::new(100.0, 100.0, 100.0);
pub(super) const HOME_GENERATORS_DEFAULT: DiversityByStandard = DiversityByStandard::new(100.0, 100.0, 100.0);
pub(super) const OTHER_APPLIANCES_DEFAULT: DiversityByStandard = DiversityByStandard::new(50.0, 60.0, 40.0);
