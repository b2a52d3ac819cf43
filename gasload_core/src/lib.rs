//! # gasload_core - Residential Gas Load Diversity Engine
//!
//! `gasload_core` estimates the peak natural-gas demand of a residence from
//! its appliance list, for sizing utility-owned service lines, meters and
//! regulators. Each appliance's maximum input rating is scaled by a diversity
//! factor, the diversified loads are summed per season, and the design load
//! is the worse of the winter and summer peaks.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the caller owns the [`Project`]; calculations are pure functions
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Fail-Soft Input**: malformed numbers coerce to zero instead of erroring
//! - **Rich Errors**: structured error types for explicit lookups and file I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use gasload_core::appliance::ApplianceEntry;
//! use gasload_core::project::Project;
//! use gasload_core::units::{format_with_unit, EnergyUnit};
//!
//! let mut project = Project::new().with_info("projectName", "Birch Rd");
//! project.add_appliance(ApplianceEntry::new("Heating", "Furnace", 100_000.0, EnergyUnit::BtuPerHour, 75.0));
//! project.add_appliance(ApplianceEntry::new("Hot Water", "Tank", 40_000.0, EnergyUnit::BtuPerHour, 35.0));
//!
//! let result = project.recompute();
//! assert_eq!(result.connected_btu.value(), 140_000.0);
//! assert_eq!(result.governing_season(), "Winter");
//! assert_eq!(format_with_unit(result.design_btu().value(), EnergyUnit::BtuPerHour), "89,000 BTU/hr");
//! ```
//!
//! ## Modules
//!
//! - [`reference`] - Categories, equipment catalog and diversity standards
//! - [`units`] - Energy units, conversions and display formatting
//! - [`appliance`] - Appliance entries
//! - [`calculations`] - Aggregation, seasonal breakdown and standard refresh
//! - [`project`] - Project container and settings
//! - [`file_io`] - JSON project files with atomic saves
//! - [`pdf`] - Typst-rendered load report
//! - [`errors`] - Structured error types

pub mod appliance;
pub mod calculations;
pub mod errors;
pub mod file_io;
mod lenient;
pub mod pdf;
pub mod project;
pub mod reference;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use appliance::ApplianceEntry;
pub use calculations::{aggregate, LoadResult, SeasonalBreakdown};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::Project;
pub use reference::{Category, DiversityStandard, SeasonalClass};
pub use units::EnergyUnit;
