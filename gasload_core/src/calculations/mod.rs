//! # Load Calculations
//!
//! Pure functions over a list of appliance entries:
//!
//! - [`aggregate`] - connected load, winter and summer peaks, design load
//! - [`aggregate_flat`] - the single-total variant without a seasonal split
//! - [`seasonal_breakdown`] - per-appliance lines grouped by season, with subtotals
//! - [`refresh_diversity`] - re-derive diversity factors after a standard switch
//!
//! None of these perform I/O. Inputs are borrowed; results are plain
//! JSON-serializable values.

pub mod aggregate;
pub mod breakdown;
pub mod refresh;

pub use aggregate::{aggregate, aggregate_flat, ConvertedTotals, FlatLoadResult, LoadResult};
pub use breakdown::{appliance_lines, seasonal_breakdown, LoadLine, SeasonalBreakdown};
pub use refresh::{refresh_diversity, RefreshSummary};
