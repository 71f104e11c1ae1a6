//! sl-fluids: fluid and air property models for solarloop.
//!
//! Provides:
//! - A fixed catalog of heat-transfer fluids (water and common glycol/oil loops)
//! - Temperature-dependent air properties for the collector's boundary layer
//!
//! Both are pure and process-wide: the catalog is a `'static` table, the air
//! model is a set of stateless functions of film temperature and altitude.
//!
//! # Example
//!
//! ```
//! use sl_fluids::{FluidId, air, lookup};
//!
//! let water = lookup(FluidId::Water);
//! assert!(water.density_kg_m3 > 990.0);
//!
//! let props = air::properties(300.0, 0.0);
//! assert!(props.prandtl > 0.6 && props.prandtl < 0.8);
//! ```

pub mod air;
pub mod catalog;
pub mod error;

// Re-exports for ergonomics
pub use air::AirProperties;
pub use catalog::{
    FluidCatalogEntry, FluidId, FluidProperties, catalog, filter_catalog, lookup,
};
pub use error::{FluidError, FluidResult};
