use crate::error::{FluidError, FluidResult};
use std::fmt;
use std::str::FromStr;

/// Temperature at which catalog densities are tabulated (20 °C).
pub const PROPERTY_REFERENCE_K: f64 = 293.15;

/// Heat-transfer fluids the loop can be filled with.
///
/// Discriminants index into the catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidId {
    Water = 0,
    PropyleneGlycol40 = 1,
    EthyleneGlycol50 = 2,
    ThermalOil = 3,
}

impl FluidId {
    pub const ALL: [FluidId; 4] = [
        FluidId::Water,
        FluidId::PropyleneGlycol40,
        FluidId::EthyleneGlycol50,
        FluidId::ThermalOil,
    ];

    pub fn entry(self) -> &'static FluidCatalogEntry {
        &CATALOG[self as usize]
    }

    pub fn canonical_id(self) -> &'static str {
        self.entry().canonical_id
    }
}

impl fmt::Display for FluidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

impl FromStr for FluidId {
    type Err = FluidError;

    /// Exact (case-insensitive) match on canonical id or alias.
    fn from_str(s: &str) -> FluidResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        catalog()
            .iter()
            .find(|entry| {
                entry.canonical_id.eq_ignore_ascii_case(&key)
                    || entry.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(&key))
            })
            .map(|entry| entry.id)
            .ok_or(FluidError::UnknownFluid {
                query: s.to_string(),
            })
    }
}

/// Bulk properties of a heat-transfer fluid at [`PROPERTY_REFERENCE_K`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    /// Density (kg/m³)
    pub density_kg_m3: f64,
    /// Specific heat (J/(kg·K))
    pub specific_heat_j_kg_k: f64,
    /// Dynamic viscosity (Pa·s)
    pub viscosity_pa_s: f64,
    /// Thermal conductivity (W/(m·K))
    pub conductivity_w_m_k: f64,
    /// Volumetric thermal expansion coefficient (1/K)
    pub expansion_per_k: f64,
    /// Freezing point (K). Informational only.
    pub freezing_k: f64,
    /// Boiling point at 1 atm (K). Informational only.
    pub boiling_k: f64,
}

impl FluidProperties {
    /// Density at temperature, linearised about the reference point.
    ///
    /// Drives the thermosiphon head; the energy balance keeps using the
    /// tabulated density.
    pub fn density_at(&self, t_k: f64) -> f64 {
        self.density_kg_m3 * (1.0 - self.expansion_per_k * (t_k - PROPERTY_REFERENCE_K))
    }

    pub fn is_liquid_at(&self, t_k: f64) -> bool {
        t_k > self.freezing_k && t_k < self.boiling_k
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidCatalogEntry {
    pub id: FluidId,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub properties: FluidProperties,
}

impl FluidCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    /// Fails when `t_k` is outside the liquid range of this fluid.
    pub fn check_liquid(&self, t_k: f64) -> FluidResult<()> {
        if self.properties.is_liquid_at(t_k) {
            Ok(())
        } else {
            Err(FluidError::OutsideLiquidRange {
                fluid: self.display_name,
                temperature_k: t_k,
            })
        }
    }
}

static CATALOG: [FluidCatalogEntry; 4] = [
    FluidCatalogEntry {
        id: FluidId::Water,
        canonical_id: "water",
        display_name: "Water",
        aliases: &["h2o"],
        properties: FluidProperties {
            density_kg_m3: 998.0,
            specific_heat_j_kg_k: 4186.0,
            viscosity_pa_s: 1.0e-3,
            conductivity_w_m_k: 0.598,
            expansion_per_k: 2.1e-4,
            freezing_k: 273.15,
            boiling_k: 373.15,
        },
    },
    FluidCatalogEntry {
        id: FluidId::PropyleneGlycol40,
        canonical_id: "propylene_glycol_40",
        display_name: "Propylene Glycol 40%",
        aliases: &["propylene glycol", "glycol", "pg40"],
        properties: FluidProperties {
            density_kg_m3: 1035.0,
            specific_heat_j_kg_k: 3750.0,
            viscosity_pa_s: 4.8e-3,
            conductivity_w_m_k: 0.42,
            expansion_per_k: 5.7e-4,
            freezing_k: 251.15,
            boiling_k: 376.15,
        },
    },
    FluidCatalogEntry {
        id: FluidId::EthyleneGlycol50,
        canonical_id: "ethylene_glycol_50",
        display_name: "Ethylene Glycol 50%",
        aliases: &["ethylene glycol", "antifreeze", "eg50"],
        properties: FluidProperties {
            density_kg_m3: 1070.0,
            specific_heat_j_kg_k: 3300.0,
            viscosity_pa_s: 3.8e-3,
            conductivity_w_m_k: 0.40,
            expansion_per_k: 5.5e-4,
            freezing_k: 236.15,
            boiling_k: 380.15,
        },
    },
    FluidCatalogEntry {
        id: FluidId::ThermalOil,
        canonical_id: "thermal_oil",
        display_name: "Thermal Oil",
        aliases: &["oil", "mineral oil"],
        properties: FluidProperties {
            density_kg_m3: 870.0,
            specific_heat_j_kg_k: 2000.0,
            viscosity_pa_s: 3.0e-2,
            conductivity_w_m_k: 0.13,
            expansion_per_k: 7.0e-4,
            freezing_k: 263.15,
            boiling_k: 573.15,
        },
    },
];

pub fn catalog() -> &'static [FluidCatalogEntry] {
    &CATALOG
}

/// Property lookup. Total over [`FluidId`].
pub fn lookup(id: FluidId) -> &'static FluidProperties {
    &id.entry().properties
}

pub fn filter_catalog(query: &str) -> Vec<FluidCatalogEntry> {
    catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}
