//! Unit-tagged quantity strings.
//!
//! Scenario files store user-facing values as text such as `"70 F"`,
//! `"1 L/min"` or `"80%"`. Parsing converts them to SI. A bare number is
//! read in the quantity's default unit, listed on [`Quantity`].

use sl_core::units::constants::T_ZERO_C_K;
use thiserror::Error;

/// Dimension of a quantity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: K; bare: K)
    Temperature,
    /// Solar irradiance (canonical: W/m²; bare: W/m²)
    Irradiance,
    /// Volumetric flow (canonical: m³/s; bare: L/min)
    VolumeRate,
    /// Volume (canonical: m³; bare: L)
    Volume,
    /// Area (canonical: m²; bare: m²)
    Area,
    /// Length (canonical: m; bare: m)
    Length,
    /// Plain fraction, `%` allowed
    Dimensionless,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Temperature => "Temperature",
            Self::Irradiance => "Irradiance",
            Self::VolumeRate => "Volume Flow",
            Self::Volume => "Volume",
            Self::Area => "Area",
            Self::Length => "Length",
            Self::Dimensionless => "Dimensionless",
        };
        write!(f, "{name}")
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

const LITER_M3: f64 = 1e-3;
const US_GALLON_M3: f64 = 3.785_411_784e-3;
const FOOT_M: f64 = 0.3048;

/// Parse `raw_text` as `quantity`, returning the SI value.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();
    let value = match quantity {
        Quantity::Temperature => parse_temperature(trimmed)?,
        Quantity::Dimensionless => parse_dimensionless(trimmed)?,
        _ => {
            let (value, unit) = split_value_and_unit(trimmed)?;
            value * scale_for(&unit, quantity)?
        }
    };
    if !value.is_finite() {
        return Err(UnitError::OutOfRange {
            value,
            reason: "must be finite".to_string(),
        });
    }
    Ok(value)
}

/// Multiplier from `unit` to SI for the linear quantities.
fn scale_for(unit: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let unit_lc = unit.to_lowercase();
    let scale = match (quantity, unit_lc.as_str()) {
        (Quantity::Irradiance, "" | "w/m2" | "w/m²" | "w/m^2") => 1.0,
        (Quantity::Irradiance, "kw/m2" | "kw/m²" | "kw/m^2") => 1000.0,

        (Quantity::VolumeRate, "" | "l/min" | "lpm") => LITER_M3 / 60.0,
        (Quantity::VolumeRate, "l/s") => LITER_M3,
        (Quantity::VolumeRate, "m3/s" | "m³/s" | "m^3/s") => 1.0,
        (Quantity::VolumeRate, "m3/h" | "m³/h" | "m^3/h") => 1.0 / 3600.0,
        (Quantity::VolumeRate, "gpm" | "gal/min") => US_GALLON_M3 / 60.0,

        (Quantity::Volume, "" | "l" | "liter" | "liters" | "litre" | "litres") => LITER_M3,
        (Quantity::Volume, "m3" | "m³" | "m^3") => 1.0,
        (Quantity::Volume, "gal" | "gallon" | "gallons") => US_GALLON_M3,

        (Quantity::Area, "" | "m2" | "m²" | "m^2") => 1.0,
        (Quantity::Area, "ft2" | "ft²" | "ft^2") => FOOT_M * FOOT_M,

        (Quantity::Length, "" | "m") => 1.0,
        (Quantity::Length, "cm") => 0.01,
        (Quantity::Length, "km") => 1000.0,
        (Quantity::Length, "ft" | "feet") => FOOT_M,

        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity,
            });
        }
    };
    Ok(scale)
}

/// Parse temperature in various units, return Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "celsius" => value + T_ZERO_C_K,
        "f" | "°f" | "fahrenheit" => (value - 32.0) * 5.0 / 9.0 + T_ZERO_C_K,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "Absolute temperature must be > 0 K".to_string(),
        });
    }

    Ok(kelvin)
}

/// Parse dimensionless, accepting plain numbers or percent.
fn parse_dimensionless(input: &str) -> Result<f64, UnitError> {
    let parse_err =
        || UnitError::ParseError(format!("Could not parse dimensionless value from '{input}'"));
    match input.strip_suffix('%') {
        Some(num) => Ok(num.trim().parse::<f64>().map_err(|_| parse_err())? / 100.0),
        None => input.parse().map_err(|_| parse_err()),
    }
}

/// Split text into value and unit parts.
///
/// - "70F" -> (70.0, "F")
/// - "1 L/min" -> (1.0, "L/min")
/// - "-2.5" -> (-2.5, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{input}'"))
    })?;

    Ok((value, unit_part.trim().to_string()))
}
