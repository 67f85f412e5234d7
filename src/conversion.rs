//! Conversion Engine
//!
//! Resolves units through the unit tables and converts values by pivoting
//! through the category base unit. Temperature uses affine formulas
//! through Celsius.

use crate::error::ConversionError;
use crate::history::ConversionRecord;
use crate::units::{Category, TemperatureScale, UnitTable};

/// Stateless converter. The only knob is whether a temperature conversion
/// may use the same scale on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    distinct_temperature_units: bool,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject temperature conversions whose source and target scale match
    pub fn with_distinct_temperature_units(mut self, enabled: bool) -> Self {
        self.distinct_temperature_units = enabled;
        self
    }

    /// Convert `value` from one unit to another within `category`.
    ///
    /// Identical units return `value` untouched in every category.
    pub fn convert(
        &self,
        category: Category,
        from: &str,
        to: &str,
        value: f64,
    ) -> Result<f64, ConversionError> {
        match category {
            Category::Temperature => {
                let from_scale = TemperatureScale::parse(from).map_err(invalid_selection)?;
                let to_scale = TemperatureScale::parse(to).map_err(invalid_selection)?;

                if from_scale == to_scale {
                    if self.distinct_temperature_units {
                        return Err(ConversionError::InvalidUnitSelection {
                            category,
                            reason: "target scale must differ from source scale".to_string(),
                        });
                    }
                    return Ok(value);
                }

                finite(
                    category,
                    to_scale.symbol(),
                    value,
                    to_scale.from_celsius(from_scale.to_celsius(value)),
                )
            }
            _ => {
                let from_unit = UnitTable::lookup(category, from).map_err(invalid_selection)?;
                let to_unit = UnitTable::lookup(category, to).map_err(invalid_selection)?;

                if from_unit.symbol == to_unit.symbol {
                    return Ok(value);
                }

                finite(
                    category,
                    to_unit.symbol,
                    value,
                    value * from_unit.factor_to_base / to_unit.factor_to_base,
                )
            }
        }
    }

    /// Convert and stamp a history record with the current local time
    pub fn record(
        &self,
        category: Category,
        from: &str,
        to: &str,
        value: f64,
    ) -> Result<ConversionRecord, ConversionError> {
        let result = self.convert(category, from, to, value)?;
        Ok(ConversionRecord::now(
            category,
            canonical_symbol(category, from)?,
            canonical_symbol(category, to)?,
            value,
            result,
        ))
    }
}

/// Parse user input into a finite number
pub fn parse_value(text: &str) -> Result<f64, ConversionError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::InvalidNumericInput(trimmed.to_string())),
    }
}

/// Overflowing results cannot be stored in the JSON history
fn finite(category: Category, unit: &str, value: f64, result: f64) -> Result<f64, ConversionError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ConversionError::ResultOutOfRange {
            category,
            unit: unit.to_string(),
            value,
        })
    }
}

fn canonical_symbol(category: Category, key: &str) -> Result<&'static str, ConversionError> {
    match category {
        Category::Temperature => TemperatureScale::parse(key).map(TemperatureScale::symbol),
        _ => UnitTable::lookup(category, key).map(|unit| unit.symbol),
    }
    .map_err(invalid_selection)
}

fn invalid_selection(err: ConversionError) -> ConversionError {
    match err {
        ConversionError::UnknownUnit { category, unit } => ConversionError::InvalidUnitSelection {
            category,
            reason: format!("'{}' is not a {} unit", unit, category.name().to_lowercase()),
        },
        other => other,
    }
}
