//! Unit Registry
//!
//! Static unit tables for every conversion category. Scalar categories map
//! each unit to a factor into the category's base unit; temperature scales
//! are affine and carry their own formulas instead.

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversion categories, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Temperature,
    Length,
    Weight,
    Currency,
    #[serde(rename = "Data Storage")]
    DataStorage,
    Time,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Temperature,
        Category::Length,
        Category::Weight,
        Category::Currency,
        Category::DataStorage,
        Category::Time,
    ];

    /// Name used in history files and on screen
    pub fn name(self) -> &'static str {
        match self {
            Category::Temperature => "Temperature",
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Currency => "Currency",
            Category::DataStorage => "Data Storage",
            Category::Time => "Time",
        }
    }

    /// Decimal places used when showing a conversion result
    pub fn display_precision(self) -> usize {
        match self {
            Category::Temperature | Category::Currency => 2,
            _ => 6,
        }
    }

    /// Symbol of the unit every conversion in this category pivots through
    pub fn base_symbol(self) -> &'static str {
        match self {
            Category::Temperature => "C",
            Category::Length => "m",
            Category::Weight => "g",
            Category::Currency => "USD",
            Category::DataStorage => "B",
            Category::Time => "sec",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "temperature" | "temp" => Ok(Category::Temperature),
            "length" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "currency" => Ok(Category::Currency),
            "data storage" | "data" | "storage" => Ok(Category::DataStorage),
            "time" => Ok(Category::Time),
            _ => Err(ConversionError::UnknownCategory(s.to_string())),
        }
    }
}

/// A unit that converts to its category base by a constant factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    pub display_name: &'static str,
    pub symbol: &'static str,
    /// How many base units one of this unit is worth
    pub factor_to_base: f64,
}

const fn unit(display_name: &'static str, symbol: &'static str, factor_to_base: f64) -> UnitDefinition {
    UnitDefinition {
        display_name,
        symbol,
        factor_to_base,
    }
}

// Length (base: meters)
static LENGTH_UNITS: [UnitDefinition; 8] = [
    unit("Millimeters", "mm", 0.001),
    unit("Centimeters", "cm", 0.01),
    unit("Meters", "m", 1.0),
    unit("Kilometers", "km", 1000.0),
    unit("Inches", "in", 0.0254),
    unit("Feet", "ft", 0.3048),
    unit("Yards", "yd", 0.9144),
    unit("Miles", "mi", 1609.34),
];

// Weight (base: grams)
static WEIGHT_UNITS: [UnitDefinition; 6] = [
    unit("Milligrams", "mg", 0.001),
    unit("Grams", "g", 1.0),
    unit("Kilograms", "kg", 1000.0),
    unit("Ounces", "oz", 28.3495),
    unit("Pounds", "lb", 453.592),
    unit("Metric Tons", "t", 1_000_000.0),
];

// Currency (base: USD). Fixed demo rates quoted per US dollar.
static CURRENCY_UNITS: [UnitDefinition; 7] = [
    unit("US Dollar", "USD", 1.0),
    unit("Euro", "EUR", 1.0 / 0.92),
    unit("British Pound", "GBP", 1.0 / 0.79),
    unit("Japanese Yen", "JPY", 1.0 / 150.0),
    unit("Indian Rupee", "INR", 1.0 / 83.0),
    unit("Australian Dollar", "AUD", 1.0 / 1.52),
    unit("Canadian Dollar", "CAD", 1.0 / 1.35),
];

// Data storage (base: bytes, binary multiples)
static DATA_UNITS: [UnitDefinition; 6] = [
    unit("Bytes", "B", 1.0),
    unit("Kilobytes", "KB", 1024.0),
    unit("Megabytes", "MB", 1_048_576.0),
    unit("Gigabytes", "GB", 1_073_741_824.0),
    unit("Terabytes", "TB", 1_099_511_627_776.0),
    unit("Petabytes", "PB", 1_125_899_906_842_624.0),
];

// Time (base: seconds)
static TIME_UNITS: [UnitDefinition; 7] = [
    unit("Seconds", "sec", 1.0),
    unit("Minutes", "min", 60.0),
    unit("Hours", "hr", 3_600.0),
    unit("Days", "day", 86_400.0),
    unit("Weeks", "wk", 604_800.0),
    unit("Months (30 days)", "mo", 2_592_000.0),
    unit("Years (365 days)", "yr", 31_536_000.0),
];

/// Temperature scales. Conversions pivot through Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 3] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "Celsius",
            TemperatureScale::Fahrenheit => "Fahrenheit",
            TemperatureScale::Kelvin => "Kelvin",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "C",
            TemperatureScale::Fahrenheit => "F",
            TemperatureScale::Kelvin => "K",
        }
    }

    /// Resolve a symbol or scale name, ignoring case
    pub fn parse(key: &str) -> Result<Self, ConversionError> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|scale| {
                scale.symbol().eq_ignore_ascii_case(key)
                    || scale.display_name().eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| ConversionError::UnknownUnit {
                category: Category::Temperature,
                unit: key.to_string(),
            })
    }

    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
        }
    }
}

/// Lookup over the static unit tables
pub struct UnitTable;

impl UnitTable {
    /// Scalar units of a category in menu order. Empty for temperature.
    pub fn units(category: Category) -> &'static [UnitDefinition] {
        match category {
            Category::Temperature => &[],
            Category::Length => &LENGTH_UNITS,
            Category::Weight => &WEIGHT_UNITS,
            Category::Currency => &CURRENCY_UNITS,
            Category::DataStorage => &DATA_UNITS,
            Category::Time => &TIME_UNITS,
        }
    }

    /// (display name, symbol) pairs in menu order, temperature included
    pub fn entries(category: Category) -> Vec<(&'static str, &'static str)> {
        match category {
            Category::Temperature => TemperatureScale::ALL
                .iter()
                .map(|scale| (scale.display_name(), scale.symbol()))
                .collect(),
            _ => Self::units(category)
                .iter()
                .map(|unit| (unit.display_name, unit.symbol))
                .collect(),
        }
    }

    pub fn symbols(category: Category) -> Vec<&'static str> {
        Self::entries(category)
            .into_iter()
            .map(|(_, symbol)| symbol)
            .collect()
    }

    /// Find a scalar unit by symbol or display name, ignoring case
    pub fn lookup(category: Category, key: &str) -> Result<&'static UnitDefinition, ConversionError> {
        let key = key.trim();
        Self::units(category)
            .iter()
            .find(|unit| {
                unit.symbol.eq_ignore_ascii_case(key) || unit.display_name.eq_ignore_ascii_case(key)
            })
            .ok_or_else(|| ConversionError::UnknownUnit {
                category,
                unit: key.to_string(),
            })
    }

    /// Factor converting one `key` into the category base unit
    pub fn factor(category: Category, key: &str) -> Result<f64, ConversionError> {
        Self::lookup(category, key).map(|unit| unit.factor_to_base)
    }
}
