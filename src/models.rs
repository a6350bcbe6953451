//! Data models for pizza options and comparison results

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// One of the pizza sizes being compared.
///
/// Variant order is the enumeration order used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PizzaSize {
    Large,
    Medium,
    Small,
}

impl PizzaSize {
    pub const ALL: [PizzaSize; 3] = [PizzaSize::Large, PizzaSize::Medium, PizzaSize::Small];

    pub fn as_str(self) -> &'static str {
        match self {
            PizzaSize::Large => "large",
            PizzaSize::Medium => "medium",
            PizzaSize::Small => "small",
        }
    }

    /// Heading used for the option on the form and in the results
    pub fn heading(self) -> &'static str {
        match self {
            PizzaSize::Large => "Large Pizza",
            PizzaSize::Medium => "Medium Pizzas",
            PizzaSize::Small => "Small Pizzas",
        }
    }
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pizza size '{0}' (expected large, medium or small)")]
pub struct ParseSizeError(pub String);

impl FromStr for PizzaSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(PizzaSize::Large),
            "medium" => Ok(PizzaSize::Medium),
            "small" => Ok(PizzaSize::Small),
            _ => Err(ParseSizeError(s.to_string())),
        }
    }
}

/// Typed input for one option, after coercion at the form boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionInput {
    pub size: PizzaSize,
    pub diameter: Option<f64>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl OptionInput {
    /// An option with every field blank
    pub fn blank(size: PizzaSize) -> Self {
        Self {
            size,
            diameter: None,
            price: None,
            quantity: None,
        }
    }

    pub fn new(size: PizzaSize, diameter: f64, price: Option<f64>, quantity: u32) -> Self {
        Self {
            size,
            diameter: Some(diameter),
            price,
            quantity: Some(quantity),
        }
    }
}

/// An option that took part in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredOption {
    pub size: PizzaSize,
    pub quantity: u32,
    pub value: f64,
}

/// Whether the value metric includes price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    Price,
    Size,
}

impl ComparisonMode {
    pub fn description(self) -> &'static str {
        match self {
            ComparisonMode::Price => "Price and Size",
            ComparisonMode::Size => "Size only",
        }
    }
}

/// Outcome of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub per_option_value: BTreeMap<PizzaSize, f64>,
    pub comparison_mode: ComparisonMode,
    pub best_option_label: String,
    pub best: ScoredOption,
}

impl ComparisonResult {
    /// Value for a size, 0 when it did not take part
    pub fn value_of(&self, size: PizzaSize) -> f64 {
        self.per_option_value.get(&size).copied().unwrap_or(0.0)
    }
}
