//! Application configuration
//!
//! Unit labels and the values the form is pre-filled with. Loaded with the
//! `config` crate from built-in defaults, an optional file, and environment
//! variables prefixed `PIZZA_VALUE` (nested keys separated by `__`, e.g.
//! `PIZZA_VALUE__UNITS__LENGTH=cm`).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::calculator::ResultsView;
use crate::models::{ComparisonMode, ComparisonResult, PizzaSize};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Unit label '{0}' cannot be empty")]
    EmptyUnit(&'static str),

    #[error("Default {field} for {size} must be positive, got {actual}")]
    NonPositiveDefault {
        size: PizzaSize,
        field: &'static str,
        actual: f64,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub units: UnitsConfig,

    #[serde(default)]
    pub defaults: FormDefaults,
}

/// Labels for the linear and currency units of the inputs
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsConfig {
    #[serde(default = "default_length")]
    pub length: String,

    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Values each option's fields start with
#[derive(Debug, Clone, Deserialize)]
pub struct FormDefaults {
    #[serde(default = "default_large")]
    pub large: OptionDefaults,

    #[serde(default = "default_medium")]
    pub medium: OptionDefaults,

    #[serde(default = "default_small")]
    pub small: OptionDefaults,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OptionDefaults {
    pub diameter: Option<f64>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl AppConfig {
    /// Load configuration from `.env`, an optional file and the environment
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("PIZZA_VALUE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    /// Seed per-field form defaults so a source can override single fields
    fn from_builder(
        mut builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let defaults = FormDefaults::default();
        for size in PizzaSize::ALL {
            let option = defaults.for_size(size);
            let key = |field: &str| format!("defaults.{}.{}", size, field);
            if let Some(diameter) = option.diameter {
                builder = builder.set_default(key("diameter"), diameter)?;
            }
            if let Some(price) = option.price {
                builder = builder.set_default(key("price"), price)?;
            }
            if let Some(quantity) = option.quantity {
                builder = builder.set_default(key("quantity"), i64::from(quantity))?;
            }
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.units.validate()?;
        for size in PizzaSize::ALL {
            self.defaults.for_size(size).validate(size)?;
        }
        Ok(())
    }

    /// Text view of a result using the configured units
    pub fn view<'a>(&'a self, result: &'a ComparisonResult) -> ResultsView<'a> {
        ResultsView::new(result, &self.units)
    }
}

impl UnitsConfig {
    /// Unit label for values computed in the given mode
    pub fn value_label(&self, mode: ComparisonMode) -> String {
        match mode {
            ComparisonMode::Price => format!("sq {} per {}", self.length, self.currency),
            ComparisonMode::Size => format!("sq {}", self.length),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.length.trim().is_empty() {
            return Err(ValidationError::EmptyUnit("length"));
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::EmptyUnit("currency"));
        }
        Ok(())
    }
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            length: default_length(),
            currency: default_currency(),
        }
    }
}

impl FormDefaults {
    pub fn for_size(&self, size: PizzaSize) -> &OptionDefaults {
        match size {
            PizzaSize::Large => &self.large,
            PizzaSize::Medium => &self.medium,
            PizzaSize::Small => &self.small,
        }
    }
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            large: default_large(),
            medium: default_medium(),
            small: default_small(),
        }
    }
}

impl OptionDefaults {
    /// Default values rendered the way they would appear in the form fields
    pub fn as_text(&self) -> [String; 3] {
        let text = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        [
            text(self.diameter),
            text(self.price),
            self.quantity.map(|q| q.to_string()).unwrap_or_default(),
        ]
    }

    fn validate(&self, size: PizzaSize) -> Result<(), ValidationError> {
        let fields = [
            ("diameter", self.diameter),
            ("price", self.price),
            ("quantity", self.quantity.map(f64::from)),
        ];
        for (field, value) in fields {
            if let Some(actual) = value.filter(|v| !(*v > 0.0 && v.is_finite())) {
                return Err(ValidationError::NonPositiveDefault {
                    size,
                    field,
                    actual,
                });
            }
        }
        Ok(())
    }
}

fn default_length() -> String {
    "inches".to_string()
}

fn default_currency() -> String {
    "dollar".to_string()
}

fn default_large() -> OptionDefaults {
    OptionDefaults {
        diameter: Some(14.0),
        price: None,
        quantity: Some(1),
    }
}

fn default_medium() -> OptionDefaults {
    OptionDefaults {
        diameter: Some(12.0),
        price: None,
        quantity: Some(2),
    }
}

fn default_small() -> OptionDefaults {
    OptionDefaults {
        diameter: Some(10.0),
        price: None,
        quantity: Some(2),
    }
}
