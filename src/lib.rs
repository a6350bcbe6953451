//! Pizza value calculator
//!
//! Compares differently sized pizzas by area, optionally per unit of price,
//! and reports which size offers the best value.

pub mod calculator;
pub mod config;
pub mod form;
pub mod models;
pub mod prompt;

pub use crate::calculator::{ResultsView, compare_options, compute_unit_value};
pub use crate::config::AppConfig;
pub use crate::form::FormReader;
pub use crate::models::{ComparisonMode, ComparisonResult, OptionInput, PizzaSize, ScoredOption};
