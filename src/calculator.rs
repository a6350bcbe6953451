//! Pizza value comparison logic

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use tracing::{debug, trace};

use crate::config::UnitsConfig;
use crate::models::{ComparisonMode, ComparisonResult, OptionInput, PizzaSize, ScoredOption};

/// Price assumed for every option when comparing by size alone
pub const DEFAULT_PRICE: f64 = 1.0;

/// Number of priced options needed before price is taken into account
pub const MIN_PRICED_OPTIONS: usize = 2;

/// Area of a round pizza per unit of price.
///
/// Without a price this is the raw area.
pub fn compute_unit_value(diameter: f64, price: Option<f64>) -> f64 {
    let area = PI * (diameter / 2.0).powi(2);
    area / price.unwrap_or(DEFAULT_PRICE)
}

/// An option with the fields needed to take part in a comparison
#[derive(Debug, Clone, Copy)]
struct Candidate {
    size: PizzaSize,
    diameter: f64,
    price: Option<f64>,
    quantity: u32,
}

impl Candidate {
    fn from_input(input: &OptionInput) -> Option<Self> {
        let diameter = input.diameter.filter(|d| d.is_finite() && *d > 0.0)?;
        let quantity = input.quantity.filter(|q| *q >= 1)?;
        Some(Self {
            size: input.size,
            diameter,
            price: input.price.filter(|p| p.is_finite() && *p > 0.0),
            quantity,
        })
    }

    fn score(&self, price: Option<f64>) -> ScoredOption {
        ScoredOption {
            size: self.size,
            quantity: self.quantity,
            value: compute_unit_value(self.diameter, price) * f64::from(self.quantity),
        }
    }
}

/// Compare the options and pick the one with the best value.
///
/// Returns `None` when no option has both a diameter and a quantity.
/// Options whose value does not fit a finite `f64` are left out.
/// With two or more priced options only those are compared, each by its own
/// price; otherwise every valid option is compared by area alone.
pub fn compare_options(inputs: &[OptionInput]) -> Option<ComparisonResult> {
    let mut candidates: Vec<Candidate> = Vec::new();
    for size in PizzaSize::ALL {
        let mut records = inputs.iter().filter(|input| input.size == size);
        let Some(first) = records.next() else {
            continue;
        };
        let ignored = records.count();
        if ignored > 0 {
            debug!(size = %size, ignored, "Ignoring repeated option records");
        }
        match Candidate::from_input(first) {
            Some(candidate) => candidates.push(candidate),
            None => trace!(size = %size, "Option lacks diameter or quantity"),
        }
    }

    let priced = candidates.iter().filter(|c| c.price.is_some()).count();
    let comparison_mode = if priced >= MIN_PRICED_OPTIONS {
        ComparisonMode::Price
    } else {
        ComparisonMode::Size
    };
    debug!(
        valid = candidates.len(),
        priced,
        mode = ?comparison_mode,
        "Selected comparison mode"
    );

    let scored: Vec<ScoredOption> = match comparison_mode {
        ComparisonMode::Price => candidates
            .iter()
            .filter(|c| c.price.is_some())
            .map(|c| c.score(c.price))
            .collect(),
        ComparisonMode::Size => candidates.iter().map(|c| c.score(None)).collect(),
    };
    let scored: Vec<ScoredOption> = scored
        .into_iter()
        .filter(|s| {
            let finite = s.value.is_finite();
            if !finite {
                debug!(size = %s.size, "Dropping option whose value overflows");
            }
            finite
        })
        .collect();

    // First maximum in enumeration order wins ties
    let mut best: Option<ScoredOption> = None;
    for option in scored.iter().filter(|s| s.value > 0.0) {
        trace!(size = %option.size, value = option.value, "Scored option");
        if best.is_none_or(|b| option.value > b.value) {
            best = Some(*option);
        }
    }

    let Some(best) = best else {
        debug!("No options to compare");
        return None;
    };

    let mut per_option_value: BTreeMap<PizzaSize, f64> =
        PizzaSize::ALL.iter().map(|size| (*size, 0.0)).collect();
    for option in &scored {
        per_option_value.insert(option.size, option.value);
    }

    Some(ComparisonResult {
        per_option_value,
        comparison_mode,
        best_option_label: best_option_label(&best),
        best,
    })
}

fn best_option_label(best: &ScoredOption) -> String {
    format!("{} {} pizza(s) offer the best value.", best.quantity, best.size)
}

/// Text rendering of a comparison result
#[derive(Debug, Clone, Copy)]
pub struct ResultsView<'a> {
    result: &'a ComparisonResult,
    units: &'a UnitsConfig,
    bold: bool,
}

impl<'a> ResultsView<'a> {
    pub fn new(result: &'a ComparisonResult, units: &'a UnitsConfig) -> Self {
        Self {
            result,
            units,
            bold: false,
        }
    }

    /// Emphasise the summary line with an ANSI bold escape
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

impl fmt::Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = self.result.comparison_mode;
        let label = self.units.value_label(mode);

        writeln!(f, "Results")?;
        writeln!(f, "Comparison based on: {}", mode.description())?;
        for size in PizzaSize::ALL {
            let value = self.result.value_of(size);
            if value > 0.0 {
                writeln!(f, "{}: {:.2} {}", size.heading(), value, label)?;
            }
        }

        if self.bold {
            writeln!(f, "\x1b[1m{}\x1b[0m", self.result.best_option_label)
        } else {
            writeln!(f, "{}", self.result.best_option_label)
        }
    }
}
