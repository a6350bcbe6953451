//! Form input boundary
//!
//! Coerces raw field text into typed [`OptionInput`] records. Text that is
//! blank, non-numeric, non-finite or not positive becomes an absent field;
//! nothing here fails on bad input.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::config::OptionDefaults;
use crate::models::{OptionInput, PizzaSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Diameter,
    Price,
    Quantity,
}

/// Parses form field names and values
#[derive(Debug, Clone)]
pub struct FormReader {
    numeric: Regex,
    field_name: Regex,
}

impl FormReader {
    pub fn new() -> Result<Self, regex::Error> {
        // Same shape an HTML number input accepts
        let numeric = Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$")?;
        // largeDiameter, large_diameter, LARGE-PRICE
        let field_name =
            Regex::new(r"(?i)^(large|medium|small)[_-]?(diameter|price|quantity)$")?;
        Ok(Self {
            numeric,
            field_name,
        })
    }

    /// A finite number greater than zero, or absent
    pub fn positive_real(&self, raw: &str) -> Option<f64> {
        let text = raw.trim();
        if !self.numeric.is_match(text) {
            return None;
        }
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// A whole number of at least one, or absent
    pub fn quantity(&self, raw: &str) -> Option<u32> {
        self.positive_real(raw)
            .filter(|v| v.fract() == 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    }

    /// Build one option from the raw text of its three fields
    pub fn option(
        &self,
        size: PizzaSize,
        diameter: &str,
        price: &str,
        quantity: &str,
    ) -> OptionInput {
        let input = OptionInput {
            size,
            diameter: self.positive_real(diameter),
            price: self.positive_real(price),
            quantity: self.quantity(quantity),
        };
        debug!(
            size = %size,
            diameter = ?input.diameter,
            price = ?input.price,
            quantity = ?input.quantity,
            "Read option"
        );
        input
    }

    /// Build one option from field text that may be left out.
    ///
    /// A field given as `None` takes its default; an empty string blanks it.
    pub fn option_or_default(
        &self,
        size: PizzaSize,
        fields: [Option<&str>; 3],
        defaults: &OptionDefaults,
    ) -> OptionInput {
        let text = defaults.as_text();
        let [diameter, price, quantity] = fields;
        self.option(
            size,
            diameter.unwrap_or(text[0].as_str()),
            price.unwrap_or(text[1].as_str()),
            quantity.unwrap_or(text[2].as_str()),
        )
    }

    /// Split a field name such as `mediumPrice` into its size and field
    pub fn field_name(&self, name: &str) -> Option<(PizzaSize, Field)> {
        let cap = self.field_name.captures(name.trim())?;
        let size = cap[1].parse::<PizzaSize>().ok()?;
        let field = match cap[2].to_ascii_lowercase().as_str() {
            "diameter" => Field::Diameter,
            "price" => Field::Price,
            _ => Field::Quantity,
        };
        Some((size, field))
    }

    /// Read a submission made of `name=value` pairs.
    ///
    /// Each item may itself hold several `&`-joined pairs. Missing fields are
    /// blank, repeated fields keep the last value, unknown names are ignored.
    /// Returns one record per size in enumeration order.
    pub fn submission<'a, I>(&self, items: I) -> Vec<OptionInput>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values: HashMap<(PizzaSize, Field), &str> = HashMap::new();

        for pair in items.into_iter().flat_map(|item| item.split('&')) {
            if pair.trim().is_empty() {
                continue;
            }
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            match self.field_name(name) {
                Some(key) => {
                    values.insert(key, value);
                }
                None => debug!(field = name, "Ignoring unknown form field"),
            }
        }

        PizzaSize::ALL
            .iter()
            .map(|&size| {
                let get = |field: Field| values.get(&(size, field)).copied().unwrap_or("");
                self.option(size, get(Field::Diameter), get(Field::Price), get(Field::Quantity))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> FormReader {
        FormReader::new().unwrap()
    }

    #[test]
    fn test_positive_real_accepts_numbers() {
        let r = reader();
        assert_eq!(r.positive_real("14"), Some(14.0));
        assert_eq!(r.positive_real(" 12.99 "), Some(12.99));
        assert_eq!(r.positive_real(".5"), Some(0.5));
        assert_eq!(r.positive_real("12."), Some(12.0));
        assert_eq!(r.positive_real("1e1"), Some(10.0));
        assert_eq!(r.positive_real("+3"), Some(3.0));
    }

    #[test]
    fn test_positive_real_rejects_junk() {
        let r = reader();
        for raw in ["", "   ", "abc", "12abc", "NaN", "inf", "infinity", "0x10", "1,5", "-"] {
            assert_eq!(r.positive_real(raw), None, "{raw:?} should be absent");
        }
    }

    #[test]
    fn test_positive_real_rejects_non_positive_and_overflow() {
        let r = reader();
        assert_eq!(r.positive_real("0"), None);
        assert_eq!(r.positive_real("-4"), None);
        assert_eq!(r.positive_real("0.0"), None);
        assert_eq!(r.positive_real("1e400"), None);
    }

    #[test]
    fn test_quantity() {
        let r = reader();
        assert_eq!(r.quantity("2"), Some(2));
        assert_eq!(r.quantity("2.0"), Some(2));
        assert_eq!(r.quantity("2.5"), None);
        assert_eq!(r.quantity("0"), None);
        assert_eq!(r.quantity("99999999999"), None);
        assert_eq!(r.quantity(""), None);
    }

    #[test]
    fn test_option_from_raw_text() {
        let input = reader().option(PizzaSize::Large, "14", "", "1");
        assert_eq!(input, OptionInput::new(PizzaSize::Large, 14.0, None, 1));
    }

    #[test]
    fn test_left_out_fields_take_defaults() {
        let defaults = OptionDefaults {
            diameter: Some(14.0),
            price: Some(12.99),
            quantity: Some(1),
        };
        let input =
            reader().option_or_default(PizzaSize::Large, [None, None, Some("3")], &defaults);
        assert_eq!(input, OptionInput::new(PizzaSize::Large, 14.0, Some(12.99), 3));
    }

    #[test]
    fn test_empty_field_blanks_default() {
        let defaults = OptionDefaults {
            diameter: Some(12.0),
            price: Some(9.5),
            quantity: Some(2),
        };
        let input =
            reader().option_or_default(PizzaSize::Medium, [Some(""), Some(""), None], &defaults);
        assert_eq!(input.diameter, None);
        assert_eq!(input.price, None);
        assert_eq!(input.quantity, Some(2));

        let blank = OptionDefaults::default();
        let input = reader().option_or_default(PizzaSize::Small, [None, None, None], &blank);
        assert_eq!(input, OptionInput::blank(PizzaSize::Small));
    }

    #[test]
    fn test_field_names() {
        let r = reader();
        assert_eq!(r.field_name("largeDiameter"), Some((PizzaSize::Large, Field::Diameter)));
        assert_eq!(r.field_name("small_price"), Some((PizzaSize::Small, Field::Price)));
        assert_eq!(r.field_name("MEDIUM-QUANTITY"), Some((PizzaSize::Medium, Field::Quantity)));
        assert_eq!(r.field_name("familyDiameter"), None);
        assert_eq!(r.field_name("largeCrust"), None);
    }

    #[test]
    fn test_submission_from_pairs() {
        let inputs = reader().submission([
            "largeDiameter=14&largePrice=12.99&largeQuantity=1",
            "smallDiameter=10",
            "smallPrice=9.99",
            "smallQuantity=2",
            "coupon=HALFOFF",
        ]);

        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], OptionInput::new(PizzaSize::Large, 14.0, Some(12.99), 1));
        assert_eq!(inputs[1], OptionInput::blank(PizzaSize::Medium));
        assert_eq!(inputs[2], OptionInput::new(PizzaSize::Small, 10.0, Some(9.99), 2));
    }

    #[test]
    fn test_submission_last_value_wins_and_bare_names_are_blank() {
        let inputs = reader().submission(["largeDiameter=14", "largeDiameter=16", "largeQuantity"]);
        assert_eq!(inputs[0].diameter, Some(16.0));
        assert_eq!(inputs[0].quantity, None);
    }
}
