//! Interactive form session
//!
//! Prompts for each option's fields, compares them, shows the result and
//! repeats until the user stops or input runs out.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::calculator::compare_options;
use crate::config::AppConfig;
use crate::form::FormReader;
use crate::models::{OptionInput, PizzaSize};

/// Order the options are laid out on the form
pub const FORM_ORDER: [PizzaSize; 3] = [PizzaSize::Large, PizzaSize::Small, PizzaSize::Medium];

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    reader: &'a FormReader,
    config: &'a AppConfig,
    bold: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, reader: &'a FormReader, config: &'a AppConfig) -> Self {
        Self {
            input,
            output,
            reader,
            config,
            bold: false,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Run submissions until the user declines another; returns how many ran
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.output, "Pizza Size and Price Comparison")?;
        writeln!(
            self.output,
            "Press Enter to keep a value, type anything non-numeric to clear it."
        )?;

        let mut submissions = 0;
        loop {
            let Some(inputs) = self.fill_form()? else {
                break;
            };
            submissions += 1;

            writeln!(self.output)?;
            match compare_options(&inputs) {
                Some(result) => {
                    let view = self.config.view(&result).bold(self.bold);
                    write!(self.output, "{}", view)?;
                }
                None => writeln!(self.output, "No results to show.")?,
            }
            writeln!(self.output)?;

            match self.ask("Compare again? [y/N]: ")? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
                _ => break,
            }
        }

        debug!(submissions, "Session finished");
        Ok(submissions)
    }

    /// Prompt for every field; `None` when input ends part way
    fn fill_form(&mut self) -> Result<Option<Vec<OptionInput>>> {
        let mut inputs = Vec::with_capacity(FORM_ORDER.len());

        for size in FORM_ORDER {
            writeln!(self.output)?;
            writeln!(self.output, "{}", size.heading())?;

            let [diameter, price, quantity] = self.config.defaults.for_size(size).as_text();
            let units = &self.config.units;
            let fields = [
                (format!("Diameter ({})", units.length), diameter),
                (format!("Price ({})", units.currency), price),
                ("Quantity".to_string(), quantity),
            ];

            let mut values = Vec::with_capacity(fields.len());
            for (label, default) in fields {
                let prompt = format!("  {} [{}]: ", label, default);
                let Some(line) = self.ask(&prompt)? else {
                    return Ok(None);
                };
                let line = line.trim();
                values.push(if line.is_empty() { default } else { line.to_string() });
            }

            inputs.push(self.reader.option(size, &values[0], &values[1], &values[2]));
        }

        Ok(Some(inputs))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
