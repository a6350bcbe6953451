//! Pizza Value Calculator
//!
//! Compares the value of differently sized pizzas from the command line.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pizza_value::prompt::Session;
use pizza_value::{AppConfig, ComparisonResult, FormReader, OptionInput, PizzaSize, compare_options};

#[derive(Parser)]
#[command(name = "pizza-value")]
#[command(about = "Compare the value of differently sized pizzas")]
struct Cli {
    /// Configuration file with unit labels and form defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log comparison details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare options given as flags; fields left out use the form defaults
    Compare {
        #[command(flatten)]
        fields: CompareFields,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a raw form submission (e.g. largeDiameter=14 largePrice=12.99)
    Form {
        /// Form fields; when omitted, each line of stdin is one submission
        fields: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in the comparison form interactively
    Interactive,
}

/// Raw field text for each option. An empty string blanks the field.
#[derive(Args)]
struct CompareFields {
    /// Large pizza diameter
    #[arg(long, allow_hyphen_values = true)]
    large_diameter: Option<String>,

    /// Large pizza price
    #[arg(long, allow_hyphen_values = true)]
    large_price: Option<String>,

    /// Number of large pizzas
    #[arg(long, allow_hyphen_values = true)]
    large_quantity: Option<String>,

    /// Medium pizza diameter
    #[arg(long, allow_hyphen_values = true)]
    medium_diameter: Option<String>,

    /// Medium pizza price
    #[arg(long, allow_hyphen_values = true)]
    medium_price: Option<String>,

    /// Number of medium pizzas
    #[arg(long, allow_hyphen_values = true)]
    medium_quantity: Option<String>,

    /// Small pizza diameter
    #[arg(long, allow_hyphen_values = true)]
    small_diameter: Option<String>,

    /// Small pizza price
    #[arg(long, allow_hyphen_values = true)]
    small_price: Option<String>,

    /// Number of small pizzas
    #[arg(long, allow_hyphen_values = true)]
    small_quantity: Option<String>,
}

impl CompareFields {
    fn raw(&self, size: PizzaSize) -> [Option<&str>; 3] {
        let fields = match size {
            PizzaSize::Large => [&self.large_diameter, &self.large_price, &self.large_quantity],
            PizzaSize::Medium => [&self.medium_diameter, &self.medium_price, &self.medium_quantity],
            PizzaSize::Small => [&self.small_diameter, &self.small_price, &self.small_quantity],
        };
        fields.map(|f| f.as_deref())
    }

    fn read(&self, reader: &FormReader, config: &AppConfig) -> Vec<OptionInput> {
        PizzaSize::ALL
            .iter()
            .map(|&size| {
                reader.option_or_default(size, self.raw(size), config.defaults.for_size(size))
            })
            .collect()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;
    let reader = FormReader::new()?;
    let bold = io::stdout().is_terminal();

    match cli.command {
        Commands::Compare { fields, json } => {
            let inputs = fields.read(&reader, &config);
            print_result(compare_options(&inputs), &config, json, bold)?;
        }

        Commands::Form { fields, json } => {
            if fields.is_empty() {
                for line in io::stdin().lock().lines() {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let inputs = reader.submission([line.as_str()]);
                    print_result(compare_options(&inputs), &config, json, bold)?;
                }
            } else {
                let inputs = reader.submission(fields.iter().map(String::as_str));
                print_result(compare_options(&inputs), &config, json, bold)?;
            }
        }

        Commands::Interactive => {
            let stdin = io::stdin().lock();
            Session::new(stdin, io::stdout(), &reader, &config)
                .bold(bold)
                .run()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pizza_value=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_result(
    result: Option<ComparisonResult>,
    config: &AppConfig,
    json: bool,
    bold: bool,
) -> Result<()> {
    let mut stdout = io::stdout().lock();

    if json {
        writeln!(stdout, "{}", serde_json::to_string(&result)?)?;
        return Ok(());
    }

    match result {
        Some(result) => write!(stdout, "{}", config.view(&result).bold(bold))?,
        None => eprintln!("No results to show."),
    }
    Ok(())
}
