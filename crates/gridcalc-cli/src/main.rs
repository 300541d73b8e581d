//! gridcalc CLI - resolve formulas in CSV tables

mod logger;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gridcalc::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Resolve single-operator formulas in CSV tables")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every formula and output the resolved table
    #[command(alias = "eval")]
    Calc {
        /// Input table (.csv or .tsv)
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: from the file extension)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Strip whitespace around fields
        #[arg(long)]
        trim: bool,
    },

    /// Show information about a table without evaluating it
    Info {
        /// Input table (.csv or .tsv)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Calc {
            input,
            output,
            delimiter,
            trim,
        } => calc(&input, output.as_deref(), delimiter, trim),
        Commands::Info { input } => show_info(&input),
    }
}

fn calc(input: &Path, output: Option<&Path>, delimiter: Option<char>, trim: bool) -> Result<()> {
    let table = if delimiter.is_some() || trim {
        let mut options = CsvReadOptions {
            trim,
            ..CsvReadOptions::default()
        };
        if let Some(delimiter) = delimiter {
            options.delimiter = delimiter_byte(delimiter)?;
        } else if input.extension().is_some_and(|e| e.eq_ignore_ascii_case("tsv")) {
            options.delimiter = b'\t';
        }
        Table::open_with_options(input, &options)
    } else {
        Table::open(input)
    }
    .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let calculated = table
        .calculate()
        .with_context(|| format!("Failed to calculate '{}'", input.display()))?;
    log::info!("{}", calculated.stats());

    if let Some(output_path) = output {
        calculated
            .save(output_path, &CsvWriteOptions::default())
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        log::info!(
            "Wrote {} rows to '{}'",
            calculated.grid().row_count(),
            output_path.display()
        );
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", calculated.render()).context("Failed to write to stdout")?;
    }

    Ok(())
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        bail!("Unsupported delimiter {:?}", delimiter);
    }
    Ok(delimiter as u8)
}

fn show_info(input: &Path) -> Result<()> {
    let table =
        Table::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    let grid = table.grid();

    println!("File: {}", input.display());
    println!(
        "Size: {} rows x {} columns",
        grid.row_count(),
        grid.column_count()
    );
    println!("Columns: {}", grid.column_names().join(", "));
    println!("Formulas: {}", table.formula_count());
    println!("References: {}", table.formulas().reference_count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_calc() {
        let cli = Cli::try_parse_from(["gridcalc", "-vv", "calc", "in.csv", "-o", "out.csv", "-d", ";"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Calc {
                input,
                output,
                delimiter,
                trim,
            } => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(delimiter, Some(';'));
                assert!(!trim);
            }
            Commands::Info { .. } => panic!("expected calc"),
        }
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('"').is_err());
        assert!(delimiter_byte('é').is_err());
    }
}
