//! gridplate CLI - fill worksheet templates from the command line

mod values;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridplate::prelude::*;
use gridplate::{placeholder_names, CellAddress, CsvWriteOptions};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridplate")]
#[command(author, version, about = "Worksheet template filling tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replicate template rows once per value group
    Rows {
        /// Template file (csv, tsv)
        input: PathBuf,

        /// First template row (1-based)
        #[arg(long)]
        from: u32,

        /// Last template row (1-based, default: same as --from)
        #[arg(long)]
        to: Option<u32>,

        /// Row the copies are inserted before (1-based)
        #[arg(long)]
        at: u32,

        /// JSON file with the value groups
        #[arg(long)]
        values: PathBuf,

        /// Keep the template rows instead of removing them
        #[arg(long)]
        keep_template: bool,

        /// Output file (default: CSV on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replicate template columns once per value group
    Columns {
        /// Template file (csv, tsv)
        input: PathBuf,

        /// First template column (letters, e.g. B)
        #[arg(long)]
        from: String,

        /// Last template column (default: same as --from)
        #[arg(long)]
        to: Option<String>,

        /// Column the copies are inserted before
        #[arg(long)]
        at: String,

        /// JSON file with the value groups
        #[arg(long)]
        values: PathBuf,

        /// Keep the template columns instead of removing them
        #[arg(long)]
        keep_template: bool,

        /// Output file (default: CSV on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace ${name} placeholders
    Fill {
        /// Template file (csv, tsv)
        input: PathBuf,

        /// Placeholder value as name=value (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        assignments: Vec<String>,

        /// JSON object with placeholder values
        #[arg(long)]
        vars: Option<PathBuf>,

        /// Output file (default: CSV on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the placeholders and merged regions of a template
    Info {
        /// Template file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rows {
            input,
            from,
            to,
            at,
            values,
            keep_template,
            output,
        } => {
            let first = row_index(from)?;
            let last = row_index(to.unwrap_or(from))?;
            let subs = values::load_groups(&values)?;
            let mut template = open_template(&input)?;
            let inserted = template
                .insert_rows(first, last, row_index(at)?, &subs, !keep_template)
                .context("Failed to insert rows")?;
            report(inserted, "rows", &input);
            write_output(&template, output.as_deref())
        }
        Commands::Columns {
            input,
            from,
            to,
            at,
            values,
            keep_template,
            output,
        } => {
            let first = column_index(&from)?;
            let last = column_index(to.as_deref().unwrap_or(&from))?;
            let subs = values::load_groups(&values)?;
            let mut template = open_template(&input)?;
            let inserted = template
                .insert_columns(first, last, column_index(&at)?, &subs, !keep_template)
                .context("Failed to insert columns")?;
            report(inserted, "columns", &input);
            write_output(&template, output.as_deref())
        }
        Commands::Fill {
            input,
            assignments,
            vars,
            output,
        } => {
            let mut pairs = assignments
                .iter()
                .map(|arg| values::parse_assignment(arg))
                .collect::<Result<Vec<_>>>()?;
            if let Some(path) = vars {
                pairs.extend(values::load_vars(&path)?);
            }
            if pairs.is_empty() {
                bail!("Nothing to fill: pass --set NAME=VALUE or --vars FILE");
            }

            let mut template = open_template(&input)?;
            let matched = template
                .fill_variables(pairs)
                .context("Failed to fill placeholders")?;
            eprintln!("Filled {} placeholder names", matched);
            write_output(&template, output.as_deref())
        }
        Commands::Info { input } => show_info(&input),
    }
}

fn open_template(input: &Path) -> Result<Template> {
    let template = Template::open(input);
    if let Some(fault) = template.fault() {
        bail!("Failed to open '{}': {}", input.display(), fault);
    }
    Ok(template)
}

fn row_index(row: u32) -> Result<u32> {
    match row.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Row numbers start at 1"),
    }
}

fn column_index(letters: &str) -> Result<u16> {
    CellAddress::letters_to_column(&letters.trim().to_uppercase())
        .with_context(|| format!("Invalid column '{}'", letters))
}

fn report(inserted: u32, what: &str, input: &Path) {
    if inserted == 0 {
        eprintln!(
            "Warning: nothing inserted; check the template {} and values for '{}'",
            what,
            input.display()
        );
    } else {
        eprintln!("Inserted {} {}", inserted, what);
    }
}

fn write_output(template: &Template, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            template
                .save(path)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote '{}'", path.display());
        }
        None => {
            let sheet = template.worksheet()?;
            CsvWriter::write(sheet, io::stdout().lock(), &CsvWriteOptions::default())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let template = open_template(input)?;
    let sheet = template.worksheet()?;

    println!("File: {}", input.display());
    println!("Sheet: \"{}\"", sheet.name());

    match sheet.used_range() {
        Some(range) => println!(
            "Used range: {} ({} rows x {} columns)",
            range,
            range.last_row() + 1,
            range.last_col() + 1
        ),
        None => println!("Used range: empty"),
    }

    let regions = sheet.merged_regions();
    println!("Merged regions: {}", regions.len());
    for region in regions {
        println!("  {}", region);
    }

    let mut markers = 0usize;
    let mut names = BTreeSet::new();
    for (_, _, data) in sheet.iter_cells() {
        if data.value.is_positional_marker() {
            markers += 1;
        } else if let Some(text) = data.value.as_string() {
            names.extend(placeholder_names(text).into_iter().map(str::to_string));
        }
    }
    println!("Positional markers: {}", markers);
    println!("Named placeholders: {}", names.len());
    for name in names {
        println!("  ${{{}}}", name);
    }

    Ok(())
}
