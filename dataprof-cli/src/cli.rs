use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataprof_core::{load_table, CleanedTable, DataProfiler};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "dataprof-cli")]
#[command(about = "Profile and clean tabular CSV datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and emit a JSON profile report
    Profile {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the inferred column schema
    Schema {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Clean the dataset and write it back out as CSV
    Clean {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn profile_command(file: PathBuf, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;

    // Pipeline errors land inside the report, not on stderr: the report
    // is the contract either way.
    let report = DataProfiler::default().profile(&display_name(&file), &bytes);
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    match output {
        Some(path) => {
            fs::write(&path, &json).with_context(|| format!("writing {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn schema_command(file: PathBuf) -> Result<()> {
    let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let table = load_table(&bytes)?;
    let schemas = DataProfiler::default().infer_schema(&table);

    for schema in &schemas {
        println!(
            "{}\t{}\tconfidence {:.2}",
            schema.name, schema.kind, schema.confidence
        );
    }
    Ok(())
}

pub fn clean_command(file: PathBuf, output: PathBuf) -> Result<()> {
    let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let profiler = DataProfiler::default();

    let table = load_table(&bytes)?;
    let schemas = profiler.infer_schema(&table);
    let (cleaned, report) = profiler.clean(&table, &schemas);

    write_csv(&cleaned, &output)?;
    info!(
        rows = cleaned.row_count(),
        duplicates_removed = report.duplicates_removed,
        "cleaned table written to {}",
        output.display()
    );
    Ok(())
}

fn write_csv(table: &CleanedTable, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("writing {}", path.display()))?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
