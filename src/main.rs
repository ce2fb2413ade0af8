//! Cook timeline analyser - command line entry point
//!
//! Inspects and annotates temperature-probe CSV exports on disk.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cookvis_rs::{
    config::ViewerSettings,
    logging,
    types::{format_elapsed, TemperatureUnit},
    CookFile, LocalFile,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cookvis", version, about = "Inspect and annotate probe cook exports")]
struct Cli {
    /// Cook export to operate on
    file: PathBuf,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print headline figures for the session
    Summary,
    /// List the notes attached to the timeline
    Notes,
    /// List intervals where the probe was not inserted
    Ranges,
    /// Attach or replace the note on a row and save the file
    AddNote {
        /// Sequence number of the row
        #[arg(long)]
        seq: i64,
        /// Note text
        #[arg(long)]
        text: String,
    },
    /// Remove the note from a row and save the file
    RemoveNote {
        /// Sequence number of the row
        #[arg(long)]
        seq: i64,
    },
    /// Write the (re-serialized) export to another path
    Export {
        /// Destination path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_dir.as_deref())?;

    let settings = ViewerSettings::load_or_default();
    let mut file = LocalFile::open(&cli.file)
        .with_context(|| format!("Could not open {}", cli.file.display()))?;

    match cli.command {
        Commands::Summary => print_summary(&file, settings.temperature_unit, cli.json)?,
        Commands::Notes => print_notes(&file, cli.json)?,
        Commands::Ranges => print_ranges(&file, cli.json)?,
        Commands::AddNote { seq, text } => {
            if file.document().row(seq).is_none() {
                bail!("No row with sequence number {} in {}", seq, file.window_title());
            }
            if file.document_mut().add_or_update_note(seq, &text) {
                file.save()?;
                println!("Note saved on row {}", seq);
            } else {
                println!("Row {} already has that note", seq);
            }
        }
        Commands::RemoveNote { seq } => {
            if file.document_mut().remove_note(seq) {
                file.save()?;
                println!("Note removed from row {}", seq);
            } else {
                println!("Row {} has no note", seq);
            }
        }
        Commands::Export { out } => {
            file.export_to(&out)?;
            println!("Wrote {} rows to {}", file.document().len(), out.display());
        }
    }

    Ok(())
}

fn print_summary(file: &LocalFile, unit: TemperatureUnit, json: bool) -> Result<()> {
    let summary = file.document().summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", file.window_title());
    println!("  Session:     {}", summary.session_id.as_deref().unwrap_or("-"));
    println!("  Rows:        {}", summary.rows);
    println!("  Duration:    {}", format_elapsed(summary.duration_seconds));
    println!("  Notes:       {}", summary.notes);
    println!("  Probe out:   {} interval(s)", summary.probe_not_inserted_ranges);
    if let Some(peak) = summary.peak_core {
        println!("  Peak core:   {:.1}{}", peak.value_for(unit), unit.symbol());
    }
    Ok(())
}

fn print_notes(file: &LocalFile, json: bool) -> Result<()> {
    let annotations = file.document().annotations();
    if json {
        let notes: Vec<_> = annotations
            .iter()
            .map(|a| {
                serde_json::json!({
                    "sequenceNumber": a.sequence_number(),
                    "timestamp": a.timestamp(),
                    "note": a.text(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if annotations.is_empty() {
        println!("No notes");
    }
    for annotation in annotations.iter() {
        println!(
            "{:>6}  {:>8}  {}",
            annotation.sequence_number(),
            annotation.time_label(),
            annotation.text()
        );
    }
    Ok(())
}

fn print_ranges(file: &LocalFile, json: bool) -> Result<()> {
    let ranges = file.document().probe_not_inserted_ranges();
    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
        return Ok(());
    }

    if ranges.is_empty() {
        println!("Probe was inserted for the whole cook");
    }
    for range in &ranges {
        println!(
            "{} .. {}  ({}s)",
            format_elapsed(range.lower),
            format_elapsed(range.upper),
            range.duration()
        );
    }
    Ok(())
}
