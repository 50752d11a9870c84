//! docbrowse entry point
//!
//! Read-only command line front over a JSON document store: list the
//! collections, print a window of the projected table, drill into one
//! record. Interactive rendering lives elsewhere; this binary only drives
//! the session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

use db_core::RowCursor;
use db_data::{detail, Activation, JsonConnector, Session};

#[derive(Parser, Debug)]
#[command(name = "docbrowse", about = "Browse a schema-less document store file")]
struct Args {
    /// Store file to open
    path: PathBuf,

    /// Collection to display (defaults to the first one)
    #[arg(short, long)]
    collection: Option<String>,

    /// Record index to show in detail
    #[arg(short, long)]
    record: Option<usize>,

    /// First row of the table window
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Maximum rows to print
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// Open timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let mut session = Session::new(Duration::from_secs(args.timeout));
    session
        .open(Arc::new(JsonConnector), args.path.clone())
        .await?;
    info!(path = %args.path.display(), "store opened");

    if let Some(name) = &args.collection {
        session.activate_collection(name)?;
    }

    println!("Collections: {}", session.collections().join(", "));

    let Some(activation) = session.activation() else {
        println!("No data");
        return Ok(());
    };
    println!("Table: {}", activation.collection);
    println!();
    print_table(activation, args.offset, args.limit);

    if let Some(row) = args.record {
        print_record(&session, activation, row)?;
    }

    print_notifications(&session);
    Ok(())
}

fn print_table(activation: &Activation, offset: usize, limit: usize) {
    let headers = activation.headers();
    let total = activation.row_count();

    let mut cursor = RowCursor::new(total);
    cursor.advance(offset);
    let start = cursor.position();
    let end = (start + limit).min(total);
    let window = &activation.display_rows[start..end];

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in window {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    println!("{}", format_row(&headers, &widths));
    for row in window {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", format_row(&cells, &widths));
    }
    println!("[{} of {} row(s)]", window.len(), total);
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_record(session: &Session, activation: &Activation, row: usize) -> Result<()> {
    let raw = activation
        .raw_row(row)
        .ok_or_else(|| anyhow!("row {} is out of range", row))?;
    let width = detail::label_width(&activation.columns);

    println!();
    println!(
        "Record {} of {} in '{}':",
        row + 1,
        activation.row_count(),
        activation.collection
    );
    let continuation = format!("\n{:indent$}   ", "", indent = width);
    for field in detail::document_fields(&activation.columns, raw) {
        let text = field.text.replace('\n', &continuation);
        println!("{:<width$} : {}", field.label, text, width = width);
    }

    let document = session.locate(activation.id, row)?;
    println!();
    println!(
        "Source document: {:#}",
        serde_json::Value::Object(document)
    );
    Ok(())
}

fn print_notifications(session: &Session) {
    let unseen = session.notifications.unseen_count();
    if unseen == 0 {
        return;
    }
    println!();
    println!("{} notification(s):", unseen);
    for entry in session.notifications.entries() {
        println!("  {}: {}", entry.created_at.format("%H:%M:%S"), entry.text);
    }
}
