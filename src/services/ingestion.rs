use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::io::Write;

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn, ReceiptId};
use crate::domain::{RawReceipt, ReceiptLine};
use crate::errors::file_context;
use crate::recommendation::parse_receipt_timestamp;

pub struct IngestionService {
    config: AppConfig,
}

impl IngestionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run<W: Write>(&self, receipt_path: &str, out: &mut W) -> Result<ReceiptId> {
        info!("=== Reading Receipt ===");
        info!("Source: {}, Target DB: {}", receipt_path, self.config.database.path);

        let raw = load_receipt(receipt_path)?;
        let mut conn = database::setup::open_initialized(&self.config.database.path)?;
        let receipt_id = ingest_receipt(&mut conn, raw, out)?;

        info!("=== Reading Complete ===");
        Ok(receipt_id)
    }
}

pub fn load_receipt(path: &str) -> Result<RawReceipt> {
    let content = fs::read_to_string(path).with_context(|| file_context(path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse receipt JSON from {}", path))
}

/// Validate, echo and store one receipt.
///
/// The receipt date must already be in a layout the recommender can read;
/// anything else is rejected before a row is written.
pub fn ingest_receipt<W: Write>(
    conn: &mut DbConn,
    raw: RawReceipt,
    out: &mut W,
) -> Result<ReceiptId> {
    parse_receipt_timestamp(&raw.date).context("Receipt date is unreadable")?;

    let lines = raw.priced_lines();
    if lines.is_empty() {
        anyhow::bail!("Receipt dated {} has no purchases with a numeric price", raw.date);
    }
    info!("  → {} of {} lines have a numeric price", lines.len(), raw.values.len());

    print_lines(&lines, out)?;

    let receipt_id = database::receipts::insert_receipt(conn, &raw.into_new_receipt(&lines))?;
    writeln!(out, "{}", format!("Added receipt with id {}", receipt_id).green())?;

    Ok(receipt_id)
}

fn print_lines<W: Write>(lines: &[ReceiptLine], out: &mut W) -> Result<()> {
    let mut running_total = 0.0;

    for line in lines {
        running_total += line.price_value;
        writeln!(out, "{} {} {:.2}", line.product, line.price, running_total)?;
    }

    Ok(())
}
