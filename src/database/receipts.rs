use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{NewReceipt, ReceiptId};
use super::purchases::insert_purchase;

/// Store a receipt and all of its purchases atomically.
///
/// Either every row lands or none does; the transaction rolls back when it is
/// dropped on an early return.
pub fn insert_receipt(conn: &mut DbConn, receipt: &NewReceipt) -> Result<ReceiptId> {
    let tx = conn
        .transaction()
        .context("Failed to start receipt transaction")?;

    let receipt_id: ReceiptId = tx
        .query_row(
            "INSERT INTO Receipts (date, amount) VALUES (?1, ?2) RETURNING id",
            params![receipt.date, receipt.amount],
            |row| row.get(0),
        )
        .context("Failed to insert receipt")?;

    for purchase in &receipt.purchases {
        insert_purchase(&tx, purchase, receipt_id).with_context(|| {
            format!("Failed to add purchase '{}' to receipt {}", purchase.product, receipt_id)
        })?;
    }

    tx.commit()
        .context("Failed to commit receipt transaction")?;

    log::debug!(
        "Inserted receipt {} with {} purchases",
        receipt_id,
        receipt.purchases.len()
    );
    Ok(receipt_id)
}
