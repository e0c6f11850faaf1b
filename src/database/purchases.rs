use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::connection::DbConn;
use super::models::{CategorizedPurchaseRow, CategoryId, NewPurchase, Purchase, PurchaseId, ReceiptId};

pub(super) fn insert_purchase(
    conn: &Connection,
    purchase: &NewPurchase,
    receipt_id: ReceiptId,
) -> Result<PurchaseId> {
    let sql = "INSERT INTO Purchases (name, price, receiptId) VALUES (?1, ?2, ?3) RETURNING id";

    conn.query_row(
        sql,
        params![purchase.product, purchase.price, receipt_id],
        |row| row.get(0),
    )
    .context("Failed to insert purchase")
}

fn parse_purchase_row(row: &rusqlite::Row) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: row.get(0)?,
        product: row.get(1)?,
        price: row.get(2)?,
        receipt_id: row.get(3)?,
        category_id: row.get(4)?,
    })
}

pub fn list_unassigned(conn: &mut DbConn) -> Result<Vec<Purchase>> {
    let sql = "SELECT id, name, price, receiptId, categoryId FROM Purchases WHERE categoryId IS NULL ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_purchase_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read unassigned purchases")?;

    Ok(rows)
}

pub fn set_category(
    conn: &mut DbConn,
    purchase_id: PurchaseId,
    category_id: CategoryId,
) -> Result<()> {
    let sql = "UPDATE Purchases SET categoryId = ?1 WHERE id = ?2";

    let updated = conn
        .execute(sql, params![category_id, purchase_id])
        .context("Failed to update purchase category")?;

    if updated == 0 {
        anyhow::bail!("No purchase with id {}", purchase_id);
    }

    Ok(())
}

/// Every purchase with a category, joined with its receipt's date text.
pub fn list_categorized_with_dates(conn: &mut DbConn) -> Result<Vec<CategorizedPurchaseRow>> {
    let sql = "
        SELECT pu.id, pu.name, pu.price, pu.categoryId, r.date
        FROM Purchases pu
        JOIN Receipts r ON pu.receiptId = r.id
        WHERE pu.categoryId IS NOT NULL
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CategorizedPurchaseRow {
                purchase_id: row.get(0)?,
                product: row.get(1)?,
                price: row.get(2)?,
                category_id: row.get(3)?,
                receipt_date: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
