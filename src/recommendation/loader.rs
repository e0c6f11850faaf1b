use anyhow::{Context, Result};

use super::timestamps::parse_receipt_timestamp;
use super::types::PurchaseRecord;
use crate::database::{self, CategorizedPurchaseRow, DbConn};
use crate::errors::query_context;

/// Load every categorized purchase with its receipt time.
///
/// One unreadable receipt date fails the whole load; no partial history is
/// returned.
pub fn load_purchase_history(conn: &mut DbConn) -> Result<Vec<PurchaseRecord>> {
    let rows = database::purchases::list_categorized_with_dates(conn)
        .context(query_context("purchase history"))?;

    rows.into_iter().map(to_record).collect()
}

fn to_record(row: CategorizedPurchaseRow) -> Result<PurchaseRecord> {
    let receipt_date = parse_receipt_timestamp(&row.receipt_date)
        .with_context(|| format!("Purchase {} has an unreadable receipt date", row.purchase_id))?;

    Ok(PurchaseRecord {
        purchase_id: row.purchase_id,
        product: row.product,
        price: row.price,
        category_id: row.category_id,
        receipt_date,
    })
}
