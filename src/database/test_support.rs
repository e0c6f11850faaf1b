use super::connection::{create_memory_pool, get_connection, DbConn};
use super::setup::initialize_database;

/// Fresh in-memory database with the schema applied.
pub fn memory_connection() -> DbConn {
    let pool = create_memory_pool().unwrap();
    let mut conn = get_connection(&pool).unwrap();
    initialize_database(&mut conn).unwrap();
    conn
}

pub fn seed_categories(conn: &mut DbConn, names: &[&str]) {
    for name in names {
        conn.execute("INSERT INTO Categories (Category) VALUES (?1)", [name])
            .unwrap();
    }
}

/// Insert one receipt holding a single purchase and return the purchase id.
pub fn seed_purchase(
    conn: &mut DbConn,
    date: &str,
    product: &str,
    category_id: Option<i64>,
) -> i64 {
    conn.execute(
        "INSERT INTO Receipts (date, amount) VALUES (?1, ?2)",
        rusqlite::params![date, "0.00"],
    )
    .unwrap();
    let receipt_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO Purchases (name, price, receiptId, categoryId) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![product, "1.00", receipt_id, category_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}
