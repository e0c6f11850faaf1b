use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{Category, CategoryId};

fn parse_category_row(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Category>> {
    let sql = "SELECT id, Category FROM Categories ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_category_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read categories")?;

    Ok(rows)
}

pub fn find_name_by_id(conn: &mut DbConn, id: CategoryId) -> Result<String> {
    let sql = "SELECT Category FROM Categories WHERE id = ?1";

    conn.query_row(sql, params![id], |row| row.get(0))
        .optional()
        .context("Failed to query category by id")?
        .ok_or_else(|| anyhow::anyhow!("No category with id {}", id))
}

pub fn insert_category(conn: &mut DbConn, name: &str) -> Result<Category> {
    let sql = "INSERT INTO Categories (Category) VALUES (?1) RETURNING id, Category";

    conn.query_row(sql, params![name], parse_category_row)
        .with_context(|| format!("Failed to insert category '{}'", name))
}
