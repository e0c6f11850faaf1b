use anyhow::{Context, Result};

use super::connection::{create_pool, get_connection, DbConn};

/// Create any missing tables. Existing data is left untouched.
pub fn initialize_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::info!("Database schema initialized");
    Ok(())
}

/// Open the database at `path`, creating the schema on first use.
pub fn open_initialized(path: &str) -> Result<DbConn> {
    let pool = create_pool(path)?;
    let mut conn = get_connection(&pool)?;
    initialize_database(&mut conn)?;
    Ok(conn)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_connection;

    #[test]
    fn test_split_ignores_blank_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n ; CREATE TABLE b (y);\n");

        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut conn = memory_connection();

        initialize_database(&mut conn).unwrap();
        initialize_database(&mut conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('Receipts', 'Purchases', 'Categories')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
