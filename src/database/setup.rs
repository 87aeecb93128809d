use anyhow::{Context, Result};
use rusqlite::Connection;

/// Drops and recreates every table
pub fn reset_database(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::info!("Database schema reset successfully");
    Ok(())
}

/// True once `reset_database` has created the schema
pub fn is_initialized(conn: &Connection) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('teams', 'league', 'matches')";
    let tables: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .context("Failed to inspect database schema")?;
    Ok(tables == 3)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_blank_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x INTEGER);\n\n;CREATE TABLE b (y TEXT);\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x INTEGER)", "CREATE TABLE b (y TEXT)"]);
    }

    #[test]
    fn test_reset_creates_schema_twice() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!is_initialized(&conn).unwrap());
        reset_database(&conn).unwrap();
        reset_database(&conn).unwrap();
        assert!(is_initialized(&conn).unwrap());
    }
}
