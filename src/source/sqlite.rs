use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Pool, Row, Sqlite, TypeInfo, ValueRef};

use crate::error::LensError;
use crate::schema::TableName;
use crate::table::{Table, Value};

pub type SqlitePool = Pool<Sqlite>;

/// Open a read-only pool on `database_url`.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, LensError> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Run `sql` and project the result onto the schema of `table`.
/// An empty result carries no column metadata and is taken as the declared schema.
pub async fn fetch_table(
    pool: &SqlitePool,
    table: TableName,
    sql: &str,
) -> Result<Table, LensError> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;

    let columns: Vec<String> = match rows.first() {
        Some(first) => first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        None => table.columns().iter().map(|c| c.to_string()).collect(),
    };

    let values = rows
        .iter()
        .map(row_values)
        .collect::<Result<Vec<_>, LensError>>()?;

    Table::project(table, &columns, values)
}

fn row_values(row: &SqliteRow) -> Result<Vec<Value>, LensError> {
    (0..row.columns().len())
        .map(|i| {
            let raw = row.try_get_raw(i)?;
            if raw.is_null() {
                return Ok(Value::Null);
            }
            let value = match raw.type_info().name() {
                "INTEGER" | "INT8" | "BOOLEAN" => Value::Integer(row.try_get::<i64, _>(i)?),
                "REAL" | "NUMERIC" => Value::Real(row.try_get::<f64, _>(i)?),
                _ => Value::Text(row.try_get::<String, _>(i)?),
            };
            Ok(value)
        })
        .collect()
}
