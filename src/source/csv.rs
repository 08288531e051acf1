use std::path::Path;

use crate::error::LensError;
use crate::schema::TableName;
use crate::table::{Table, Value};

/// Read `path` as a headed CSV file and project it onto the schema of `table`.
pub fn read_csv(table: TableName, path: &Path) -> Result<Table, LensError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let rows = reader
        .records()
        .map(|record| record.map(|rec| rec.iter().map(Value::infer).collect()))
        .collect::<Result<Vec<Vec<Value>>, csv::Error>>()?;

    Table::project(table, &headers, rows)
}
