//! In-memory tabular structure shared by every source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::LensError;
use crate::schema::TableName;

static NULL: Value = Value::Null;

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Infer a cell read from a CSV file: empty is null, then integer, float, text.
    pub fn infer(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Integer(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Real(f),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Join key form: `7`, `7.0` and `"7"` all become `"7"`.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(i.to_string()),
            Value::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some((*f as i64).to_string())
            }
            Value::Real(f) => Some(f.to_string()),
            Value::Text(s) => Some(s.trim().to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Real(f) => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Value::Null => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            other => other.as_key(),
        }
    }
}

/// Calendar day of a timestamp cell. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`,
/// `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM` and plain `YYYY-MM-DD`.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: TableName,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table holding exactly the declared columns of `name`, in declared order.
    /// Extra source columns are dropped; a missing declared column is an error.
    pub fn project(
        name: TableName,
        source_columns: &[String],
        rows: Vec<Vec<Value>>,
    ) -> Result<Self, LensError> {
        let picks = name
            .columns()
            .iter()
            .map(|col| {
                source_columns
                    .iter()
                    .position(|c| c.trim() == *col)
                    .ok_or_else(|| LensError::MissingColumn {
                        table: name,
                        column: col.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = rows
            .into_iter()
            .map(|row| {
                picks
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self {
            name,
            columns: name.columns().iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    pub fn name(&self) -> TableName {
        self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().enumerate().map(|(index, cells)| RowRef {
            table: self,
            index,
            cells,
        })
    }

    fn column_index(&self, column: &str) -> Result<usize, LensError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| LensError::MissingColumn {
                table: self.name,
                column: column.to_string(),
            })
    }
}

/// Borrowed view of one row with typed accessors.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
    cells: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Result<&'a Value, LensError> {
        let i = self.table.column_index(column)?;
        Ok(self.cells.get(i).unwrap_or(&NULL))
    }

    fn invalid(&self, column: &str, reason: impl Into<String>) -> LensError {
        LensError::InvalidValue {
            table: self.table.name,
            column: column.to_string(),
            row: self.index,
            reason: reason.into(),
        }
    }

    pub fn key(&self, column: &str) -> Result<String, LensError> {
        self.get(column)?
            .as_key()
            .ok_or_else(|| self.invalid(column, "missing identifier"))
    }

    pub fn opt_key(&self, column: &str) -> Result<Option<String>, LensError> {
        Ok(self.get(column)?.as_key())
    }

    pub fn number(&self, column: &str) -> Result<f64, LensError> {
        let value = self.get(column)?;
        value
            .as_f64()
            .ok_or_else(|| self.invalid(column, format!("expected a number, got {value:?}")))
    }

    pub fn text(&self, column: &str) -> Result<Option<String>, LensError> {
        Ok(self.get(column)?.as_text())
    }

    pub fn day(&self, column: &str) -> Result<NaiveDate, LensError> {
        match self.get(column)? {
            Value::Text(raw) => {
                parse_day(raw).ok_or_else(|| self.invalid(column, format!("bad date `{raw}`")))
            }
            other => Err(self.invalid(column, format!("expected a date, got {other:?}"))),
        }
    }
}
