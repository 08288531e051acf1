//! Table loader.
//!
//! Every table gets an explicit [`TableSource`], decided once by
//! [`SourcePlan::resolve`]: a local `<Table>.csv` wins, otherwise a query against
//! the configured relational store, otherwise the table has no source and
//! startup fails.

pub mod csv;
pub mod sqlite;

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::LensError;
use crate::schema::TableName;
use crate::table::Table;
use sqlite::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Csv(PathBuf),
    Query { database_url: String, sql: String },
}

impl TableSource {
    pub fn kind(&self) -> &'static str {
        match self {
            TableSource::Csv(_) => "csv",
            TableSource::Query { .. } => "query",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourcePlan {
    entries: Vec<(TableName, TableSource)>,
}

impl SourcePlan {
    pub fn resolve(cfg: &SourceConfig) -> Result<Self, LensError> {
        let mut overrides = HashMap::new();
        for (name, sql) in &cfg.queries {
            match name.parse::<TableName>() {
                Ok(table) => {
                    overrides.insert(table, sql.clone());
                }
                Err(e) => warn!(error = %e, "ignoring query override"),
            }
        }

        let entries = TableName::ALL
            .into_iter()
            .map(|table| {
                let path = cfg.data_dir.join(table.csv_file_name());
                let source = if path.is_file() {
                    TableSource::Csv(path)
                } else if let Some(url) = cfg.database_url.as_ref() {
                    TableSource::Query {
                        database_url: url.clone(),
                        sql: overrides
                            .get(&table)
                            .cloned()
                            .unwrap_or_else(|| table.fallback_query()),
                    }
                } else {
                    return Err(LensError::MissingDataSource(table));
                };
                debug!(%table, kind = source.kind(), "resolved table source");
                Ok((table, source))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn source(&self, table: TableName) -> Option<&TableSource> {
        self.entries
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TableName, &TableSource)> {
        self.entries.iter().map(|(t, s)| (*t, s))
    }
}

/// The seven loaded tables.
#[derive(Debug, Clone)]
pub struct Tables {
    pub customers: Table,
    pub accounts: Table,
    pub transactions: Table,
    pub credit_cards: Table,
    pub sessions: Table,
    pub loans: Table,
    pub loan_requests: Table,
}

impl Tables {
    pub fn get(&self, table: TableName) -> &Table {
        match table {
            TableName::Customer => &self.customers,
            TableName::Accounts => &self.accounts,
            TableName::Transactions => &self.transactions,
            TableName::CreditCard => &self.credit_cards,
            TableName::Sessions => &self.sessions,
            TableName::Loans => &self.loans,
            TableName::LoanRequest => &self.loan_requests,
        }
    }
}

/// Pools opened while loading, one per database URL.
#[derive(Default)]
pub struct PoolCache {
    pools: HashMap<String, SqlitePool>,
}

impl PoolCache {
    async fn get(&mut self, database_url: &str) -> Result<SqlitePool, LensError> {
        if let Some(pool) = self.pools.get(database_url) {
            return Ok(pool.clone());
        }
        let pool = sqlite::open_pool(database_url).await?;
        self.pools.insert(database_url.to_string(), pool.clone());
        Ok(pool)
    }

    pub async fn close(self) {
        for pool in self.pools.into_values() {
            pool.close().await;
        }
    }
}

/// Load one table from its resolved source.
pub async fn load_table(
    table: TableName,
    source: &TableSource,
    pools: &mut PoolCache,
) -> Result<Table, LensError> {
    let loaded = match source {
        TableSource::Csv(path) => csv::read_csv(table, path)?,
        TableSource::Query { database_url, sql } => {
            let pool = pools.get(database_url).await?;
            sqlite::fetch_table(&pool, table, sql).await?
        }
    };
    info!(
        %table,
        kind = source.kind(),
        rows = loaded.len(),
        "loaded table"
    );
    Ok(loaded)
}

/// Load all seven tables in order. The first failure aborts the whole load.
pub async fn load_all(plan: &SourcePlan) -> Result<Tables, LensError> {
    let mut pools = PoolCache::default();
    let result = load_each(plan, &mut pools).await;
    pools.close().await;
    result
}

async fn load_each(plan: &SourcePlan, pools: &mut PoolCache) -> Result<Tables, LensError> {
    let mut loaded = HashMap::new();
    for (table, source) in plan.iter() {
        loaded.insert(table, load_table(table, source, pools).await?);
    }

    let mut take = |table: TableName| {
        loaded
            .remove(&table)
            .ok_or(LensError::MissingDataSource(table))
    };

    Ok(Tables {
        customers: take(TableName::Customer)?,
        accounts: take(TableName::Accounts)?,
        transactions: take(TableName::Transactions)?,
        credit_cards: take(TableName::CreditCard)?,
        sessions: take(TableName::Sessions)?,
        loans: take(TableName::Loans)?,
        loan_requests: take(TableName::LoanRequest)?,
    })
}
