use tracing::info;

use crate::aggregate::summarize;
use crate::config::SourceConfig;
use crate::error::LensError;
use crate::records::Dataset;
use crate::report::Report;
use crate::source::{SourcePlan, load_all};

/// Resolve sources, load the seven tables, aggregate and caption them.
/// Any failure along the way aborts the whole run.
pub async fn build_report(cfg: &SourceConfig) -> Result<Report, LensError> {
    let plan = SourcePlan::resolve(cfg)?;
    let tables = load_all(&plan).await?;
    let dataset = Dataset::from_tables(&tables)?;
    let summary = summarize(&dataset)?;
    info!(
        transactions = dataset.transactions.len(),
        accounts = dataset.accounts.len(),
        dormant = summary.dormant_accounts.len(),
        repayment_ratio = summary.repayment_ratio,
        "dashboard summary ready"
    );
    Ok(Report::new(summary))
}
