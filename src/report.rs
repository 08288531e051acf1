//! Summary views paired with their dashboard captions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Value, json};

use crate::aggregate::Summary;
use crate::error::LensError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    Mix,
    Cards,
    Sessions,
    Dormant,
    Last,
    Loans,
    Requests,
}

impl ViewName {
    pub const ALL: [ViewName; 7] = [
        ViewName::Mix,
        ViewName::Cards,
        ViewName::Sessions,
        ViewName::Dormant,
        ViewName::Last,
        ViewName::Loans,
        ViewName::Requests,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Mix => "mix",
            ViewName::Cards => "cards",
            ViewName::Sessions => "sessions",
            ViewName::Dormant => "dormant",
            ViewName::Last => "last",
            ViewName::Loans => "loans",
            ViewName::Requests => "requests",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewName::Mix => "Transaction Mix by Type",
            ViewName::Cards => "Top 5 Credit-Card Outstanding",
            ViewName::Sessions => "Customers with Multiple Sessions",
            ViewName::Dormant => "Dormant Accounts with Balances",
            ViewName::Last => "Distribution of Last Transaction Dates",
            ViewName::Loans => "Loan Portfolio - Principal vs. Paid",
            ViewName::Requests => "Loan-Request Approval Funnel",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewName::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| LensError::UnknownView(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Captions {
    pub mix: String,
    pub cards: String,
    pub sessions: String,
    pub dormant: String,
    pub last: String,
    pub loans: String,
    pub requests: String,
}

impl Captions {
    pub fn new(repayment_ratio: f64) -> Self {
        Self {
            mix: "Deposits, withdrawals and transfers occur in balanced proportions. \
                  Deviations trigger anomaly alerts."
                .to_string(),
            cards: "Outstanding credit risk is concentrated in five customers; \
                    these accounts need stricter monitoring."
                .to_string(),
            sessions: "Customers with many sessions provide stable behavioural profiles; \
                       abrupt changes may indicate credential theft."
                .to_string(),
            dormant: "Dormant, funded accounts are classic laundering targets.".to_string(),
            last: "Most customers transacted recently; long-inactive ones \
                   should be watched for sudden large withdrawals."
                .to_string(),
            loans: repaid_caption(repayment_ratio),
            requests: "Approval funnel shows current conversion rate of loan requests."
                .to_string(),
        }
    }

    pub fn get(&self, view: ViewName) -> &str {
        match view {
            ViewName::Mix => &self.mix,
            ViewName::Cards => &self.cards,
            ViewName::Sessions => &self.sessions,
            ViewName::Dormant => &self.dormant,
            ViewName::Last => &self.last,
            ViewName::Loans => &self.loans,
            ViewName::Requests => &self.requests,
        }
    }
}

pub fn repaid_caption(repayment_ratio: f64) -> String {
    format!(
        "Roughly {:.1}% of total principal has been repaid.",
        repayment_ratio * 100.0
    )
}

/// The immutable result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub captions: Captions,
}

impl Report {
    pub fn new(summary: Summary) -> Self {
        let captions = Captions::new(summary.repayment_ratio);
        Self { summary, captions }
    }

    /// Rows of a single view as JSON.
    pub fn rows(&self, view: ViewName) -> Result<Value, serde_json::Error> {
        let s = &self.summary;
        match view {
            ViewName::Mix => serde_json::to_value(&s.transaction_mix),
            ViewName::Cards => serde_json::to_value(&s.top_cardholders),
            ViewName::Sessions => serde_json::to_value(&s.multi_session),
            ViewName::Dormant => serde_json::to_value(&s.dormant_accounts),
            ViewName::Last => serde_json::to_value(&s.last_activity),
            ViewName::Loans => Ok(json!([
                { "category": "total_principal", "usd": s.loan_portfolio.total_principal },
                { "category": "total_paid", "usd": s.loan_portfolio.total_paid },
            ])),
            ViewName::Requests => serde_json::to_value(&s.approval_funnel),
        }
    }

    pub fn view(&self, view: ViewName) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "view": view,
            "title": view.title(),
            "rows": self.rows(view)?,
            "caption": self.captions.get(view),
        }))
    }
}
