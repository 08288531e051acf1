//! The seven summary views.
//!
//! Each view is a pure function of the [`Dataset`]. Joins against customers are
//! inner joins: a customer without cards or sessions never shows up, and a
//! grouped key without a matching customer is dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::LensError;
use crate::records::Dataset;

pub const TOP_CARDHOLDERS: usize = 5;
pub const UNKNOWN_APPROVAL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxnMix {
    pub t_type: String,
    pub txn_count: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardExposure {
    pub cust_id: String,
    pub customer: String,
    pub total_outstanding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionActivity {
    pub cust_id: String,
    pub customer: String,
    pub session_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DormantAccount {
    pub account_no: String,
    pub cust_id: Option<String>,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastActivity {
    pub cust_id: String,
    pub customer: String,
    pub last_time: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanPortfolio {
    pub total_principal: f64,
    pub total_paid: f64,
}

impl LoanPortfolio {
    /// `total_paid / total_principal`. Zero principal has no ratio.
    pub fn repayment_ratio(&self) -> Result<f64, LensError> {
        if self.total_principal == 0.0 {
            return Err(LensError::degenerate(
                "loan portfolio",
                "total principal is zero",
            ));
        }
        Ok(self.total_paid / self.total_principal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalCount {
    pub approval: String,
    pub count: u64,
}

/// Everything the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub transaction_mix: Vec<TxnMix>,
    pub top_cardholders: Vec<CardExposure>,
    pub multi_session: Vec<SessionActivity>,
    pub dormant_accounts: Vec<DormantAccount>,
    pub last_activity: Vec<LastActivity>,
    pub loan_portfolio: LoanPortfolio,
    pub repayment_ratio: f64,
    pub approval_funnel: Vec<ApprovalCount>,
}

/// Compute all seven views. The first failing view aborts the run.
pub fn summarize(data: &Dataset) -> Result<Summary, LensError> {
    let loan_portfolio = loan_portfolio(data);
    let summary = Summary {
        transaction_mix: transaction_mix(data),
        top_cardholders: top_cardholders(data)?,
        multi_session: multi_session_customers(data)?,
        dormant_accounts: dormant_accounts(data),
        last_activity: last_activity(data)?,
        repayment_ratio: loan_portfolio.repayment_ratio()?,
        loan_portfolio,
        approval_funnel: approval_funnel(data),
    };
    debug!(
        mix = summary.transaction_mix.len(),
        cards = summary.top_cardholders.len(),
        sessions = summary.multi_session.len(),
        dormant = summary.dormant_accounts.len(),
        last = summary.last_activity.len(),
        requests = summary.approval_funnel.len(),
        "summary computed"
    );
    Ok(summary)
}

/// Count and total amount per transaction type, ordered by type.
pub fn transaction_mix(data: &Dataset) -> Vec<TxnMix> {
    let mut by_type: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for txn in &data.transactions {
        let entry = by_type.entry(txn.t_type.as_str()).or_default();
        entry.0 += 1;
        entry.1 += txn.amount;
    }
    by_type
        .into_iter()
        .map(|(t_type, (txn_count, total_amount))| TxnMix {
            t_type: t_type.to_string(),
            txn_count,
            total_amount,
        })
        .collect()
}

/// The customers with the largest summed card outstanding, largest first.
pub fn top_cardholders(data: &Dataset) -> Result<Vec<CardExposure>, LensError> {
    let mut outstanding = Grouped::default();
    for card in &data.credit_cards {
        *outstanding.entry(&card.cust_id, 0.0) += card.outstanding;
    }

    let names = display_names(data);
    let grouped = outstanding.len();
    let mut rows: Vec<CardExposure> = outstanding
        .into_groups()
        .filter_map(|(cust_id, total_outstanding)| {
            let customer = names.get(cust_id)?.clone();
            Some(CardExposure {
                cust_id: cust_id.to_string(),
                customer,
                total_outstanding,
            })
        })
        .collect();
    ensure_joined("top cardholders", grouped, rows.len())?;

    rows.sort_by(|a, b| b.total_outstanding.total_cmp(&a.total_outstanding));
    rows.truncate(TOP_CARDHOLDERS);
    Ok(rows)
}

/// Customers with more than one session.
pub fn multi_session_customers(data: &Dataset) -> Result<Vec<SessionActivity>, LensError> {
    let mut counts = Grouped::default();
    for session in &data.sessions {
        *counts.entry(&session.cust_id, 0u64) += 1;
    }

    let names = display_names(data);
    let grouped = counts.len();
    let joined: Vec<SessionActivity> = counts
        .into_groups()
        .filter_map(|(cust_id, session_count)| {
            let customer = names.get(cust_id)?.clone();
            Some(SessionActivity {
                cust_id: cust_id.to_string(),
                customer,
                session_count,
            })
        })
        .collect();
    ensure_joined("multi-session customers", grouped, joined.len())?;

    Ok(joined
        .into_iter()
        .filter(|row| row.session_count > 1)
        .collect())
}

/// Accounts that are neither source nor destination of any transaction.
pub fn dormant_accounts(data: &Dataset) -> Vec<DormantAccount> {
    let active: HashSet<&str> = data
        .transactions
        .iter()
        .flat_map(|t| [t.source_acc_no.as_deref(), t.dest_acc_no.as_deref()])
        .flatten()
        .collect();

    data.accounts
        .iter()
        .filter(|account| !active.contains(account.account_no.as_str()))
        .map(|account| DormantAccount {
            account_no: account.account_no.clone(),
            cust_id: account.cust_id.clone(),
            balance: account.balance,
        })
        .collect()
}

/// Latest transaction day per customer, attributing each transaction to the
/// owner of its source account.
pub fn last_activity(data: &Dataset) -> Result<Vec<LastActivity>, LensError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    for account in &data.accounts {
        if let Some(cust_id) = account.cust_id.as_deref() {
            owners.entry(account.account_no.as_str()).or_insert(cust_id);
        }
    }

    let mut latest: Grouped<'_, Option<NaiveDate>> = Grouped::default();
    for txn in &data.transactions {
        let Some(owner) = txn
            .source_acc_no
            .as_deref()
            .and_then(|acc| owners.get(acc).copied())
        else {
            continue;
        };
        let slot = latest.entry(owner, None);
        if slot.is_none_or(|day| txn.day > day) {
            *slot = Some(txn.day);
        }
    }

    let names = display_names(data);
    let grouped = latest.len();
    let rows: Vec<LastActivity> = latest
        .into_groups()
        .filter_map(|(cust_id, day)| {
            Some(LastActivity {
                cust_id: cust_id.to_string(),
                customer: names.get(cust_id)?.clone(),
                last_time: day?,
            })
        })
        .collect();
    ensure_joined("last activity", grouped, rows.len())?;
    Ok(rows)
}

pub fn loan_portfolio(data: &Dataset) -> LoanPortfolio {
    data.loans.iter().fold(
        LoanPortfolio {
            total_principal: 0.0,
            total_paid: 0.0,
        },
        |acc, loan| LoanPortfolio {
            total_principal: acc.total_principal + loan.principal,
            total_paid: acc.total_paid + loan.paid,
        },
    )
}

/// Loan requests per approval outcome, most frequent first.
pub fn approval_funnel(data: &Dataset) -> Vec<ApprovalCount> {
    let mut counts = Grouped::default();
    for request in &data.loan_requests {
        let outcome = request.approval.as_deref().unwrap_or(UNKNOWN_APPROVAL);
        *counts.entry(outcome, 0u64) += 1;
    }
    let mut rows: Vec<ApprovalCount> = counts
        .into_groups()
        .map(|(approval, count)| ApprovalCount {
            approval: approval.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn display_names(data: &Dataset) -> HashMap<&str, String> {
    let mut names = HashMap::with_capacity(data.customers.len());
    for customer in &data.customers {
        names
            .entry(customer.cust_id.as_str())
            .or_insert_with(|| customer.display_name());
    }
    names
}

/// A customer join that matched nothing while there was something to join
/// means the identifiers do not line up.
fn ensure_joined(view: &'static str, grouped: usize, joined: usize) -> Result<(), LensError> {
    if grouped > 0 && joined == 0 {
        return Err(LensError::degenerate(
            view,
            format!("none of {grouped} grouped customer ids matched a customer"),
        ));
    }
    Ok(())
}

/// Groups keyed by string, kept in first-seen order.
struct Grouped<'a, V> {
    index: HashMap<&'a str, usize>,
    groups: Vec<(&'a str, V)>,
}

impl<V> Default for Grouped<'_, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<'a, V> Grouped<'a, V> {
    fn entry(&mut self, key: &'a str, init: V) -> &mut V {
        let i = *self.index.entry(key).or_insert_with(|| {
            self.groups.push((key, init));
            self.groups.len() - 1
        });
        &mut self.groups[i].1
    }

    fn len(&self) -> usize {
        self.groups.len()
    }

    fn into_groups(self) -> impl Iterator<Item = (&'a str, V)> {
        self.groups.into_iter()
    }
}
