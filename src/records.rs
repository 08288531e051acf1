//! Typed rows built from the loaded tables.

use chrono::NaiveDate;

use crate::error::LensError;
use crate::source::Tables;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub cust_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_no: String,
    pub cust_id: Option<String>,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub tid: String,
    pub source_acc_no: Option<String>,
    pub dest_acc_no: Option<String>,
    pub t_type: String,
    pub amount: f64,
    /// Calendar day of the `time` column.
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    pub cust_id: String,
    pub outstanding: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub cust_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub principal: f64,
    pub paid: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    pub approval: Option<String>,
}

/// All seven tables as typed records. Read-only after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub credit_cards: Vec<CreditCard>,
    pub sessions: Vec<Session>,
    pub loans: Vec<Loan>,
    pub loan_requests: Vec<LoanRequest>,
}

impl Dataset {
    pub fn from_tables(tables: &Tables) -> Result<Self, LensError> {
        Ok(Self {
            customers: customers(&tables.customers)?,
            accounts: accounts(&tables.accounts)?,
            transactions: transactions(&tables.transactions)?,
            credit_cards: credit_cards(&tables.credit_cards)?,
            sessions: sessions(&tables.sessions)?,
            loans: loans(&tables.loans)?,
            loan_requests: loan_requests(&tables.loan_requests)?,
        })
    }
}

fn customers(table: &Table) -> Result<Vec<Customer>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(Customer {
                cust_id: row.key("cust_id")?,
                first_name: row.text("first_name")?.unwrap_or_default(),
                last_name: row.text("last_name")?.unwrap_or_default(),
            })
        })
        .collect()
}

fn accounts(table: &Table) -> Result<Vec<Account>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(Account {
                account_no: row.key("account_no")?,
                cust_id: row.opt_key("cust_id")?,
                balance: row.number("balance")?,
            })
        })
        .collect()
}

fn transactions(table: &Table) -> Result<Vec<Transaction>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(Transaction {
                tid: row.key("tid")?,
                source_acc_no: row.opt_key("source_acc_no")?,
                dest_acc_no: row.opt_key("dest_acc_no")?,
                t_type: row
                    .text("t_type")?
                    .unwrap_or_else(|| "unknown".to_string()),
                amount: row.number("amount")?,
                day: row.day("time")?,
            })
        })
        .collect()
}

fn credit_cards(table: &Table) -> Result<Vec<CreditCard>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(CreditCard {
                cust_id: row.key("cust_id")?,
                outstanding: row.number("outstanding")?,
            })
        })
        .collect()
}

fn sessions(table: &Table) -> Result<Vec<Session>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(Session {
                session_id: row.key("session_id")?,
                cust_id: row.key("cust_id")?,
            })
        })
        .collect()
}

fn loans(table: &Table) -> Result<Vec<Loan>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(Loan {
                principal: row.number("principal")?,
                paid: row.number("paid")?,
            })
        })
        .collect()
}

fn loan_requests(table: &Table) -> Result<Vec<LoanRequest>, LensError> {
    table
        .rows()
        .map(|row| {
            Ok(LoanRequest {
                approval: row
                    .text("approval")?
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            })
        })
        .collect()
}
