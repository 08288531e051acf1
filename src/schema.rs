//! Declared schemas of the seven banking tables.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    Customer,
    Accounts,
    Transactions,
    CreditCard,
    Sessions,
    Loans,
    LoanRequest,
}

impl TableName {
    /// Load order used at startup.
    pub const ALL: [TableName; 7] = [
        TableName::Customer,
        TableName::Accounts,
        TableName::Transactions,
        TableName::CreditCard,
        TableName::Sessions,
        TableName::Loans,
        TableName::LoanRequest,
    ];

    /// File stem and SQL table name.
    pub fn stem(self) -> &'static str {
        match self {
            TableName::Customer => "Customer",
            TableName::Accounts => "Accounts",
            TableName::Transactions => "Transactions",
            TableName::CreditCard => "CreditCard",
            TableName::Sessions => "Sessions",
            TableName::Loans => "Loans",
            TableName::LoanRequest => "LoanRequest",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            TableName::Customer => &["cust_id", "first_name", "last_name"],
            TableName::Accounts => &["account_no", "cust_id", "balance"],
            TableName::Transactions => &[
                "tid",
                "source_acc_no",
                "dest_acc_no",
                "t_type",
                "amount",
                "time",
            ],
            TableName::CreditCard => &["cust_id", "outstanding"],
            TableName::Sessions => &["session_id", "cust_id"],
            TableName::Loans => &["principal", "paid"],
            TableName::LoanRequest => &["approval"],
        }
    }

    pub fn csv_file_name(self) -> String {
        format!("{}.csv", self.stem())
    }

    /// Query used against the relational store when no override is configured.
    pub fn fallback_query(self) -> String {
        format!("SELECT {} FROM {}", self.columns().join(", "), self.stem())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table `{}`", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for TableName {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .into_iter()
            .find(|t| t.stem().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}
