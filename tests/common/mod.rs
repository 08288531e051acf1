#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use fraud_lens::records::{
    Account, CreditCard, Customer, Dataset, Loan, LoanRequest, Session, Transaction,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const CUSTOMER_CSV: &str = "\
cust_id,first_name,last_name
1,Ada,Lovelace
2,Alan,Turing
3,Grace,Hopper
";

pub const ACCOUNTS_CSV: &str = "\
account_no,cust_id,balance
A1,1,100
A2,2,0
A3,3,250.5
";

pub const TRANSACTIONS_CSV: &str = "\
tid,source_acc_no,dest_acc_no,t_type,amount,time
1,A2,,deposit,10,2024-01-03 10:00:00
2,A2,,deposit,20,2024-02-05 09:30:00
3,,A2,deposit,30,2024-01-10T12:00:00
4,A3,,withdrawal,5,2024-03-01
5,A3,A2,withdrawal,15,2024-03-15 08:00:00
";

pub const CREDIT_CARD_CSV: &str = "\
card_no,cust_id,outstanding
C1,1,500
C2,2,200
C3,1,100
C4,9,999
";

pub const SESSIONS_CSV: &str = "\
session_id,cust_id
S1,1
S2,1
S3,2
S4,3
S5,3
S6,3
";

pub const LOANS_CSV: &str = "\
principal,paid
1000,250
3000,750
";

pub const LOAN_REQUEST_CSV: &str = "\
request_id,approval
1,Approved
2,Denied
3,Approved
4,
5,Pending
";

pub const FIXTURE_FILES: [(&str, &str); 7] = [
    ("Customer.csv", CUSTOMER_CSV),
    ("Accounts.csv", ACCOUNTS_CSV),
    ("Transactions.csv", TRANSACTIONS_CSV),
    ("CreditCard.csv", CREDIT_CARD_CSV),
    ("Sessions.csv", SESSIONS_CSV),
    ("Loans.csv", LOANS_CSV),
    ("LoanRequest.csv", LOAN_REQUEST_CSV),
];

/// Write every fixture CSV into `dir`.
pub fn write_fixture_csvs(dir: &Path) {
    for (name, body) in FIXTURE_FILES {
        fs::write(dir.join(name), body).expect("failed to write fixture csv");
    }
}

const SQLITE_FIXTURE: &str = r#"
CREATE TABLE Customer (cust_id INTEGER, first_name TEXT, last_name TEXT);
INSERT INTO Customer VALUES (1, 'Ada', 'Lovelace'), (2, 'Alan', 'Turing'), (3, 'Grace', 'Hopper');
CREATE TABLE Accounts (account_no TEXT, cust_id INTEGER, balance REAL);
INSERT INTO Accounts VALUES ('A1', 1, 100.0), ('A2', 2, 0.0), ('A3', 3, 250.5);
CREATE TABLE Transactions (tid INTEGER, source_acc_no TEXT, dest_acc_no TEXT, t_type TEXT, amount REAL, time TEXT);
INSERT INTO Transactions VALUES
    (1, 'A2', NULL, 'deposit', 10, '2024-01-03 10:00:00'),
    (2, 'A2', NULL, 'deposit', 20, '2024-02-05 09:30:00'),
    (3, NULL, 'A2', 'deposit', 30, '2024-01-10T12:00:00'),
    (4, 'A3', NULL, 'withdrawal', 5, '2024-03-01'),
    (5, 'A3', 'A2', 'withdrawal', 15, '2024-03-15 08:00:00');
CREATE TABLE CreditCard (card_no TEXT, cust_id INTEGER, outstanding REAL);
INSERT INTO CreditCard VALUES ('C1', 1, 500), ('C2', 2, 200), ('C3', 1, 100), ('C4', 9, 999);
CREATE TABLE Sessions (session_id TEXT, cust_id INTEGER);
INSERT INTO Sessions VALUES ('S1', 1), ('S2', 1), ('S3', 2), ('S4', 3), ('S5', 3), ('S6', 3);
CREATE TABLE Loans (principal REAL, paid REAL);
INSERT INTO Loans VALUES (1000, 250), (3000, 750);
CREATE TABLE LoanRequest (request_id INTEGER, status TEXT);
INSERT INTO LoanRequest VALUES (1, 'Approved'), (2, 'Denied'), (3, 'Approved'), (4, NULL), (5, 'Pending');
"#;

/// Create a SQLite file at `path` holding the same rows as the CSV fixtures.
/// `LoanRequest` names its outcome column `status`, so it needs a query override.
pub async fn write_fixture_sqlite(path: &Path) -> String {
    let database_url = format!("sqlite:{}", path.display());
    let options = SqliteConnectOptions::from_str(&database_url)
        .expect("bad sqlite url")
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open fixture db");
    for stmt in SQLITE_FIXTURE.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s)
            .execute(&pool)
            .await
            .expect("failed to seed fixture db");
    }
    pool.close().await;
    database_url
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn customer(id: &str, first: &str, last: &str) -> Customer {
    Customer {
        cust_id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

pub fn account(no: &str, cust_id: &str, balance: f64) -> Account {
    Account {
        account_no: no.to_string(),
        cust_id: Some(cust_id.to_string()),
        balance,
    }
}

pub fn txn(
    tid: &str,
    source: Option<&str>,
    dest: Option<&str>,
    t_type: &str,
    amount: f64,
    on: NaiveDate,
) -> Transaction {
    Transaction {
        tid: tid.to_string(),
        source_acc_no: source.map(str::to_string),
        dest_acc_no: dest.map(str::to_string),
        t_type: t_type.to_string(),
        amount,
        day: on,
    }
}

pub fn card(cust_id: &str, outstanding: f64) -> CreditCard {
    CreditCard {
        cust_id: cust_id.to_string(),
        outstanding,
    }
}

pub fn session(id: &str, cust_id: &str) -> Session {
    Session {
        session_id: id.to_string(),
        cust_id: cust_id.to_string(),
    }
}

pub fn loan(principal: f64, paid: f64) -> Loan {
    Loan { principal, paid }
}

pub fn request(approval: Option<&str>) -> LoanRequest {
    LoanRequest {
        approval: approval.map(str::to_string),
    }
}

/// A small dataset where every view has something to show.
pub fn sample_dataset() -> Dataset {
    Dataset {
        customers: vec![
            customer("1", "Ada", "Lovelace"),
            customer("2", "Alan", "Turing"),
            customer("3", "Grace", "Hopper"),
        ],
        accounts: vec![
            account("A1", "1", 100.0),
            account("A2", "2", 0.0),
            account("A3", "3", 250.5),
        ],
        transactions: vec![
            txn("1", Some("A2"), None, "deposit", 10.0, day(2024, 1, 3)),
            txn("2", Some("A2"), None, "deposit", 20.0, day(2024, 2, 5)),
            txn("3", None, Some("A2"), "deposit", 30.0, day(2024, 1, 10)),
            txn("4", Some("A3"), None, "withdrawal", 5.0, day(2024, 3, 1)),
            txn("5", Some("A3"), Some("A2"), "withdrawal", 15.0, day(2024, 3, 15)),
        ],
        credit_cards: vec![
            card("1", 500.0),
            card("2", 200.0),
            card("1", 100.0),
            card("9", 999.0),
        ],
        sessions: vec![
            session("S1", "1"),
            session("S2", "1"),
            session("S3", "2"),
            session("S4", "3"),
            session("S5", "3"),
            session("S6", "3"),
        ],
        loans: vec![loan(1000.0, 250.0), loan(3000.0, 750.0)],
        loan_requests: vec![
            request(Some("Approved")),
            request(Some("Denied")),
            request(Some("Approved")),
            request(None),
            request(Some("Pending")),
        ],
    }
}
