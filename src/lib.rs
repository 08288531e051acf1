pub mod aggregate;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod router;
pub mod schema;
pub mod source;
pub mod table;

pub use aggregate::{Summary, summarize};
pub use error::LensError;
pub use records::Dataset;
pub use report::Report;
