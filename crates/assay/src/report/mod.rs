//! Presentation of analysis results.
//!
//! [`flatten_summary`] turns a nested summary into display rows.
//! [`ReportWriter`] renders a whole analysis into a report directory.

mod table;
mod writer;

pub use table::{SummaryRow, flatten_summary};
pub use writer::ReportWriter;
