//! Document exporters: JSON, spreadsheet, and the printable assembly.
//!
//! Exporters consume a [`Budget`](crate::Budget) read-only; none of them
//! mutate the aggregate.

pub mod document;
pub mod json;
pub mod sheet;
