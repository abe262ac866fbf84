//! Report assembly and output formatting module

pub mod formatter;
pub mod report;
