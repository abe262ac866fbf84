//! Text processing and analysis module

pub mod ats_audit;
pub mod normalizer;
pub mod pipeline;
pub mod resume;
pub mod structurer;
