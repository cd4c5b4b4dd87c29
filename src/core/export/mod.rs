//! Response export orchestration
//!
//! - [`ExportWorkflow`] drives submit, poll, fetch and extract
//! - [`ExportSummary`] reports the outcome

pub mod summary;
pub mod workflow;

pub use summary::ExportSummary;
pub use workflow::ExportWorkflow;
