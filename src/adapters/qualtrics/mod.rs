//! Qualtrics v3 REST adapter
//!
//! [`QualtricsClient`] is the transport; the response export calls are
//! exposed through the [`ResponseExportApi`] trait and the survey management
//! calls as inherent methods.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod models;
mod responses;
mod surveys;

pub use api::ResponseExportApi;
pub use client::{QualtricsClient, API_TOKEN_HEADER};
