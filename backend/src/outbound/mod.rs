//! Outbound adapters implementing the domain ports against infrastructure.

pub mod cache;
pub mod persistence;
