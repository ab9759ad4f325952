//! Vacancy search aggregation: one query fans out to external job boards and
//! comes back as site-tagged posting lists.

pub mod config;
pub mod error;
pub mod search;
pub mod telemetry;
