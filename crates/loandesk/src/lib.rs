//! Deterministic loan eligibility assessment over extracted applicant
//! documents: the calculation engine, the query generator, and the intake
//! and checklist plumbing around them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
