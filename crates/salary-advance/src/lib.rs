//! Core library for the salary advance and loan service.
//!
//! The [`advance`] module carries the business rules: salary
//! normalization, eligibility and fee policy, loan math, the loan
//! ledger contract, and the orchestrating service with its HTTP
//! router. The remaining modules provide the runtime scaffolding the
//! binaries share (environment configuration and tracing setup).

pub mod advance;
pub mod config;
pub mod error;
pub mod telemetry;
