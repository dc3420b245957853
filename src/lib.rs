//! Converts bank CSV exports (ten quoted columns, 2018 format) into hledger journals.
//!
//! Every row becomes one entry with two balancing postings: the asset account of
//! the export and an `equity:import:...` account built from transaction type and
//! category. Rows with unexpected content are reported but still converted.

pub mod args;
pub mod cli;
pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod ir;
pub mod normalize;
pub mod terminal;
