//! Ingestion stages for biblioteca.
//!
//! Turns raw delimited lines into [`Record`](biblioteca_core::Record)s,
//! merges them into an existing catalog under a duplicate policy, and drives
//! the load → parse → merge → replace cycle against a catalog store.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod delimiter;
pub mod error;
pub mod merge;
pub mod parse;
pub mod pipeline;

pub use config::Config;
pub use delimiter::Delimiter;
pub use error::{LineWarning, ParseError};
pub use merge::{merge, sort_records, DuplicatePolicy, MergeOutcome};
pub use parse::{parse_line, parse_lines, ParsedBatch, RawRow};
pub use pipeline::{import, ImportSummary};
