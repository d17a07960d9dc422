//! Core record model for biblioteca.
//!
//! This crate defines the catalog [`Record`](model::Record), the text
//! normalization and volume/year extraction it is keyed on, the injectable
//! clock, and the two catalog store backends (delimited table file and
//! SQLite).

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod clock;
pub mod error;
pub mod model;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod volume;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use error::{Error, Result};
pub use model::{DedupKey, Record, SortKey};
pub use normalize::{extract_year, first_number, normalize, normalize_opt};
pub use store::{open_store, CatalogStore, StoreKind};
pub use volume::extract_volume;
