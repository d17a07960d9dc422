pub mod column;
pub mod record;

pub use column::Column;
pub use record::{DedupKey, Record, SortKey, UNKNOWN_SORTS_LAST};
