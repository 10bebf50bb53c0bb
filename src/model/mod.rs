pub mod columns;
pub mod dataset;
pub mod record;

pub use columns::ColumnMap;
pub use dataset::Dataset;
pub use record::{chronological, display_or_na, sort_chronologically, Record, NOT_AVAILABLE};
