pub mod record;
pub mod value;

use value::Value;

/// A row is a vector of values, one per selected column
pub type Row = Vec<Value>;

pub use record::{PendingRecord, StagedBatch};
