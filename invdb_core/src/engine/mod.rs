pub mod classify;
pub mod format;
pub mod preview;
pub mod staged;
pub mod workflow;

pub use classify::{Failure, Violation, ViolationKind, classify, classify_message};
pub use format::format_table;
pub use staged::{CommitDecision, InsertState, insert_staged};
pub use workflow::{
    BatchPlan, Expansion, collect_record, collect_value, create_batch_entry, create_entry,
    describe_table, show_entries,
};
