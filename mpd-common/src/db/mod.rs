//! SQLite persistence for parameter sets and artifacts
//!
//! Both stores share one pool. The artifact table carries a uniqueness
//! constraint on (parameter_id, kind); see [`artifacts::insert_artifact`].

pub mod artifacts;
pub mod init;
pub mod parameter_sets;
pub mod retry;

pub use artifacts::{count_artifacts, find_artifact, insert_artifact, InsertOutcome};
pub use init::{init_database_pool, init_memory_pool, init_tables};
pub use parameter_sets::{
    insert_parameter_set, list_parameter_sets, load_parameter_set, LIST_LIMIT,
};
pub use retry::retry_on_lock;
