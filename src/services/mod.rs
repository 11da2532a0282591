//! Service layer for business logic.
//!
//! Services borrow the models they operate on, enforce their invariants and
//! record every change in the audit trail. Persistence lives in
//! [`data_store`].

pub mod data_store;
pub mod grid_store;
pub mod roster;

// Re-export commonly used types
pub use data_store::{is_invalid_data, AppData, DataStore, InvalidData};
pub use grid_store::{GridStore, LayoutSummary};
pub use roster::{ClubStats, RosterService};
