pub mod coordinator;

pub use coordinator::{SyncCoordinator, SyncError, SyncSession, SyncState};
