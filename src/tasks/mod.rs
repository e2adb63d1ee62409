//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - TTL cleanup: sweeps expired cache entries at a configured interval

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupHandle};
