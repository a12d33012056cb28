//! Persistence layer for Inbox Briefing.
//!
//! Reports are written with atomic file operations (write to temp file,
//! then rename) under timestamped names.
//!
//! # Example
//!
//! ```no_run
//! use briefing_persistence::ReportStore;
//!
//! let store = ReportStore::new("/home/user/reports");
//! let path = store.save("# 秘書レポート").unwrap();
//! println!("saved to {}", path.display());
//! ```

pub mod atomic;
pub mod error;
pub mod report_store;

pub use atomic::atomic_write;
pub use error::{PersistenceError, Result};
pub use report_store::ReportStore;
