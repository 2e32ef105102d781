//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the snapshot engine and an
//! external system (the filesystem holding the lock, the HTTP origin of the
//! API description). Implementations live in `src/adapters/`.

pub mod fetch;
pub mod filesystem;

pub use fetch::{FetchFuture, Fetcher};
pub use filesystem::FileSystem;
