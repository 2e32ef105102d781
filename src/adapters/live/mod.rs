//! Live adapters for real external interactions.

pub mod fetch;
pub mod filesystem;

pub use fetch::LiveFetcher;
pub use filesystem::LiveFileSystem;
