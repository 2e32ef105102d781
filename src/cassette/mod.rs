//! Cassettes: recorded port interactions replayed in tests.
//!
//! Set `SWAG_RECORD=<file>` to capture every fetch and filesystem call of a
//! command run into a YAML cassette.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::{CassetteReplayer, ReplayError};
