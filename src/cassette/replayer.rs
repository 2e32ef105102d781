//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Failure to serve an interaction from a cassette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// Nothing was recorded for the requested port/method.
    #[error(
        "cassette has no interactions for port={port:?} method={method:?}; \
         available port::method pairs: [{available}]"
    )]
    NotRecorded {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Recorded `port::method` pairs, comma separated.
        available: String,
    },
    /// Every recorded interaction for the port/method was already served.
    #[error(
        "cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
         have been consumed; last was seq={last_seq}"
    )]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Number of recorded interactions.
        count: usize,
        /// Sequence number of the last one.
        last_seq: u64,
    },
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        Self { queues, cursors: HashMap::new() }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if nothing (or nothing more) was recorded for
    /// the pair.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
    ) -> Result<&Interaction, ReplayError> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(ReplayError::NotRecorded {
                port: key.port,
                method: key.method,
                available: available.join(", "),
            });
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(ReplayError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                count: queue.len(),
                last_seq: queue.last().map_or(0, |i| i.seq),
            });
        };
        *cursor += 1;
        Ok(interaction)
    }
}
