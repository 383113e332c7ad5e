//! Id generation for columns and components.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh ids for newly created tree nodes.
pub trait IdSource {
    /// Produce an id that has not been handed out before, tagged with `prefix`.
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Timestamp plus random suffix, e.g. `column-1718000000000-3f9a2c1be`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl RandomIds {
    /// Create a new random id source.
    pub fn new() -> Self {
        Self
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let random = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}", prefix, millis, &random[..9])
    }
}

/// Deterministic counter-based ids, e.g. `column-1`, `component-2`.
///
/// One counter is shared across prefixes so ids stay unique tree-wide.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Start counting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next);
        self.next += 1;
        id
    }
}
