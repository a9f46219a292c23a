//! Provenance and schema descriptors attached to converted events.

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information stamped on every converted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventProvenance {
    /// Zero-based position of the event within the run.
    pub event_number: u64,
    /// Master deterministic seed forwarded to smearing collaborators.
    pub seed: u64,
    /// Canonical structural hash of the genealogy graph.
    pub graph_hash: String,
    /// Schema version of the emitted collections.
    pub schema_version: SchemaVersion,
}
