use edm_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

/// Configuration options that control the behaviour of [`GenealogyBuilder`](crate::GenealogyBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenealogyConfig {
    /// Where the `ctau` of a decay vertex is taken from.
    #[serde(default)]
    pub ctau_source: CtauSource,
    /// Schema version stored alongside serialized graphs.
    #[serde(default = "default_schema_version")]
    pub schema_version: SchemaVersion,
}

fn default_schema_version() -> SchemaVersion {
    SchemaVersion::new(1, 0, 0)
}

impl Default for GenealogyConfig {
    fn default() -> Self {
        Self {
            ctau_source: CtauSource::default(),
            schema_version: default_schema_version(),
        }
    }
}

/// Time coordinate recorded as `ctau` when a decay vertex is created.
///
/// Production vertices always use the time of the particle that creates
/// them. For decay vertices the position comes from the first daughter; the
/// time can follow it or stay with the decaying mother.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CtauSource {
    /// Take the time of the candidate whose position defines the vertex.
    #[default]
    VertexDefining,
    /// Take the time of the decaying mother.
    Mother,
}
