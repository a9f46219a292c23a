use edm_core::errors::EdmError;
use edm_core::provenance::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::flags::{CtauSource, GenealogyConfig};
use crate::graph::{GenealogyGraph, ParticleNode, VertexNode};

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &GenealogyGraph) -> Result<Vec<u8>, EdmError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| EdmError::serde("serialize-bytes", err.to_string()))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<GenealogyGraph, EdmError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| EdmError::serde("deserialize-bytes", err.to_string()))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &GenealogyGraph) -> Result<String, EdmError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| EdmError::serde("serialize-json", err.to_string()))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<GenealogyGraph, EdmError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| EdmError::serde("deserialize-json", err.to_string()))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    config: SerializableConfig,
    particles: Vec<ParticleNode>,
    vertices: Vec<VertexNode>,
}

impl SerializableGraph {
    fn from_graph(graph: &GenealogyGraph) -> Self {
        Self {
            config: SerializableConfig::from_config(graph.config()),
            particles: graph.raw_particles().to_vec(),
            vertices: graph.raw_vertices().to_vec(),
        }
    }

    fn into_graph(self) -> Result<GenealogyGraph, EdmError> {
        GenealogyGraph::from_parts(self.config.into_config(), self.particles, self.vertices)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableConfig {
    ctau_source: CtauSource,
    schema_version: SchemaVersion,
}

impl SerializableConfig {
    fn from_config(config: &GenealogyConfig) -> Self {
        Self {
            ctau_source: config.ctau_source,
            schema_version: config.schema_version,
        }
    }

    fn into_config(self) -> GenealogyConfig {
        GenealogyConfig {
            ctau_source: self.ctau_source,
            schema_version: self.schema_version,
        }
    }
}
