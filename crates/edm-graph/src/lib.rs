#![deny(missing_docs)]

//! Genealogy graph engine: rebuilds explicit particle/vertex graphs with
//! shared vertices from the flat, range-linked candidate sequence.

mod builder;
mod flags;
mod generators;
mod graph;
mod hash;
mod ids;
mod serialization;

pub use builder::GenealogyBuilder;
pub use flags::{CtauSource, GenealogyConfig};
pub use generators::gen_cascade_event;
pub use graph::{GenealogyGraph, ParticleNode, StatusCounts, VertexNode};
pub use hash::canonical_hash;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
