#![deny(missing_docs)]

//! Event conversion from fast-simulation output to the event-data model.
//!
//! [`EventConverter`] ties the pieces together: the genealogy graph from
//! `edm-graph`, truth matching from `edm-match`, and the pass-through
//! converters defined here.

pub mod config;
mod event;
pub mod passthrough;
pub mod reco;
pub mod smear;

pub use config::{ConverterConfig, SmearingConfig};
pub use event::{EventConverter, EventRecord};
pub use passthrough::{convert_jets, convert_missing_energy, Jet, MissingEnergy};
pub use reco::{convert_reco, MatchDiagnostic, RecoCollection, RecoKind, RecoParticle};
pub use smear::{smear_particles, SmearedParticle};
