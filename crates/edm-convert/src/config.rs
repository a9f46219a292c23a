//! YAML configuration of the event converter.

use std::fs;
use std::path::Path;

use edm_core::errors::EdmError;
use edm_graph::GenealogyConfig;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing event conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Master seed forwarded to smearing collaborators.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Whether muons are converted and matched.
    #[serde(default = "default_true")]
    pub convert_muons: bool,
    /// Value written to the area of every jet; the area is never computed.
    #[serde(default = "default_jet_area_sentinel")]
    pub jet_area_sentinel: f64,
    /// Genealogy graph options.
    #[serde(default)]
    pub genealogy: GenealogyConfig,
    /// Generated-particle smearing.
    #[serde(default)]
    pub smearing: SmearingConfig,
}

fn default_seed() -> u64 {
    0xdead_beef
}

fn default_true() -> bool {
    true
}

fn default_jet_area_sentinel() -> f64 {
    -1.0
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            convert_muons: true,
            jet_area_sentinel: default_jet_area_sentinel(),
            genealogy: GenealogyConfig::default(),
            smearing: SmearingConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, EdmError> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|err| EdmError::config("yaml-deserialize", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EdmError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            EdmError::config("read-config", err.to_string())
                .with_context("path", path.display())
        })?;
        Self::from_yaml_str(&contents).map_err(|err| err.with_context("path", path.display()))
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, EdmError> {
        serde_yaml::to_string(self).map_err(|err| EdmError::config("yaml-serialize", err.to_string()))
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), EdmError> {
        let resolution = self.smearing.resolution;
        if !resolution.is_finite() || resolution < 0.0 {
            return Err(EdmError::config(
                "invalid-resolution",
                "smearing resolution must be a finite, non-negative number",
            )
            .with_context("resolution", resolution));
        }
        if !self.jet_area_sentinel.is_finite() {
            return Err(EdmError::config(
                "invalid-jet-area-sentinel",
                "jet area sentinel must be finite",
            ));
        }
        Ok(())
    }
}

/// Momentum smearing applied to a copy of the truth particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmearingConfig {
    /// Whether smeared particles are produced at all.
    #[serde(default)]
    pub enabled: bool,
    /// Relative Gaussian width of the momentum scale factor.
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    /// Keep only particles visible in the tracker (charged, plus `pi-`).
    #[serde(default = "default_true")]
    pub tracker_only: bool,
}

fn default_resolution() -> f64 {
    0.01
}

impl Default for SmearingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            resolution: default_resolution(),
            tracker_only: true,
        }
    }
}
