use std::fs;

use edm_convert::{ConverterConfig, EventConverter, SmearingConfig};
use edm_graph::CtauSource;
use tempfile::tempdir;

#[test]
fn empty_mapping_yields_defaults() {
    let config = ConverterConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, ConverterConfig::default());
    assert!(config.convert_muons);
    assert_eq!(config.jet_area_sentinel, -1.0);
    assert_eq!(config.genealogy.ctau_source, CtauSource::VertexDefining);
    assert_eq!(config.smearing, SmearingConfig::default());
    assert!(!config.smearing.enabled);
}

#[test]
fn partial_documents_keep_remaining_defaults() {
    let yaml = r#"
seed: 42
convert_muons: false
genealogy:
  ctau_source: mother
smearing:
  enabled: true
  resolution: 0.05
"#;
    let config = ConverterConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.seed, 42);
    assert!(!config.convert_muons);
    assert_eq!(config.genealogy.ctau_source, CtauSource::Mother);
    assert!(config.smearing.enabled);
    assert_eq!(config.smearing.resolution, 0.05);
    assert!(config.smearing.tracker_only);
    assert_eq!(config.jet_area_sentinel, -1.0);
}

#[test]
fn yaml_round_trip_preserves_configuration() {
    let mut config = ConverterConfig::default();
    config.seed = 7;
    config.smearing.tracker_only = false;
    let yaml = config.to_yaml_string().unwrap();
    assert_eq!(ConverterConfig::from_yaml_str(&yaml).unwrap(), config);
}

#[test]
fn negative_resolution_is_rejected() {
    let err = ConverterConfig::from_yaml_str("smearing:\n  resolution: -0.5\n").unwrap_err();
    assert_eq!(err.code(), "invalid-resolution");
    assert!(err.info().context.contains_key("resolution"));

    let mut config = ConverterConfig::default();
    config.smearing.resolution = f64::NAN;
    assert_eq!(EventConverter::new(config).unwrap_err().code(), "invalid-resolution");
}

#[test]
fn unknown_ctau_source_is_a_config_error() {
    let err = ConverterConfig::from_yaml_str("genealogy:\n  ctau_source: daughter\n").unwrap_err();
    assert_eq!(err.code(), "yaml-deserialize");
}

#[test]
fn configuration_loads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("converter.yaml");
    fs::write(&path, "seed: 99\njet_area_sentinel: -2.0\n").unwrap();

    let config = ConverterConfig::from_path(&path).unwrap();
    assert_eq!(config.seed, 99);
    assert_eq!(config.jet_area_sentinel, -2.0);

    let missing = dir.path().join("absent.yaml");
    let err = ConverterConfig::from_path(&missing).unwrap_err();
    assert_eq!(err.code(), "read-config");
    assert_eq!(
        err.info().context.get("path"),
        Some(&missing.display().to_string())
    );
}

#[test]
fn invalid_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "smearing:\n  resolution: -1.0\n").unwrap();
    let err = ConverterConfig::from_path(&path).unwrap_err();
    assert_eq!(err.code(), "invalid-resolution");
    assert!(err.info().context.contains_key("path"));
}
