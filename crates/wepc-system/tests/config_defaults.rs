use std::fs;

use tempfile::tempdir;
use wepc_core::WepcError;
use wepc_system::{config_hash, StateInterval, SystemConfig, WeSystem};

#[test]
fn defaults_describe_reference_system() {
    let system = WeSystem::initialize(SystemConfig::default()).expect("default system");
    assert_eq!(system.pcoord_ndim(), 3);
    assert_eq!(system.pcoord_len(), 6);
    assert_eq!(system.bin_mapper().nbins(), 22);
    assert_eq!(system.target_counts().as_slice(), &[4; 22]);
    assert_eq!(system.target_counts().total(), 88);
    assert_eq!(system.state_table().len(), 2);
    assert_eq!(system.state_table().unknown_state(), 2);
    assert_eq!(system.config_hash().len(), 64);
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let yaml = r#"
pcoord_len: 11
states:
  intervals:
    - { lo: 0.0, hi: 1.0 }
    - { lo: 2.0, hi: .inf }
    - { lo: 5.0, hi: 6.0 }
  unknown_state: 7
"#;
    let config = SystemConfig::from_yaml(yaml).expect("parse");
    assert_eq!(config.pcoord_len, 11);
    assert_eq!(config.pcoord_ndim, 3);
    assert_eq!(config.states.raw_ndim, 2);
    assert_eq!(config.states.intervals[1], StateInterval::new(2.0, f64::INFINITY));
    assert_eq!(config.binning.target_count, 4);
    let system = WeSystem::initialize(config).expect("system");
    assert_eq!(system.state_table().len(), 3);
}

#[test]
fn yaml_round_trip_preserves_infinite_bounds() {
    let config = SystemConfig::default();
    let yaml = config.to_yaml().expect("serialize");
    let decoded = SystemConfig::from_yaml(&yaml).expect("parse");
    assert_eq!(decoded, config);
}

#[test]
fn load_reads_file_and_reports_path_on_failure() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("system.yaml");
    fs::write(&good, "pcoord_len: 4\n").unwrap();
    assert_eq!(SystemConfig::load(&good).unwrap().pcoord_len, 4);

    let bad = dir.path().join("broken.yaml");
    fs::write(&bad, "pcoord_len: [oops\n").unwrap();
    let err = SystemConfig::load(&bad).unwrap_err();
    assert!(matches!(err, WepcError::Serde(_)));
    assert!(err.info().context.contains_key("path"));

    let missing = SystemConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(missing.info().code, "config-read");
}

#[test]
fn inconsistent_dimensions_are_rejected() {
    let mut config = SystemConfig::default();
    config.pcoord_ndim = 4;
    assert_eq!(config.validate().unwrap_err().info().code, "pcoord-ndim");

    let mut config = SystemConfig::default();
    config.states.classify_dim = 2;
    assert_eq!(config.validate().unwrap_err().info().code, "classify-dim");

    let mut config = SystemConfig::default();
    config.pcoord_len = 0;
    assert_eq!(config.validate().unwrap_err().info().code, "pcoord-len-zero");

    let mut config = SystemConfig::default();
    config.coords.n_atoms = 0;
    assert_eq!(config.validate().unwrap_err().info().code, "coords-shape");
}

#[test]
fn initialize_rejects_bad_tables() {
    let mut config = SystemConfig::default();
    config.states.unknown_state = 1;
    let err = WeSystem::initialize(config).unwrap_err();
    assert_eq!(err.info().code, "state-sentinel");

    let mut config = SystemConfig::default();
    config.binning.boundaries = vec![vec![0.0, 1.0, 1.0]];
    let err = WeSystem::initialize(config).unwrap_err();
    assert_eq!(err.info().code, "bin-order");
}

#[test]
fn hash_tracks_configuration_changes() {
    let base = SystemConfig::default();
    let mut changed = base.clone();
    changed.binning.target_count = 8;
    assert_eq!(config_hash(&base).unwrap(), config_hash(&base).unwrap());
    assert_ne!(config_hash(&base).unwrap(), config_hash(&changed).unwrap());
}
