use wepc_core::{PcoordArray, WepcError};
use wepc_system::{RectilinearBinMapper, SystemConfig, TargetCounts, WeSystem};

#[test]
fn one_dimensional_assignment_uses_half_open_bins() {
    let mapper = RectilinearBinMapper::new(vec![vec![0.0, 1.0, 2.0, f64::INFINITY]]).unwrap();
    assert_eq!(mapper.nbins(), 3);
    assert_eq!(mapper.assign(&[0.0]).unwrap(), 0);
    assert_eq!(mapper.assign(&[1.0]).unwrap(), 1);
    assert_eq!(mapper.assign(&[1.5, 7.0, 1.0]).unwrap(), 1);
    assert_eq!(mapper.assign(&[1e9]).unwrap(), 2);
}

#[test]
fn out_of_range_coordinates_fail() {
    let mapper = RectilinearBinMapper::new(vec![vec![0.0, 1.0]]).unwrap();
    assert!(matches!(mapper.assign(&[-0.5]), Err(WepcError::Bin(_))));
    assert!(matches!(mapper.assign(&[1.0]), Err(WepcError::Bin(_))));
    assert!(matches!(mapper.assign(&[f32::NAN]), Err(WepcError::Bin(_))));
    assert!(matches!(mapper.assign(&[]), Err(WepcError::Shape(_))));
}

#[test]
fn two_dimensional_bins_are_row_major() {
    let mapper =
        RectilinearBinMapper::new(vec![vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 20.0, 30.0]]).unwrap();
    assert_eq!(mapper.bins_per_dim(), vec![2, 3]);
    assert_eq!(mapper.nbins(), 6);
    assert_eq!(mapper.assign(&[0.5, 25.0]).unwrap(), 2);
    assert_eq!(mapper.assign(&[1.5, 5.0]).unwrap(), 3);
    let labels = mapper.labels();
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[3], "[(1, 2), (0, 10)]");
}

#[test]
fn reference_system_bins_progress_coordinates() {
    let system = WeSystem::initialize(SystemConfig::default()).unwrap();
    let pcoord = PcoordArray::from_rows(vec![
        vec![0.1, 3.0, 0.0],
        vec![2.85, 3.0, 0.0],
        vec![12.0, 3.0, 1.0],
        vec![20.0, 3.0, 1.0],
    ])
    .unwrap();
    let bins = system.bin_mapper().assign_rows(&pcoord).unwrap();
    assert_eq!(bins, vec![0, 1, 17, 21]);
    assert_eq!(system.bin_mapper().labels()[21], "[(15.9, inf)]");
}

#[test]
fn invalid_boundaries_are_rejected() {
    assert!(RectilinearBinMapper::new(vec![]).is_err());
    assert_eq!(
        RectilinearBinMapper::new(vec![vec![1.0]]).unwrap_err().info().code,
        "bin-edges"
    );
    assert_eq!(
        RectilinearBinMapper::new(vec![vec![0.0, 2.0, 1.0]])
            .unwrap_err()
            .info()
            .code,
        "bin-order"
    );
}

#[test]
fn target_counts_can_be_adjusted() {
    let mut targets = TargetCounts::uniform(3, 4);
    targets.set(1, 10).unwrap();
    assert_eq!(targets.as_slice(), &[4, 10, 4]);
    assert_eq!(targets.total(), 18);
    assert_eq!(targets.get(3), None);
    assert!(targets.set(3, 1).is_err());
}
