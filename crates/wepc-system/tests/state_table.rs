use proptest::prelude::*;
use wepc_system::{StateInterval, StateTable};

fn reference_table() -> StateTable {
    StateTable::new(
        vec![
            StateInterval::new(0.0, 0.20),
            StateInterval::new(11.60, f64::INFINITY),
        ],
        2,
    )
    .unwrap()
}

#[test]
fn reference_values_classify() {
    let table = reference_table();
    assert_eq!(table.classify(0.1), Some(0));
    assert_eq!(table.classify(11.6), Some(1));
    assert_eq!(table.classify(5.0), None);
    assert_eq!(table.classify_or(5.0, table.unknown_state()), 2);
}

#[test]
fn upper_bound_is_exclusive() {
    let table = StateTable::new(
        vec![StateInterval::new(0.0, 1.0), StateInterval::new(1.0, 2.0)],
        9,
    )
    .unwrap();
    assert_eq!(table.classify(1.0), Some(1));
    assert_eq!(table.classify(0.0), Some(0));
    assert_eq!(table.classify(2.0), None);
}

#[test]
fn overlapping_intervals_take_the_last_match() {
    let table = StateTable::new(
        vec![StateInterval::new(0.0, 10.0), StateInterval::new(4.0, 6.0)],
        2,
    )
    .unwrap();
    assert_eq!(table.classify(5.0), Some(1));
    assert_eq!(table.classify(7.0), Some(0));
}

#[test]
fn nan_matches_nothing() {
    assert_eq!(reference_table().classify(f32::NAN), None);
}

#[test]
fn invalid_tables_are_rejected() {
    let err = StateTable::new(vec![StateInterval::new(1.0, 1.0)], 1).unwrap_err();
    assert_eq!(err.info().code, "state-interval");
    let err = StateTable::new(vec![StateInterval::new(f64::NAN, 1.0)], 1).unwrap_err();
    assert_eq!(err.info().code, "state-interval");
    let err = StateTable::new(vec![StateInterval::new(0.0, 1.0)], 0).unwrap_err();
    assert_eq!(err.info().code, "state-sentinel");
}

#[test]
fn label_validity() {
    let table = reference_table();
    assert!(table.is_valid_label(0));
    assert!(table.is_valid_label(1));
    assert!(table.is_valid_label(2));
    assert!(!table.is_valid_label(3));
}

proptest! {
    #[test]
    fn values_inside_one_interval_get_its_index(value in 0.0f32..0.19) {
        prop_assert_eq!(reference_table().classify(value), Some(0));
    }

    #[test]
    fn values_in_the_gap_are_unclassified(value in 0.2f32..11.5) {
        prop_assert_eq!(reference_table().classify(value), None);
    }

    #[test]
    fn shared_boundary_goes_to_upper_interval(lo in -100i32..100, width in 1i32..50, width2 in 1i32..50) {
        let mid = (lo + width) as f64;
        let table = StateTable::new(
            vec![
                StateInterval::new(lo as f64, mid),
                StateInterval::new(mid, mid + width2 as f64),
            ],
            2,
        )
        .unwrap();
        prop_assert_eq!(table.classify(mid as f32), Some(1));
    }
}
