use rustpid_core::{
    classify_particles, Centroid, CentroidTable, ClassifierConfig, ParticleClass,
    ParticleClassifier, ReferenceMode, VisitOrder,
};

use ParticleClass::{Alpha, Deuteron, Proton, Triton};

fn table(points: &[(f64, f64)]) -> CentroidTable {
    CentroidTable::new(points.iter().map(|&(x, y)| Centroid::new(x, y)).collect()).unwrap()
}

/// Alpha, deuteron, triton and proton in an order where the triton's
/// reference rows are visited first.
const REFERENCE_FIRST: [(f64, f64); 4] = [
    (100.0, 1500.0),
    (500.0, 800.0),
    (300.0, 1000.0),
    (900.0, 600.0),
];

/// Same centroids with the triton first.
const TRITON_FIRST: [(f64, f64); 4] = [
    (300.0, 1000.0),
    (100.0, 1500.0),
    (500.0, 800.0),
    (900.0, 600.0),
];

#[test]
fn test_two_clusters() {
    let mut centroids = table(&[(900.0, 1000.0), (200.0, 1800.0)]);
    let labeled = classify_particles(&mut centroids).unwrap();
    assert_eq!(labeled.labels(), vec![Some(Proton), Some(Alpha)]);
}

#[test]
fn test_returns_same_table() {
    let mut centroids = table(&[(900.0, 1000.0), (200.0, 1800.0)]);
    let original: *const CentroidTable = &centroids;
    let mut classifier = ParticleClassifier::default();
    let returned = classifier.classify(&mut centroids).unwrap();
    assert!(std::ptr::eq(returned, original));
}

#[test]
fn test_unclassifiable_rows_stay_unset() {
    let mut centroids = table(&[
        (1000.0, 500.0),
        (100.0, 1500.0),
        (400.0, 900.0),
        (500.0, 800.0),
        (600.0, 700.0),
    ]);
    let labels = classify_particles(&mut centroids).unwrap().labels();
    assert_eq!(labels, vec![Some(Proton), Some(Alpha), None, None, None]);
    assert_eq!(centroids.label_counts().unclassified, 3);
}

#[test]
fn test_labels_within_class_domain() {
    let mut centroids = table(&[
        (120.0, 1620.0),
        (340.0, 1180.0),
        (610.0, 870.0),
        (980.0, 540.0),
        (450.0, 1010.0),
    ]);
    classify_particles(&mut centroids).unwrap();
    for row in &centroids {
        if let Some(class) = row.label {
            assert!(ParticleClass::ALL.contains(&class));
        }
    }
}

#[test]
fn test_fresh_runs_are_identical() {
    let points = [(100.0, 1500.0), (150.0, 1200.0), (600.0, 900.0), (950.0, 700.0)];
    let mut first = table(&points);
    let mut second = table(&points);

    let mut classifier = ParticleClassifier::default();
    let first_labels = classifier.classify(&mut first).unwrap().labels();
    let second_labels = classifier.classify(&mut second).unwrap().labels();
    assert_eq!(first_labels, second_labels);

    // Re-running on an already labeled table resets labels first.
    let rerun = classifier.classify(&mut first).unwrap().labels();
    assert_eq!(rerun, first_labels);
}

#[test]
fn test_triton_reference_needs_earlier_rows() {
    let mut ordered = table(&REFERENCE_FIRST);
    let labels = classify_particles(&mut ordered).unwrap().labels();
    assert_eq!(
        labels,
        vec![Some(Alpha), Some(Deuteron), Some(Triton), Some(Proton)]
    );

    // With the triton visited before its references it stays unset.
    let mut reordered = table(&TRITON_FIRST);
    let labels = classify_particles(&mut reordered).unwrap().labels();
    assert_eq!(labels, vec![None, Some(Alpha), Some(Deuteron), Some(Proton)]);
}

#[test]
fn test_explicit_visit_order_restores_reference() {
    let mut reordered = table(&TRITON_FIRST);
    let mut classifier = ParticleClassifier::new(
        ClassifierConfig::new().with_visit_order(VisitOrder::Explicit(vec![1, 2, 0, 3])),
    );
    let labels = classifier.classify(&mut reordered).unwrap().labels();
    assert_eq!(
        labels,
        vec![Some(Triton), Some(Alpha), Some(Deuteron), Some(Proton)]
    );
}

#[test]
fn test_last_neighbor_mode_only_sees_last_row() {
    let mut ordered = table(&REFERENCE_FIRST);
    let mut classifier = ParticleClassifier::new(
        ClassifierConfig::new().with_reference_mode(ReferenceMode::LastNeighbor),
    );
    let labels = classifier.classify(&mut ordered).unwrap().labels();
    // The last row is the proton, so the triton reference cannot hold.
    assert_eq!(labels, vec![Some(Alpha), Some(Deuteron), None, Some(Proton)]);
}

#[test]
fn test_deuteron_reference_with_existing_labels() {
    let rows = vec![
        Centroid::new(100.0, 1500.0),
        Centroid::new(1000.0, 500.0),
        Centroid::with_label(200.0, 1200.0, Triton),
        Centroid::new(500.0, 900.0),
        Centroid::new(150.0, 300.0),
    ];

    let mut kept = CentroidTable::new(rows.clone()).unwrap();
    let mut classifier = ParticleClassifier::new(ClassifierConfig::new().with_reset_labels(false));
    let labels = classifier.classify(&mut kept).unwrap().labels();
    assert_eq!(
        labels,
        vec![Some(Alpha), Some(Proton), Some(Triton), Some(Deuteron), None]
    );

    let mut reset = CentroidTable::new(rows).unwrap();
    let labels = classify_particles(&mut reset).unwrap().labels();
    assert_eq!(labels, vec![Some(Alpha), Some(Proton), None, None, None]);
}

#[test]
fn test_labeled_columns_keep_references() {
    let xs = [100.0, 1000.0, 200.0, 500.0, 150.0];
    let ys = [1500.0, 500.0, 1200.0, 900.0, 300.0];
    let existing = [None, None, Some(Triton), None, None];

    let mut table = CentroidTable::from_labeled_columns(&xs, &ys, &existing).unwrap();
    let mut classifier = ParticleClassifier::new(ClassifierConfig::new().with_reset_labels(false));
    classifier.classify(&mut table).unwrap();
    assert_eq!(table.label(3), Some(Deuteron));
    assert_eq!(table.label(2), Some(Triton));
}

#[test]
fn test_recalibrated_thresholds() {
    // Raising the alpha x cutoff admits a top row at x = 850.
    let points = [(1500.0, 600.0), (850.0, 1500.0), (1500.0, 500.0)];

    let mut default_table = table(&points);
    assert_eq!(classify_particles(&mut default_table).unwrap().label(1), None);

    let mut recalibrated = table(&points);
    let mut classifier = ParticleClassifier::new(ClassifierConfig::new().with_alpha_max_x(900.0));
    assert_eq!(
        classifier.classify(&mut recalibrated).unwrap().label(1),
        Some(Alpha)
    );
}
