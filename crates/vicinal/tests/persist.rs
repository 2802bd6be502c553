//! Persistence round-trip tests: a restored estimator must behave like the
//! original without retraining.

use vicinal::{
    Dataset, Labeled, Learner, Persistable, Probabilistic, RadiusNeighbors,
    RadiusNeighborsRegressor,
};

fn classification_set() -> Labeled {
    Labeled::new(
        vec![
            vec![0.0.into(), 0.0.into()],
            vec![0.5.into(), 0.5.into()],
            vec![9.0.into(), 9.0.into()],
            vec![9.5.into(), 9.5.into()],
        ],
        vec!["a".into(), "a".into(), "b".into(), "b".into()],
    )
    .unwrap()
}

#[test]
fn classifier_round_trips_trained() {
    let mut estimator = RadiusNeighbors::new(2.0).unwrap();
    estimator.train(&classification_set()).unwrap();

    let blob = estimator.to_blob().unwrap();

    let restored: RadiusNeighbors = RadiusNeighbors::from_blob(&blob).unwrap();

    assert!(restored.trained());
    assert_eq!(restored.classes(), estimator.classes());
    assert_eq!(restored.radius(), estimator.radius());

    let queries = Dataset::new(vec![
        vec![0.2.into(), 0.2.into()],
        vec![9.2.into(), 9.2.into()],
        vec![5.0.into(), 5.0.into()],
    ])
    .unwrap();

    assert_eq!(
        restored.predict(&queries).unwrap(),
        estimator.predict(&queries).unwrap(),
    );
    assert_eq!(
        restored.proba(&queries).unwrap(),
        estimator.proba(&queries).unwrap(),
    );
}

#[test]
fn regressor_round_trips_trained() {
    let training = Labeled::new(
        vec![vec![0.0.into()], vec![1.0.into()], vec![2.0.into()]],
        vec![10.0.into(), 20.0.into(), 30.0.into()],
    )
    .unwrap();

    let mut estimator = RadiusNeighborsRegressor::new(1.5).unwrap();
    estimator.train(&training).unwrap();

    let blob = estimator.to_blob().unwrap();

    let restored: RadiusNeighborsRegressor = RadiusNeighborsRegressor::from_blob(&blob).unwrap();

    assert!(restored.trained());

    let queries = Dataset::new(vec![vec![0.5.into()], vec![1.5.into()]]).unwrap();

    assert_eq!(
        restored.predict(&queries).unwrap(),
        estimator.predict(&queries).unwrap(),
    );
}

#[test]
fn untrained_estimator_round_trips_bare() {
    let estimator = RadiusNeighbors::new(1.0).unwrap();

    let blob = estimator.to_blob().unwrap();

    let restored: RadiusNeighbors = RadiusNeighbors::from_blob(&blob).unwrap();

    assert!(!restored.trained());
}
