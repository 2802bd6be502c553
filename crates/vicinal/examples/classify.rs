//! Radius neighbors classification example.
//!
//! This example demonstrates training a radius neighbors classifier on two
//! synthetic clusters, then predicting labels and probability distributions
//! for query points near each cluster and for one outlier far from both.
//!
//! Run with:
//! ```bash
//! cargo run --example classify
//! ```

use vicinal::{Dataset, Labeled, Learner, Probabilistic, RadiusNeighbors};

fn main() {
    env_logger::init();

    // =========================================================================
    // Generate two synthetic clusters
    // =========================================================================
    // Class "red" centered at (2, 2), class "blue" centered at (8, 8)
    let n_per_class = 50;

    let mut samples = Vec::with_capacity(n_per_class * 2);
    let mut labels = Vec::with_capacity(n_per_class * 2);

    for i in 0..n_per_class {
        let noise1 = ((i * 17) % 100) as f64 / 50.0 - 1.0;
        let noise2 = ((i * 23) % 100) as f64 / 50.0 - 1.0;

        samples.push(vec![(2.0 + noise1).into(), (2.0 + noise2).into()]);
        labels.push("red".into());

        samples.push(vec![(8.0 + noise2).into(), (8.0 + noise1).into()]);
        labels.push("blue".into());
    }

    let training = Labeled::new(samples, labels).expect("samples are rectangular");

    // =========================================================================
    // Train and predict
    // =========================================================================
    let mut estimator = RadiusNeighbors::new(1.5).expect("radius is positive");

    estimator.train(&training).expect("training set is compatible");

    let queries = Dataset::new(vec![
        vec![2.1.into(), 1.9.into()],
        vec![7.8.into(), 8.2.into()],
        vec![5.0.into(), 5.0.into()],
    ])
    .expect("queries are rectangular");

    let predictions = estimator.predict(&queries).expect("estimator is trained");
    let probabilities = estimator.proba(&queries).expect("estimator is trained");

    for (row, (prediction, distribution)) in
        predictions.iter().zip(&probabilities).enumerate()
    {
        println!("query {}: predicted {}", row, prediction);

        for (class, probability) in distribution {
            println!("    {:<8} {:.3}", class, probability);
        }
    }
}
