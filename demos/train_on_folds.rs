extern crate crossval;
extern crate log;
extern crate simple_logger;

use std::collections::HashMap;

use crossval::prelude::*;
use crossval::{DataSet, FoldSink, FrozenSets, KFold, RandomShuffler};
use log::Level;

/// Predicts the class whose mean is closest to the input
struct NearestMean {
    means: Vec<(u8, f64)>,
}

impl NearestMean {
    fn fit(x: &[f64], y: &[u8]) -> Self {
        let mut sums: HashMap<u8, (f64, usize)> = HashMap::new();
        for (&xi, &yi) in x.iter().zip(y) {
            let entry = sums.entry(yi).or_insert((0.0, 0));
            entry.0 += xi;
            entry.1 += 1;
        }
        let means = sums
            .into_iter()
            .map(|(c, (sum, n))| (c, sum / n as f64))
            .collect();
        NearestMean { means }
    }

    fn predict(&self, x: f64) -> Option<u8> {
        self.means
            .iter()
            .min_by(|(_, a), (_, b)| (x - a).abs().partial_cmp(&(x - b).abs()).unwrap())
            .map(|&(c, _)| c)
    }
}

fn main() {
    simple_logger::init_with_level(Level::Info).unwrap();

    let x: Vec<f64> = (0..20).map(|i| i as f64 + 0.5).collect();
    let y: Vec<u8> = x.iter().map(|&v| if v < 10.0 { 0 } else { 1 }).collect();

    // train and test on each fold as it is produced
    let mut n_correct = 0;
    let mut n_total = 0;
    crossval::cross_validation_sets_with(&x, &y, 4, |fold| {
        let model = NearestMean::fit(&fold.train_x, &fold.train_y);
        for (&xi, &yi) in fold.test_x.iter().zip(&fold.test_y) {
            if model.predict(xi) == Some(yi) {
                n_correct += 1;
            }
            n_total += 1;
        }
        Ok(())
    })
    .unwrap();
    println!("4-fold accuracy: {}", n_correct as f64 / n_total as f64);

    // freeze a split, store it, and evaluate on exactly the same folds later
    let frozen = KFold::new(4)
        .unwrap()
        .freeze(x.len(), &mut RandomShuffler::new())
        .unwrap();
    let table = frozen.to_json().unwrap();
    println!("Stored split table with {} bytes", table.len());

    let data = DataSet::new(&x, &y).unwrap();
    let replayed = FrozenSets::from_json(&table)
        .unwrap()
        .generate(&data, FoldSink::Collect)
        .unwrap();
    println!("Replayed {} folds", replayed.len());

    let loo = crossval::leave_one_out_sets(&x, &y).unwrap();
    let n_correct = loo
        .iter()
        .filter(|fold| {
            let model = NearestMean::fit(&fold.train_x, &fold.train_y);
            model.predict(fold.test_x) == Some(fold.test_y)
        })
        .count();
    println!("Leave-one-out accuracy: {}", n_correct as f64 / loo.len() as f64);
}
