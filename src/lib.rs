//! Shuffled cross-validation splits for labeled data.
//!
//! Two procedures are available: k-fold cross-validation (`KFold`) and leave-one-out
//! cross-validation (`LeaveOneOut`). Both shuffle the sample indices once per call and then
//! either collect all folds into a `Vec` or pass each fold to a training callback as soon as it
//! is built, which keeps only one fold in memory at a time:
//!
//! ```
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let y = [0, 1, 0, 1, 0, 1];
//!
//! let folds = crossval::cross_validation_sets(&x, &y, 3).unwrap();
//! assert_eq!(folds.len(), 3);
//!
//! let mut n_trained = 0;
//! crossval::cross_validation_sets_with(&x, &y, 3, |fold| {
//!     assert_eq!(fold.train_x.len(), 4);
//!     n_trained += 1;
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(n_trained, 3);
//! ```

#[macro_use]
extern crate log;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod config;
mod dataset;
pub mod error;
mod fold;
pub mod procedures;
pub mod shuffle;
mod sink;

pub use crate::dataset::DataSet;
pub use crate::error::{Error, Result};
pub use crate::fold::{Fold, LeaveOneOutFold};
pub use crate::procedures::{FrozenSets, KFold, LeaveOneOut, DEFAULT_FOLDS};
pub use crate::shuffle::{FixedShuffler, Permutation, RandomShuffler};
pub use crate::sink::{CallbackResult, FoldSink};

pub mod prelude {
    pub use crate::procedures::Procedure;
    pub use crate::shuffle::IndexShuffler;
}

/// All `k` folds of a shuffled k-fold split of `x` and `y`.
///
/// `k` must be at least one. If `k` does not divide the number of samples, the `len % k` samples
/// at the end of the shuffled order are left out of every fold.
pub fn cross_validation_sets<X, Y>(x: &[X], y: &[Y], k: usize) -> Result<Vec<Fold<X, Y>>>
where
    X: Clone,
    Y: Clone,
{
    let kfold = KFold::new(k)?;
    let data = DataSet::new(x, y)?;
    kfold.generate(&data, &mut RandomShuffler::new(), FoldSink::Collect)
}

/// Like `cross_validation_sets`, but runs `training_method` on each fold instead of keeping it.
///
/// The first error returned by `training_method` stops the split and is returned as
/// `Error::Callback`.
pub fn cross_validation_sets_with<X, Y, F>(
    x: &[X],
    y: &[Y],
    k: usize,
    training_method: F,
) -> Result<()>
where
    X: Clone,
    Y: Clone,
    F: FnMut(Fold<X, Y>) -> CallbackResult,
{
    let kfold = KFold::new(k)?;
    let data = DataSet::new(x, y)?;
    kfold.generate(
        &data,
        &mut RandomShuffler::new(),
        FoldSink::invoke(training_method),
    )?;
    Ok(())
}

/// One fold per sample, each holding out a single shuffled example.
pub fn leave_one_out_sets<X, Y>(x: &[X], y: &[Y]) -> Result<Vec<LeaveOneOutFold<X, Y>>>
where
    X: Clone,
    Y: Clone,
{
    let data = DataSet::new(x, y)?;
    LeaveOneOut.generate(&data, &mut RandomShuffler::new(), FoldSink::Collect)
}

/// Like `leave_one_out_sets`, but runs `training_method` on each fold instead of keeping it.
pub fn leave_one_out_sets_with<X, Y, F>(x: &[X], y: &[Y], training_method: F) -> Result<()>
where
    X: Clone,
    Y: Clone,
    F: FnMut(LeaveOneOutFold<X, Y>) -> CallbackResult,
{
    let data = DataSet::new(x, y)?;
    LeaveOneOut.generate(
        &data,
        &mut RandomShuffler::new(),
        FoldSink::invoke(training_method),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    fn init_logger() {
        // another test may have installed it already
        let _ = simple_logger::init_with_level(Level::Trace);
    }

    #[test]
    fn k_fold_round_trip_through_api() {
        init_logger();
        let x = vec![vec![0.5, 1.0], vec![1.5, 2.0], vec![2.5, 3.0], vec![3.5, 4.0]];
        let y = vec!["a", "b", "a", "b"];

        let folds = cross_validation_sets(&x, &y, 2).unwrap();
        assert_eq!(folds.len(), 2);
        for fold in &folds {
            assert_eq!(fold.n_test(), 2);
            assert_eq!(fold.n_train(), 2);
        }
    }

    #[test]
    fn default_fold_count() {
        init_logger();
        let x: Vec<u32> = (0..23).collect();
        let folds = cross_validation_sets(&x, &x, DEFAULT_FOLDS).unwrap();
        assert_eq!(folds.len(), 5);
        assert!(folds.iter().all(|f| f.n_test() == 4 && f.n_train() == 16));
    }

    #[test]
    fn invalid_input_before_any_work() {
        init_logger();
        let calls = std::cell::Cell::new(0);
        let count = |_: Fold<i32, i32>| -> CallbackResult {
            calls.set(calls.get() + 1);
            Ok(())
        };

        let err = cross_validation_sets_with(&[1, 2, 3], &[1, 2], 2, count).unwrap_err();
        assert!(err.is_invalid_input());
        let err = cross_validation_sets(&[1, 2, 3], &[1, 2, 3], 0).unwrap_err();
        assert!(err.is_invalid_input());
        let err = leave_one_out_sets(&[1, 2, 3], &[1, 2]).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn leave_one_out_through_api() {
        init_logger();
        let x = [1, 2, 3, 4, 5];
        let y = [10, 20, 30, 40, 50];

        let folds = leave_one_out_sets(&x, &y).unwrap();
        assert_eq!(folds.len(), 5);
        for fold in &folds {
            assert_eq!(fold.test_y, fold.test_x * 10);
            assert_eq!(fold.n_train(), 4);
        }

        let mut held_out = vec![];
        leave_one_out_sets_with(&x, &y, |fold| {
            held_out.push(fold.test_x);
            Ok(())
        })
        .unwrap();
        held_out.sort();
        assert_eq!(held_out, x.to_vec());

        assert!(leave_one_out_sets::<i32, i32>(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn callback_error_reaches_caller() {
        init_logger();
        let x = [1, 2, 3, 4];
        let result = leave_one_out_sets_with(&x, &x, |fold| {
            if fold.test_x == 3 {
                Err(format!("cannot train without {}", fold.test_x).into())
            } else {
                Ok(())
            }
        });

        match result {
            Err(Error::Callback(e)) => assert_eq!(e.to_string(), "cannot train without 3"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
