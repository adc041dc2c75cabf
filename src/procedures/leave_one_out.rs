//! Leave-one-out cross-validation

use crate::dataset::DataSet;
use crate::error::Result;
use crate::fold::{Fold, LeaveOneOutFold};
use crate::shuffle::{IndexShuffler, Permutation};
use crate::sink::{Emitter, FoldSink};

use super::{draw, IndexFold, Procedure};

/// Every example is the test set of exactly one fold, with all other examples used for training.
///
/// The data are shuffled once per call; fold `i` holds out the `i`-th shuffled example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LeaveOneOut;

impl LeaveOneOut {
    pub fn new() -> Self {
        LeaveOneOut
    }

    /// Shuffle the data once and produce one fold per example into `sink`.
    ///
    /// An empty data set produces no folds.
    pub fn generate<'a, X, Y, S>(
        &self,
        data: &DataSet<'_, X, Y>,
        shuffler: &mut S,
        sink: FoldSink<'a, LeaveOneOutFold<X, Y>>,
    ) -> Result<Vec<LeaveOneOutFold<X, Y>>>
    where
        X: Clone,
        Y: Clone,
        S: IndexShuffler + ?Sized,
    {
        let n = data.len();
        debug!("Leave-one-out split of {} samples", n);

        let permutation = draw(shuffler, n)?;
        let (shuffled_x, shuffled_y) = data.select(permutation.as_slice())?;

        let mut emitter = Emitter::new(sink, n);
        for i in 0..n {
            emitter.emit(Fold {
                train_x: all_but(&shuffled_x, i),
                train_y: all_but(&shuffled_y, i),
                test_x: shuffled_x[i].clone(),
                test_y: shuffled_y[i].clone(),
            })?;
        }

        Ok(emitter.finish())
    }
}

impl Procedure for LeaveOneOut {
    fn index_folds(&self, permutation: &Permutation) -> Result<Vec<IndexFold>> {
        Ok((0..permutation.len())
            .map(|i| IndexFold {
                trainset: all_but(permutation.as_slice(), i),
                testset: vec![permutation[i]],
            })
            .collect())
    }
}

/// copy of `items` without position `skip`
fn all_but<T: Clone>(items: &[T], skip: usize) -> Vec<T> {
    let mut rest = Vec::with_capacity(items.len().saturating_sub(1));
    rest.extend_from_slice(&items[..skip]);
    rest.extend_from_slice(&items[skip + 1..]);
    rest
}
