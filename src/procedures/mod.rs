//! Validation procedures

mod frozen_sets;
mod k_fold;
mod leave_one_out;

pub use self::frozen_sets::{FrozenSets, SplitRow, TrainTest};
pub use self::k_fold::{KFold, DEFAULT_FOLDS};
pub use self::leave_one_out::LeaveOneOut;

use crate::error::{Error, Result};
use crate::shuffle::{IndexShuffler, Permutation};

/// Validation procedures turn an ordering of the sample indices into cross-validation folds
pub trait Procedure {
    /// Index folds for the given ordering, in fold order.
    fn index_folds(&self, permutation: &Permutation) -> Result<Vec<IndexFold>>;

    /// Reject parameters the procedure cannot split with.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Draw one ordering of `n` samples and freeze the resulting folds, so they can be stored
    /// and replayed later. Nothing is drawn if `validate` fails.
    fn freeze<S>(&self, n: usize, shuffler: &mut S) -> Result<FrozenSets>
    where
        S: IndexShuffler + ?Sized,
        Self: Sized,
    {
        self.validate()?;
        let permutation = draw(shuffler, n)?;
        Ok(FrozenSets::new(self.index_folds(&permutation)?))
    }
}

/// A single cross-validation fold, consisting of a training set and a testing set of row indices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexFold {
    pub trainset: Vec<usize>,
    pub testset: Vec<usize>,
}

impl IndexFold {
    pub fn new() -> Self {
        IndexFold {
            trainset: Vec::new(),
            testset: Vec::new(),
        }
    }
}

/// Ask the shuffler for an ordering of `n` indices, refusing orderings of any other size.
pub(crate) fn draw<S>(shuffler: &mut S, n: usize) -> Result<Permutation>
where
    S: IndexShuffler + ?Sized,
{
    let permutation = shuffler.shuffle(n)?;
    if permutation.len() != n {
        return Err(Error::InvalidPermutation(format!(
            "shuffler returned {} indices for {} samples",
            permutation.len(),
            n
        )));
    }
    Ok(permutation)
}
