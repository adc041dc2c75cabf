//! k-fold cross-validation

use crate::dataset::DataSet;
use crate::error::{Error, Result};
use crate::fold::Fold;
use crate::shuffle::{IndexShuffler, Permutation};
use crate::sink::{Emitter, FoldSink};

use super::{draw, IndexFold, Procedure};

/// number of folds used when the caller does not choose one
pub const DEFAULT_FOLDS: usize = 5;

/// Shuffled k-fold cross-validation.
///
/// The shuffled indices are cut into `k` contiguous blocks of `n / k` rows each. Every block is
/// the test set of exactly one fold; the other blocks, in block order, form its training set.
///
/// The block size is truncated, so the last `n % k` shuffled rows are not part of any fold, and
/// with `k > n` every test block is empty. Both cases are logged, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KFold {
    k: usize,
}

impl KFold {
    pub fn new(k: usize) -> Result<Self> {
        if k < 1 {
            return Err(Error::InvalidFoldCount(k));
        }
        Ok(KFold { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// number of rows in each test block
    #[inline(always)]
    pub fn block_size(&self, n: usize) -> usize {
        n / self.k
    }

    /// Shuffle the data once and produce all `k` folds into `sink`.
    ///
    /// With `FoldSink::Collect` the folds are returned in fold order. With `FoldSink::Invoke`
    /// each fold is passed to the callback as soon as it is built, and the returned `Vec` is
    /// empty. Any error aborts the remaining folds.
    pub fn generate<'a, X, Y, S>(
        &self,
        data: &DataSet<'_, X, Y>,
        shuffler: &mut S,
        sink: FoldSink<'a, Fold<X, Y>>,
    ) -> Result<Vec<Fold<X, Y>>>
    where
        X: Clone,
        Y: Clone,
        S: IndexShuffler + ?Sized,
    {
        self.check_degenerate(data.len());

        let permutation = draw(shuffler, data.len())?;

        // more folds than samples only adds empty folds, which cost nothing up front
        let mut emitter = Emitter::new(sink, self.k.min(data.len() + 1));
        for t in 0..self.k {
            let fold = self.index_fold(&permutation, t);
            let (train_x, train_y) = data.select(&fold.trainset)?;
            let (test_x, test_y) = data.select(&fold.testset)?;
            emitter.emit(Fold {
                train_x,
                train_y,
                test_x,
                test_y,
            })?;
        }

        Ok(emitter.finish())
    }

    /// Fold `t`: block `t` is tested, the blocks before and after it are concatenated for
    /// training. Blocks are consecutive, so both parts are plain slices of the permutation.
    fn index_fold(&self, permutation: &Permutation, t: usize) -> IndexFold {
        let size = self.block_size(permutation.len());
        if size == 0 {
            return IndexFold::new();
        }

        let start = t * size;
        let end = start + size;
        let kept = self.k * size;

        let mut trainset = Vec::with_capacity(kept - size);
        trainset.extend_from_slice(&permutation[..start]);
        trainset.extend_from_slice(&permutation[end..kept]);

        IndexFold {
            trainset,
            testset: permutation[start..end].to_vec(),
        }
    }

    fn check_degenerate(&self, n: usize) {
        let size = self.block_size(n);
        debug!("{}-fold split of {} samples, block size {}", self.k, n, size);

        if size == 0 && n > 0 {
            warn!(
                "{} folds for {} samples: every test block is empty",
                self.k, n
            );
        } else if n % self.k != 0 {
            warn!(
                "{} samples do not divide into {} folds: {} shuffled samples are left out",
                n,
                self.k,
                n % self.k
            );
        }
    }
}

impl Default for KFold {
    fn default() -> Self {
        KFold { k: DEFAULT_FOLDS }
    }
}

impl Procedure for KFold {
    fn index_folds(&self, permutation: &Permutation) -> Result<Vec<IndexFold>> {
        self.check_degenerate(permutation.len());
        Ok((0..self.k).map(|t| self.index_fold(permutation, t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;

    use super::*;
    use crate::shuffle::{FixedShuffler, RandomShuffler};

    #[test]
    fn zero_folds_rejected() {
        match KFold::new(0) {
            Err(Error::InvalidFoldCount(0)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn callback_sees_three_folds() {
        let x = [1, 2, 3, 4, 5, 6];
        let y = [0, 1, 0, 1, 0, 1];
        let data = DataSet::new(&x, &y).unwrap();
        let calls = Cell::new(0);

        let folds = KFold::new(3)
            .unwrap()
            .generate(
                &data,
                &mut RandomShuffler::new(),
                FoldSink::invoke(|fold: Fold<i32, i32>| {
                    calls.set(calls.get() + 1);
                    assert_eq!(fold.test_x.len(), 2);
                    assert_eq!(fold.test_y.len(), 2);
                    assert_eq!(fold.train_x.len(), 4);
                    assert_eq!(fold.train_y.len(), 4);
                    Ok(())
                }),
            )
            .unwrap();

        assert!(folds.is_empty());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn collect_returns_all_folds() {
        let x = [1, 2, 3, 4, 5, 6];
        let y = [0, 1, 0, 1, 0, 1];
        let data = DataSet::new(&x, &y).unwrap();

        let folds = KFold::new(3)
            .unwrap()
            .generate(&data, &mut RandomShuffler::new(), FoldSink::Collect)
            .unwrap();

        assert_eq!(folds.len(), 3);
        assert_eq!(folds[0].test_x.len(), 2);

        for fold in &folds {
            // labels still match their records
            for (xi, yi) in fold.train_x.iter().zip(&fold.train_y) {
                assert_eq!(*yi, (xi + 1) % 2);
            }
            for (xi, yi) in fold.test_x.iter().zip(&fold.test_y) {
                assert_eq!(*yi, (xi + 1) % 2);
            }
        }
    }

    #[test]
    fn identity_ordering_gives_contiguous_blocks() {
        let x: Vec<u32> = (0..6).collect();
        let y: Vec<u32> = (10..16).collect();
        let data = DataSet::new(&x, &y).unwrap();

        let folds = KFold::new(3)
            .unwrap()
            .generate(&data, &mut FixedShuffler::identity(6), FoldSink::Collect)
            .unwrap();

        assert_eq!(folds[0].test_x, vec![0, 1]);
        assert_eq!(folds[0].train_x, vec![2, 3, 4, 5]);
        assert_eq!(folds[1].test_x, vec![2, 3]);
        assert_eq!(folds[1].train_x, vec![0, 1, 4, 5]);
        assert_eq!(folds[2].test_x, vec![4, 5]);
        assert_eq!(folds[2].train_x, vec![0, 1, 2, 3]);
        assert_eq!(folds[2].train_y, vec![10, 11, 12, 13]);
    }

    #[test]
    fn fixed_ordering_is_repeatable() {
        let x: Vec<char> = "abcdefghij".chars().collect();
        let y: Vec<usize> = (0..10).collect();
        let data = DataSet::new(&x, &y).unwrap();
        let order = Permutation::from_vec(vec![7, 2, 9, 0, 4, 1, 8, 3, 6, 5]).unwrap();
        let kfold = KFold::new(4).unwrap();

        let mut shuffler = FixedShuffler::new(order);
        let first = kfold.generate(&data, &mut shuffler, FoldSink::Collect).unwrap();
        let second = kfold.generate(&data, &mut shuffler, FoldSink::Collect).unwrap();
        assert_eq!(first, second);

        // blocks of 10 / 4 = 2, indices 6 and 5 are left over
        assert_eq!(first[0].test_x, vec!['h', 'c']);
        assert_eq!(first[3].test_x, vec!['i', 'd']);
        assert_eq!(first[0].train_y, vec![9, 0, 4, 1, 8, 3]);
    }

    #[test]
    fn every_kept_index_tested_once() {
        for &(n, k) in &[(10, 1), (10, 3), (12, 4), (17, 5), (9, 9), (100, 7)] {
            let kfold = KFold::new(k).unwrap();
            let permutation = RandomShuffler::new().shuffle(n).unwrap();
            let folds = kfold.index_folds(&permutation).unwrap();
            assert_eq!(folds.len(), k);

            let mut tested = vec![0; n];
            for fold in &folds {
                let train: HashSet<_> = fold.trainset.iter().collect();
                assert!(fold.testset.iter().all(|i| !train.contains(i)));
                assert_eq!(fold.testset.len(), n / k);
                assert_eq!(fold.trainset.len(), (k - 1) * (n / k));
                for &i in &fold.testset {
                    tested[i] += 1;
                }
            }

            let kept: HashSet<_> = permutation[..k * (n / k)].iter().cloned().collect();
            for (i, &count) in tested.iter().enumerate() {
                assert_eq!(count, if kept.contains(&i) { 1 } else { 0 });
            }
        }
    }

    #[test]
    fn more_folds_than_samples() {
        let x = [1.0, 2.0, 3.0];
        let y = [1, 2, 3];
        let data = DataSet::new(&x, &y).unwrap();

        let folds = KFold::new(5)
            .unwrap()
            .generate(&data, &mut RandomShuffler::new(), FoldSink::Collect)
            .unwrap();

        assert_eq!(folds.len(), 5);
        for fold in folds {
            assert!(fold.test_x.is_empty());
            assert!(fold.test_y.is_empty());
            assert!(fold.train_x.is_empty());
        }
    }

    #[test]
    fn huge_fold_count_streams_lazily() {
        let x = [1, 2, 3];
        let data = DataSet::new(&x, &x).unwrap();
        let calls = Cell::new(0);

        let result = KFold::new(usize::MAX).unwrap().generate(
            &data,
            &mut RandomShuffler::new(),
            FoldSink::invoke(|fold: Fold<i32, i32>| {
                calls.set(calls.get() + 1);
                assert!(fold.test_x.is_empty());
                Err("enough".into())
            }),
        );

        match result {
            Err(Error::Callback(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn callback_failure_stops_generation() {
        let x: Vec<i32> = (0..8).collect();
        let data = DataSet::new(&x, &x).unwrap();
        let calls = Cell::new(0);

        let result = KFold::new(4).unwrap().generate(
            &data,
            &mut RandomShuffler::new(),
            FoldSink::invoke(|_| {
                calls.set(calls.get() + 1);
                if calls.get() == 2 {
                    Err("out of memory".into())
                } else {
                    Ok(())
                }
            }),
        );

        match result {
            Err(Error::Callback(e)) => assert_eq!(e.to_string(), "out of memory"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn short_ordering_rejected() {
        let x = [1, 2, 3, 4];
        let data = DataSet::new(&x, &x).unwrap();
        let result = KFold::new(2).unwrap().generate(
            &data,
            &mut FixedShuffler::identity(3),
            FoldSink::Collect,
        );
        assert!(result.unwrap_err().is_invalid_input());
    }
}
