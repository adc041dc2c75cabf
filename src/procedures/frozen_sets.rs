use crate::dataset::DataSet;
use crate::error::{Error, Result};
use crate::fold::Fold;
use crate::sink::{Emitter, FoldSink};

use super::IndexFold;

/// Cross-validation folds fixed in advance, grouped by repeat.
///
/// Frozen sets are stored as split tables: one row per (repeat, fold, row id) telling whether
/// the row is used for training or testing in that fold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrozenSets {
    folds: Vec<Vec<IndexFold>>,
}

/// One line of a split table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRow {
    #[serde(rename = "type")]
    pub purpose: TrainTest,

    pub rowid: usize,

    pub repeat: usize,

    pub fold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainTest {
    #[serde(rename = "TRAIN")]
    Train,

    #[serde(rename = "TEST")]
    Test,
}

impl FrozenSets {
    /// a single repeat made of `folds`
    pub fn new(folds: Vec<IndexFold>) -> Self {
        FrozenSets { folds: vec![folds] }
    }

    /// Rebuild the folds from split table rows. Rows of one fold keep their relative order.
    ///
    /// Every repeat and fold holds at least one row, so a table of `n` rows has fewer than `n`
    /// repeats and fewer than `n` folds per repeat. Larger numbers fail with
    /// `Error::InvalidSplitTable`.
    pub fn from_rows<I: IntoIterator<Item = SplitRow>>(rows: I) -> Result<Self> {
        let rows: Vec<SplitRow> = rows.into_iter().collect();
        let n_rows = rows.len();

        let mut folds = vec![];
        for item in rows {
            if item.repeat >= n_rows || item.fold >= n_rows {
                return Err(Error::InvalidSplitTable(format!(
                    "repeat {} fold {} in a table of {} rows",
                    item.repeat, item.fold, n_rows
                )));
            }

            if item.repeat >= folds.len() {
                folds.resize(grow_to(item.repeat)?, vec![]);
            }
            let rep = &mut folds[item.repeat];

            if item.fold >= rep.len() {
                rep.resize(grow_to(item.fold)?, IndexFold::new());
            }
            let fold = &mut rep[item.fold];

            match item.purpose {
                TrainTest::Train => fold.trainset.push(item.rowid),
                TrainTest::Test => fold.testset.push(item.rowid),
            }
        }

        Ok(FrozenSets { folds })
    }

    /// The split table, repeat by repeat and fold by fold, training rows before testing rows.
    pub fn to_rows(&self) -> Vec<SplitRow> {
        let mut rows = vec![];
        for (repeat, rep) in self.folds.iter().enumerate() {
            for (fold, f) in rep.iter().enumerate() {
                let train = f.trainset.iter().map(|&rowid| (TrainTest::Train, rowid));
                let test = f.testset.iter().map(|&rowid| (TrainTest::Test, rowid));
                rows.extend(train.chain(test).map(|(purpose, rowid)| SplitRow {
                    purpose,
                    rowid,
                    repeat,
                    fold,
                }));
            }
        }
        rows
    }

    /// parse a JSON array of split rows
    pub fn from_json(s: &str) -> Result<Self> {
        let rows: Vec<SplitRow> = serde_json::from_str(s)?;
        FrozenSets::from_rows(rows)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_rows())?)
    }

    pub fn n_repeats(&self) -> usize {
        self.folds.len()
    }

    /// total number of folds over all repeats
    pub fn n_folds(&self) -> usize {
        self.folds.iter().map(|rep| rep.len()).sum()
    }

    /// all folds, repeat by repeat
    pub fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a IndexFold> + 'a> {
        let iter = self.folds.iter().flat_map(|inner| inner.iter());
        Box::new(iter)
    }

    /// Materialize the stored folds over `data`, in the order of `iter()`.
    ///
    /// Row ids beyond the end of `data` fail the whole call with `Error::IndexOutOfBounds`.
    pub fn generate<'a, X, Y>(
        &self,
        data: &DataSet<'_, X, Y>,
        sink: FoldSink<'a, Fold<X, Y>>,
    ) -> Result<Vec<Fold<X, Y>>>
    where
        X: Clone,
        Y: Clone,
    {
        debug!(
            "Replaying {} frozen folds over {} samples",
            self.n_folds(),
            data.len()
        );

        let mut emitter = Emitter::new(sink, self.n_folds());
        for fold in self.iter() {
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
}

/// length of a table that has room for `index`
fn grow_to(index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .ok_or_else(|| Error::InvalidSplitTable(format!("index {} too large", index)))
}
